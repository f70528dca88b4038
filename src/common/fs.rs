use std::{fs::{self, File}, io::Write, path::{Path, PathBuf}};

use anyhow::{Context, Result, bail};
use tempfile::NamedTempFile;

/// Reject "-" as an output path; every command writes to a real file.
pub(crate) fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") { bail!("stdout is not supported; provide a real file path.") }
    Ok(())
}

/// Error if `path` exists and `force` is not set.
pub(crate) fn refuse_overwrite(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", path.display());
    }
    Ok(())
}

/// Error unless `path` is an existing regular file.
pub(crate) fn require_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        bail!("Path exists but is not a file: {}", path.display());
    }
    Ok(())
}

/// Directory a file at `path` lives in, treating a bare file name as `.`.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Write-then-rename wrapper so an interrupted run never leaves a truncated output.
pub(crate) struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

impl PendingWrite {
    /// Open a temporary file next to `target`.
    /// Refuses to replace an existing file unless `force` is set.
    pub(crate) fn open(target: &Path, force: bool) -> Result<Self> {
        let dir = parent_dir(target);
        fs::create_dir_all(dir)
            .with_context(|| format!("[fs] Failed to create directory {}", dir.display()))?;
        refuse_overwrite(target, force)?;
        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("[fs] Failed to create temp file in {}", dir.display()))?;

        Ok(Self { target: target.to_path_buf(), tmp })
    }

    /// Flush and move the temporary file into place.
    pub(crate) fn finalize(mut self) -> Result<()> {
        self.tmp.flush()?;
        self.tmp.as_file().sync_all().ok(); // best-effort fsync file
        self.tmp.persist(&self.target)
            .with_context(|| format!("[fs] Failed to rename into {}", self.target.display()))?;
        let _ = File::open(parent_dir(&self.target)).and_then(|f| f.sync_all());
        Ok(())
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

/// Write `bytes` to `target` atomically.
pub(crate) fn write_bytes(target: &Path, bytes: &[u8], force: bool) -> Result<()> {
    assert_not_stdout(target)?;
    let mut sink = PendingWrite::open(target, force)?;
    sink.write_all(bytes)
        .with_context(|| format!("[fs] Failed to write {}", target.display()))?;
    sink.finalize()
}
