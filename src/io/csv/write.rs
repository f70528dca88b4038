//! CSV writing operations.

use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::CsvWriter};

use crate::common::{PendingWrite, assert_not_stdout};

/// Write a DataFrame as UTF-8 CSV with a BOM, replacing `path` atomically.
pub(crate) fn write_table(df: &mut DataFrame, path: &Path, force: bool) -> Result<()> {
    assert_not_stdout(path)?;
    let mut sink = PendingWrite::open(path, force)?;
    CsvWriter::new(&mut sink)
        .include_bom(true)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))?;
    sink.finalize()
}
