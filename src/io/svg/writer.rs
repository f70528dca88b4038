use std::{io::Write, path::Path};

use anyhow::{Context, Result};

use crate::common::{PendingWrite, assert_not_stdout};

pub(crate) struct SvgWriter {
    writer: PendingWrite,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }
}

impl SvgWriter {
    /// Create a new SVG writer; the file appears at `path` on `finish`.
    pub(crate) fn create(path: &Path, force: bool) -> Result<Self> {
        assert_not_stdout(path)?;
        let writer = PendingWrite::open(path, force)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;
        Ok(Self { writer })
    }

    /// Write the SVG header, including the XML declaration and opening <svg> tag.
    pub(crate) fn write_header(&mut self, width: f64, height: f64) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(self, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
        writeln!(self, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
        Ok(())
    }

    /// Write a `<defs><style>` block.
    pub(crate) fn write_styles(&mut self, css: &str) -> Result<()> {
        writeln!(self, "<defs>\n<style>\n{css}</style>\n</defs>")?;
        Ok(())
    }

    /// Write the closing </svg> tag and move the file into place.
    pub(crate) fn finish(mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        self.writer.finalize()
    }
}

/// Escape text for use in SVG character data and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
