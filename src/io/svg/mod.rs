//! SVG format writing operations for chart export.

mod writer;

pub(crate) use writer::*;
