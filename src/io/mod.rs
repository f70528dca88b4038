//! Format-specific reading and writing.
//!
//! - `csv` - delimited tables (UTF-8 or GBK in, UTF-8 with BOM out)
//! - `geojson` - district boundary features
//! - `svg` - chart export

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod svg;
