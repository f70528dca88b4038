//! CSV reading operations.

use std::{borrow::Cow, fs, io::Cursor, path::Path};

use anyhow::{Context, Result, bail};
use encoding_rs::GBK;
use lorenz::Region;
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, StringChunked}};
use tracing::warn;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode raw file bytes as UTF-8 (BOM optional), falling back to GBK.
pub(crate) fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }
    match GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text),
        None => bail!("[io::csv::read] input is neither UTF-8 nor GBK text"),
    }
}

/// Reads a delimited text file from `path`, keeping every column as text.
pub(crate) fn read_table(path: &Path) -> Result<DataFrame> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    let text = decode_text(&bytes)
        .with_context(|| format!("[io::csv::read] Failed to decode {}", path.display()))?;
    read_table_str(&text)
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads CSV text, keeping every column as text.
pub(crate) fn read_table_str(csv: &str) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[io::csv::read] Failed to parse CSV text")
}

/// Borrow a text column, naming the available columns if it is missing.
pub(crate) fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let column = df.column(name)
        .with_context(|| format!("[io::csv::read] missing column {name:?}; available: {:?}", df.get_column_names()))?;
    column.str()
        .with_context(|| format!("[io::csv::read] column {name:?} is not text"))
}

/// Non-empty, trimmed cell contents.
pub(crate) fn cell(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a non-negative whole number, accepting `1,234` and `1234.0`.
pub(crate) fn parse_count(value: &str) -> Option<u64> {
    let cleaned = value.trim().replace(',', "");
    if let Ok(n) = cleaned.parse::<u64>() { return Some(n) }

    let x = cleaned.parse::<f64>().ok()?;
    (x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x <= u64::MAX as f64).then_some(x as u64)
}

/// Parse a finite decimal coordinate.
pub(crate) fn parse_coord(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Column names that make up a region record.
#[derive(Clone, Debug)]
pub(crate) struct RegionColumns<'a> {
    pub(crate) id: &'a str,
    pub(crate) population: &'a str,
    pub(crate) resources: &'a str,
}

/// Region records parsed from a table, plus the number of rows skipped.
#[derive(Clone, Debug, Default)]
pub(crate) struct RegionRows {
    pub(crate) regions: Vec<Region>,
    pub(crate) skipped: usize,
}

/// A count cell: `Ok(None)` when blank or not a number, an error when it is a
/// negative number.
fn count_cell(value: Option<&str>, column: &str, row: usize) -> Result<Option<u64>> {
    let Some(text) = cell(value) else { return Ok(None) };
    if let Some(count) = parse_count(text) { return Ok(Some(count)) }
    match text.replace(',', "").parse::<f64>() {
        Ok(x) if x < 0.0 => bail!("[regions] row {row}: negative {column} {text:?}"),
        _ => Ok(None),
    }
}

/// Read region records from `df`.
///
/// Rows with a missing id, or a missing or non-numeric count, are skipped
/// with a warning. A negative count is an error naming the row. Zero counts
/// are kept; rejecting a zero population is left to the calculator.
pub(crate) fn read_regions(df: &DataFrame, columns: &RegionColumns) -> Result<RegionRows> {
    let ids = text_column(df, columns.id)?;
    let populations = text_column(df, columns.population)?;
    let resources = text_column(df, columns.resources)?;

    let mut rows = RegionRows::default();
    for (row, ((id, population), resource)) in ids.into_iter()
        .zip(populations.into_iter())
        .zip(resources.into_iter())
        .enumerate()
    {
        let population_count = count_cell(population, columns.population, row + 1)?;
        let resource_count = count_cell(resource, columns.resources, row + 1)?;

        match (cell(id), population_count, resource_count) {
            (Some(id), Some(population), Some(resource_count)) => {
                rows.regions.push(Region::new(id, population, resource_count));
            }
            _ => {
                rows.skipped += 1;
                warn!(
                    "[regions] row {}: skipped (id={:?}, {}={:?}, {}={:?}); {} skipped so far",
                    row + 1, id, columns.population, population, columns.resources, resource, rows.skipped,
                );
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: RegionColumns<'static> = RegionColumns {
        id: "district",
        population: "population",
        resources: "num_doctors",
    };

    #[test]
    fn decode_strips_utf8_bom() {
        let bytes = [UTF8_BOM, "name,address\n".as_bytes()].concat();
        assert_eq!(decode_text(&bytes).unwrap(), "name,address\n");
    }

    #[test]
    fn decode_falls_back_to_gbk() {
        let (encoded, _, had_errors) = GBK.encode("district,population\n油尖旺区,310647\n");
        assert!(!had_errors);
        assert!(std::str::from_utf8(&encoded).is_err());

        let text = decode_text(&encoded).unwrap();
        assert!(text.contains("油尖旺区"));
    }

    #[test]
    fn decode_rejects_binary() {
        assert!(decode_text(&[0xFF, 0xFF, 0xFF, 0x80]).is_err());
    }

    #[test]
    fn columns_stay_text() {
        let df = read_table_str("code,name\n00123,Central\n").unwrap();
        let codes = text_column(&df, "code").unwrap();
        assert_eq!(codes.get(0), Some("00123"));
    }

    #[test]
    fn missing_column_lists_available() {
        let df = read_table_str("a,b\n1,2\n").unwrap();
        let err = text_column(&df, "population").unwrap_err();
        assert!(format!("{err:#}").contains("population"));
    }

    #[test]
    fn parse_count_accepts_common_spellings() {
        assert_eq!(parse_count("1234"), Some(1234));
        assert_eq!(parse_count(" 1,234 "), Some(1234));
        assert_eq!(parse_count("1200.0"), Some(1200));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("n/a"), None);
    }

    #[test]
    fn parse_coord_rejects_non_finite() {
        assert_eq!(parse_coord(" 114.05 "), Some(114.05));
        assert_eq!(parse_coord("NaN"), None);
        assert_eq!(parse_coord("inf"), None);
        assert_eq!(parse_coord(""), None);
    }

    #[test]
    fn read_regions_skips_malformed_rows() {
        let df = read_table_str(
            "district,population,num_doctors\n\
             Wan Chai,166695,950\n\
             Islands,,90\n\
             Sai Kung,n/a,10\n\
             Kwun Tong,673166,610.0\n\
             Empty,0,4\n",
        ).unwrap();

        let rows = read_regions(&df, &COLUMNS).unwrap();
        assert_eq!(rows.skipped, 2);
        assert_eq!(rows.regions, vec![
            Region::new("Wan Chai", 166_695, 950),
            Region::new("Kwun Tong", 673_166, 610),
            Region::new("Empty", 0, 4),
        ]);
    }

    #[test]
    fn read_regions_rejects_negative_counts() {
        let df = read_table_str("district,population,num_doctors\nA,100,10\nB,20,\"-1,234\"\n").unwrap();
        let err = read_regions(&df, &COLUMNS).unwrap_err();
        assert!(format!("{err:#}").contains("row 2: negative num_doctors"));

        let df = read_table_str("district,population,num_doctors\nA,-50,10\n").unwrap();
        assert!(read_regions(&df, &COLUMNS).is_err());
    }

    #[test]
    fn read_regions_requires_columns() {
        let df = read_table_str("district,population\nA,1\n").unwrap();
        assert!(read_regions(&df, &COLUMNS).is_err());
    }
}
