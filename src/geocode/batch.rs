use std::{thread, time::Duration};

use anyhow::{Context, Result, anyhow};
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::{info, warn};

use super::{Geocoder, normalize_address};
use crate::io::csv::{cell, text_column};

/// Knobs for a geocoding batch.
#[derive(Clone, Debug)]
pub struct GeocodeOptions {
    /// Column holding the display name; coordinates are inserted after it.
    pub name_column: String,
    pub address_column: String,
    /// Fixed pause after every request, to stay under the service's rate limit.
    pub delay: Duration,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self {
            name_column: "name".into(),
            address_column: "address".into(),
            delay: Duration::from_millis(500),
        }
    }
}

/// Running success/failure counts for a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeocodeTally {
    pub success: usize,
    pub failure: usize,
}

/// Geocode every row of `df`, returning the table with `longitude` and
/// `latitude` columns placed right after the name column.
///
/// Addresses are normalized in place first. Rows without an address count as
/// failures and are not sent. Existing coordinate columns are replaced.
pub fn geocode_table(
    mut df: DataFrame,
    geocoder: &impl Geocoder,
    options: &GeocodeOptions,
) -> Result<(DataFrame, GeocodeTally)> {
    let height = df.height();

    for column in ["longitude", "latitude"] {
        if df.get_column_index(column).is_some() {
            df.drop_in_place(column)?;
        }
    }

    let name_idx = df.get_column_index(&options.name_column)
        .ok_or_else(|| anyhow!("[geocode] missing column {:?}; available: {:?}", options.name_column, df.get_column_names()))?;
    let names = text_column(&df, &options.name_column)?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect::<Vec<_>>();

    let addresses = match df.get_column_index(&options.address_column) {
        Some(_) => {
            let normalized = text_column(&df, &options.address_column)?
                .into_iter()
                .map(|v| v.map(normalize_address))
                .collect::<Vec<_>>();
            df.with_column(Series::new(options.address_column.as_str().into(), normalized.clone()))
                .context("[geocode] Failed to replace address column")?;
            normalized
        }
        None => {
            warn!("[geocode] no {:?} column; every row will be skipped", options.address_column);
            vec![None; height]
        }
    };

    let mut tally = GeocodeTally::default();
    let mut longitudes = Vec::with_capacity(height);
    let mut latitudes = Vec::with_capacity(height);

    for (row, (name, address)) in names.iter().zip(&addresses).enumerate() {
        let Some(address) = cell(address.as_deref()) else {
            warn!("[geocode] row {}: empty address, skipped", row + 1);
            tally.failure += 1;
            longitudes.push(None);
            latitudes.push(None);
            continue;
        };

        info!("[geocode] row {}: {name} - {address}", row + 1);
        match geocoder.locate(address) {
            Some(location) => {
                info!("[geocode]   found {location}");
                tally.success += 1;
                longitudes.push(Some(location.lng));
                latitudes.push(Some(location.lat));
            }
            None => {
                warn!("[geocode] row {}: no coordinates for {name:?}", row + 1);
                tally.failure += 1;
                longitudes.push(None);
                latitudes.push(None);
            }
        }

        if !options.delay.is_zero() { thread::sleep(options.delay) }
    }

    df.insert_column(name_idx + 1, Series::new("longitude".into(), longitudes))?;
    df.insert_column(name_idx + 2, Series::new("latitude".into(), latitudes))?;

    Ok((df, tally))
}
