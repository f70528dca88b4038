use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Geocoder, LngLat};
use crate::common::http_client;

/// Amap (Gaode) forward-geocoding endpoint.
pub const AMAP_GEOCODE_URL: &str = "https://restapi.amap.com/v3/geocode/geo";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for the Amap geocoding REST API.
pub struct AmapClient {
    client: Client,
    key: String,
    endpoint: String,
}

impl AmapClient {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client(REQUEST_TIMEOUT)?,
            key: key.into(),
            endpoint: AMAP_GEOCODE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (mirrors, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request(&self, address: &str) -> Result<Option<LngLat>> {
        let body = self.client
            .get(&self.endpoint)
            .query(&[("key", self.key.as_str()), ("address", address)])
            .send()
            .with_context(|| format!("GET {}", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("GET {} returned error status", self.endpoint))?
            .text()
            .context("[geocode] Failed to read response body")?;

        parse_geocode_body(&body)
    }
}

impl Geocoder for AmapClient {
    fn locate(&self, address: &str) -> Option<LngLat> {
        match self.request(address) {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                warn!("[geocode] no result for {address:?}");
                None
            }
            Err(err) => {
                warn!("[geocode] lookup failed for {address:?}: {err:#}");
                None
            }
        }
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    count: Value,
    #[serde(default)]
    geocodes: Vec<GeocodeHit>,
}

#[derive(Deserialize)]
struct GeocodeHit {
    /// `"lng,lat"`; the service sends `[]` for empty fields.
    #[serde(default)]
    location: Value,
}

/// `count` arrives as a string ("1") but tolerate a bare number.
fn count_of(value: &Value) -> u64 {
    match value {
        Value::String(s) => s.trim().parse().unwrap_or(0),
        Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

fn parse_location(location: &str) -> Result<LngLat> {
    let (lng, lat) = location.split_once(',')
        .ok_or_else(|| anyhow!("[geocode] malformed location {location:?}"))?;
    let lng = lng.trim().parse::<f64>()
        .with_context(|| format!("[geocode] malformed longitude in {location:?}"))?;
    let lat = lat.trim().parse::<f64>()
        .with_context(|| format!("[geocode] malformed latitude in {location:?}"))?;
    Ok(LngLat { lng, lat })
}

/// Interpret a geocoding response body.
///
/// `Ok(None)` means the service answered but found nothing (non-"1" status or
/// zero results); `Err` means the body could not be understood.
pub fn parse_geocode_body(body: &str) -> Result<Option<LngLat>> {
    let response: GeocodeResponse = serde_json::from_str(body)
        .context("[geocode] response is not valid JSON")?;
    let count = count_of(&response.count);
    debug!("[geocode] status={:?} info={:?} count={count}", response.status, response.info);

    if response.status != "1" || count == 0 { return Ok(None) }

    let location = response.geocodes.first()
        .and_then(|hit| hit.location.as_str())
        .ok_or_else(|| anyhow!("[geocode] count={count} but no location in response"))?;
    parse_location(location).map(Some)
}
