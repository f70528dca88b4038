//! Batch address geocoding.

mod address;
mod amap;
mod batch;

pub use address::normalize_address;
pub use amap::{AMAP_GEOCODE_URL, AmapClient, parse_geocode_body};
pub use batch::{GeocodeOptions, GeocodeTally, geocode_table};

use std::fmt;

/// Longitude/latitude as returned by the geocoding service (GCJ-02 for Amap).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lng {}, lat {}", self.lng, self.lat)
    }
}

/// Anything that can turn a free-text address into a coordinate.
///
/// Every failure (transport, HTTP status, malformed body, empty result)
/// is reported as `None`; a batch never aborts because one lookup failed.
pub trait Geocoder {
    fn locate(&self, address: &str) -> Option<LngLat>;
}
