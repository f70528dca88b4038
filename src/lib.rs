#![doc = "careatlas public API"]
pub mod cli;
pub mod commands;
mod common;
mod geocode;
mod io;
mod map;
mod plot;

use anyhow::Result;

use cli::{Cli, Commands};

#[doc(inline)]
pub use geocode::{
    AMAP_GEOCODE_URL, AmapClient, GeocodeOptions, GeocodeTally, Geocoder, LngLat, geocode_table, normalize_address,
    parse_geocode_body,
};

#[doc(inline)]
pub use map::{Anchor, District, Hospital, HospitalKind, Loaded, MapView, PolicyMap, SHENZHEN_DISTRICTS_URL};

#[doc(inline)]
pub use lorenz::{Lorenz, LorenzError, Region, compute_lorenz_gini};

/// Install logging for `cli.verbose` and run the selected command.
pub fn run(cli: &Cli) -> Result<()> {
    common::init_logging(cli.verbose);
    match &cli.command {
        Commands::Geocode(args) => commands::geocode::run(args),
        Commands::Lorenz(args) => commands::gini::run(args),
        Commands::Map(args) => commands::map::run(args),
    }
}
