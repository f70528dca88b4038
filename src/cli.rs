use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::geocode::AMAP_GEOCODE_URL;
use crate::map::SHENZHEN_DISTRICTS_URL;

/// Hospital access toolkit: geocoding, Lorenz/Gini inequality, policy maps
#[derive(Parser, Debug)]
#[command(name = "careatlas", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Geocode hospital addresses through the Amap REST API (forbids stdout)
    Geocode(GeocodeArgs),

    /// Plot a Lorenz curve and compute the Gini coefficient (forbids stdout)
    Lorenz(LorenzArgs),

    /// Render the interactive hospital policy map (forbids stdout)
    Map(MapArgs),
}

#[derive(Args, Debug)]
pub struct GeocodeArgs {
    /// Input hospital table (CSV with `name` and `address` columns)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output table with longitude/latitude columns
    #[arg(short, long, value_hint = ValueHint::FilePath, default_value = "shenzhen_poi_data.csv")]
    pub output: PathBuf,

    /// Amap web-service key
    #[arg(long, env = "AMAP_KEY", hide_env_values = true)]
    pub key: String,

    /// Pause after each request, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Column holding the hospital name
    #[arg(long, default_value = "name")]
    pub name_column: String,

    /// Column holding the street address
    #[arg(long, default_value = "address")]
    pub address_column: String,

    /// Geocoding endpoint
    #[arg(long, default_value = AMAP_GEOCODE_URL, value_hint = ValueHint::Url)]
    pub endpoint: String,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct LorenzArgs {
    /// Input table with one row per region
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output chart (SVG)
    #[arg(short, long, value_hint = ValueHint::FilePath, default_value = "lorenz_curve.svg")]
    pub output: PathBuf,

    /// Also write the ranked table with cumulative shares (CSV)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub table_out: Option<PathBuf>,

    /// Column identifying each region
    #[arg(long, default_value = "district")]
    pub id_column: String,

    /// Column with the population of each region
    #[arg(long, default_value = "population")]
    pub population_column: String,

    /// Column with the resource count of each region
    #[arg(long, default_value = "num_doctors")]
    pub resource_column: String,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Horizontal axis label
    #[arg(long)]
    pub x_label: Option<String>,

    /// Vertical axis label
    #[arg(long)]
    pub y_label: Option<String>,

    /// Overwrite if the files exist
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Geocoded hospitals (`name`, `latitude`, `longitude`, `type`)
    #[arg(value_hint = ValueHint::FilePath)]
    pub hospitals: PathBuf,

    /// Border crossings (`name`, `latitude`, `longitude`)
    #[arg(value_hint = ValueHint::FilePath)]
    pub anchors: PathBuf,

    /// District density table (`district`, `count`); counted from the hospitals if omitted
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub density: Option<PathBuf>,

    /// District boundaries (GeoJSON); downloaded when missing
    #[arg(long, value_hint = ValueHint::FilePath, default_value = "shenzhen_districts.geojson")]
    pub geojson: PathBuf,

    /// Where to fetch the boundaries from
    #[arg(long, value_hint = ValueHint::Url, default_value = SHENZHEN_DISTRICTS_URL)]
    pub geojson_url: String,

    /// Output HTML document
    #[arg(short, long, value_hint = ValueHint::FilePath, default_value = "policy_map.html")]
    pub output: PathBuf,

    /// Initial map center latitude
    #[arg(long, default_value_t = 22.54, allow_negative_numbers = true)]
    pub center_lat: f64,

    /// Initial map center longitude
    #[arg(long, default_value_t = 114.05, allow_negative_numbers = true)]
    pub center_lon: f64,

    /// Initial zoom level
    #[arg(long, default_value_t = 11)]
    pub zoom: u8,

    /// Fit the view to the district boundaries
    #[arg(long)]
    pub fit: bool,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn lorenz_defaults_match_doctor_table() {
        let cli = Cli::try_parse_from(["careatlas", "lorenz", "doctors.csv"]).unwrap();
        let Commands::Lorenz(args) = cli.command else { panic!("expected lorenz") };
        assert_eq!(args.output, PathBuf::from("lorenz_curve.svg"));
        assert_eq!(args.id_column, "district");
        assert_eq!(args.population_column, "population");
        assert_eq!(args.resource_column, "num_doctors");
        assert!(args.table_out.is_none());
    }

    #[test]
    fn geocode_takes_key_flag() {
        let cli = Cli::try_parse_from(["careatlas", "-vv", "geocode", "in.csv", "--key", "k"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Geocode(args) = cli.command else { panic!("expected geocode") };
        assert_eq!(args.key, "k");
        assert_eq!(args.delay_ms, 500);
        assert_eq!(args.output, PathBuf::from("shenzhen_poi_data.csv"));
    }

    #[test]
    fn map_view_defaults() {
        let cli = Cli::try_parse_from(["careatlas", "map", "h.csv", "a.csv"]).unwrap();
        let Commands::Map(args) = cli.command else { panic!("expected map") };
        assert_eq!((args.center_lat, args.center_lon, args.zoom), (22.54, 114.05, 11));
        assert!(args.density.is_none());
        assert_eq!(args.geojson_url, SHENZHEN_DISTRICTS_URL);
    }
}
