use std::time::Duration;

use anyhow::{Result, ensure};
use tracing::info;

use crate::cli::GeocodeArgs;
use crate::common::{assert_not_stdout, refuse_overwrite, require_file_exists};
use crate::geocode::{AmapClient, GeocodeOptions, geocode_table};
use crate::io::csv::{read_table, write_table};

pub fn run(args: &GeocodeArgs) -> Result<()> {
    assert_not_stdout(&args.output)?;
    // Checked up front so a finished batch of requests is never thrown away.
    refuse_overwrite(&args.output, args.force)?;
    require_file_exists(&args.input)?;
    ensure!(!args.key.trim().is_empty(), "[geocode] empty API key; pass --key or set AMAP_KEY");

    let df = read_table(&args.input)?;
    info!("[geocode] {} rows from {} -> {}", df.height(), args.input.display(), args.output.display());

    let client = AmapClient::new(args.key.trim())?.with_endpoint(args.endpoint.as_str());
    let options = GeocodeOptions {
        name_column: args.name_column.clone(),
        address_column: args.address_column.clone(),
        delay: Duration::from_millis(args.delay_ms),
    };
    let (mut df, tally) = geocode_table(df, &client, &options)?;

    write_table(&mut df, &args.output, args.force)?;
    println!("Geocoded {} succeeded, {} failed", tally.success, tally.failure);
    println!("Wrote table -> {}", args.output.display());
    Ok(())
}
