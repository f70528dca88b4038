use std::fs;

use anyhow::{Context, Result, ensure};
use tracing::{info, warn};

use crate::cli::MapArgs;
use crate::common::{assert_not_stdout, download_file, refuse_overwrite, require_file_exists};
use crate::io::{csv::read_table, geojson::{NamedShape, read_named_shapes}};
use crate::map::{
    Anchor, Hospital, MapView, PolicyMap, districts_with_counted_hospitals, districts_with_density, read_density,
};

pub fn run(args: &MapArgs) -> Result<()> {
    assert_not_stdout(&args.output)?;
    refuse_overwrite(&args.output, args.force)?;
    require_file_exists(&args.hospitals)?;
    require_file_exists(&args.anchors)?;
    if let Some(density) = &args.density { require_file_exists(density)?; }

    let shapes = load_district_shapes(args)?;

    let hospitals = Hospital::from_table(&read_table(&args.hospitals)?)
        .with_context(|| format!("[map] Failed to load hospitals from {}", args.hospitals.display()))?;
    if hospitals.skipped > 0 {
        warn!("[map] {} hospital rows skipped (bad coordinates or unknown type)", hospitals.skipped);
    }
    let anchors = Anchor::from_table(&read_table(&args.anchors)?)
        .with_context(|| format!("[map] Failed to load border crossings from {}", args.anchors.display()))?;
    if anchors.skipped > 0 {
        warn!("[map] {} border crossing rows skipped (bad coordinates)", anchors.skipped);
    }

    let districts = match &args.density {
        Some(path) => {
            let density = read_density(&read_table(path)?)
                .with_context(|| format!("[map] Failed to load density table {}", path.display()))?;
            districts_with_density(shapes, &density)
        }
        None => {
            info!("[map] no density table; counting designated hospitals per district");
            districts_with_counted_hospitals(shapes, &hospitals.rows)
        }
    };

    let map = PolicyMap {
        view: MapView {
            center: [args.center_lat, args.center_lon],
            zoom: args.zoom,
            fit_districts: args.fit,
        },
        districts,
        hospitals: hospitals.rows,
        anchors: anchors.rows,
    };
    map.write_html(&args.output, args.force)?;

    println!(
        "Mapped {} hospitals, {} border crossings, {} districts",
        map.hospitals.len(), map.anchors.len(), map.districts.len(),
    );
    println!("Wrote map -> {}", args.output.display());
    Ok(())
}

/// Read district boundaries, downloading them first if the file is absent.
fn load_district_shapes(args: &MapArgs) -> Result<Vec<NamedShape>> {
    if !args.geojson.exists() {
        info!("[map] downloading district boundaries {} -> {}", args.geojson_url, args.geojson.display());
        download_file(&args.geojson_url, &args.geojson, false)
            .with_context(|| format!("[map] Failed to download district boundaries from {}", args.geojson_url))?;
    }

    let bytes = fs::read(&args.geojson)
        .with_context(|| format!("[map] Failed to read {}", args.geojson.display()))?;
    let shapes = read_named_shapes(&bytes)
        .with_context(|| format!("[map] Failed to parse district boundaries in {}", args.geojson.display()))?;
    ensure!(!shapes.is_empty(), "[map] no named district polygons in {}", args.geojson.display());
    info!("[map] {} district boundaries", shapes.len());
    Ok(shapes)
}
