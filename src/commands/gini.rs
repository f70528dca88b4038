use std::path::Path;

use anyhow::{Context, Result};
use lorenz::{Lorenz, compute_lorenz_gini};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::{info, warn};

use crate::cli::LorenzArgs;
use crate::common::{assert_not_stdout, refuse_overwrite, require_file_exists};
use crate::io::csv::{RegionColumns, read_regions, read_table, write_table};
use crate::plot::{PlotLabels, write_lorenz_svg};

pub fn run(args: &LorenzArgs) -> Result<()> {
    assert_not_stdout(&args.output)?;
    refuse_overwrite(&args.output, args.force)?;
    if let Some(table_out) = &args.table_out {
        assert_not_stdout(table_out)?;
        refuse_overwrite(table_out, args.force)?;
    }
    require_file_exists(&args.input)?;

    let df = read_table(&args.input)?;
    let columns = RegionColumns {
        id: &args.id_column,
        population: &args.population_column,
        resources: &args.resource_column,
    };
    let rows = read_regions(&df, &columns)
        .with_context(|| format!("[lorenz] Failed to read regions from {}", args.input.display()))?;
    if rows.skipped > 0 {
        warn!("[lorenz] {} of {} rows skipped", rows.skipped, df.height());
    }
    info!("[lorenz] {} regions from {}", rows.regions.len(), args.input.display());

    let lorenz = compute_lorenz_gini(&rows.regions)
        .with_context(|| format!("[lorenz] Failed to compute Gini coefficient for {}", args.input.display()))?;

    let labels = plot_labels(args);
    write_lorenz_svg(&args.output, &lorenz, &labels, args.force)?;

    if let Some(table_out) = &args.table_out {
        write_ranked_table(&lorenz, &args.id_column, table_out, args.force)?;
        println!("Wrote table -> {}", table_out.display());
    }

    println!("Gini coefficient: {:.4}", lorenz.gini);
    println!("Wrote chart -> {}", args.output.display());
    Ok(())
}

fn plot_labels(args: &LorenzArgs) -> PlotLabels {
    let defaults = PlotLabels::default();
    PlotLabels {
        title: args.title.clone().unwrap_or(defaults.title),
        x_label: args.x_label.clone().unwrap_or(defaults.x_label),
        y_label: args.y_label.clone().unwrap_or(defaults.y_label),
    }
}

/// Ranked regions with per-capita ratio and cumulative shares.
fn ranked_table(lorenz: &Lorenz, id_column: &str) -> Result<DataFrame> {
    let ranked = &lorenz.ranked;
    let columns: Vec<Column> = vec![
        Series::new(id_column.into(), ranked.iter().map(|r| r.region.id.clone()).collect::<Vec<_>>()).into(),
        Series::new("population".into(), ranked.iter().map(|r| r.region.population).collect::<Vec<_>>()).into(),
        Series::new("resource_count".into(), ranked.iter().map(|r| r.region.resource_count).collect::<Vec<_>>()).into(),
        Series::new("ratio".into(), ranked.iter().map(|r| r.ratio).collect::<Vec<_>>()).into(),
        Series::new("cum_population_share".into(), ranked.iter().map(|r| r.cumulative.population_share).collect::<Vec<_>>()).into(),
        Series::new("cum_resource_share".into(), ranked.iter().map(|r| r.cumulative.resource_share).collect::<Vec<_>>()).into(),
    ];
    DataFrame::new(columns).context("[lorenz] Failed to build ranked table")
}

fn write_ranked_table(lorenz: &Lorenz, id_column: &str, path: &Path, force: bool) -> Result<()> {
    let mut df = ranked_table(lorenz, id_column)?;
    write_table(&mut df, path, force)
}
