use std::{io::Write, path::Path};

use anyhow::Result;
use lorenz::Lorenz;

use crate::io::svg::{SvgWriter, escape_xml};

/// Side of the square plotting area, in SVG units.
const SIDE: f64 = 640.0;
const LEFT: f64 = 90.0;
const TOP: f64 = 70.0;
const WIDTH: f64 = LEFT + SIDE + 40.0;
const HEIGHT: f64 = TOP + SIDE + 80.0;

const STYLES: &str = r##"    .frame { fill: none; stroke: #000000; stroke-width: 1; }
    .grid { stroke: #b0b0b0; stroke-opacity: 0.6; stroke-width: 0.8; stroke-dasharray: 4 4; }
    .equality { fill: none; stroke: #000000; stroke-width: 1.5; stroke-dasharray: 8 5; }
    .lorenz { fill: none; stroke: #ff0000; stroke-width: 2; stroke-linejoin: round; }
    .tick { font: 11px "Noto Sans CJK SC", "Microsoft YaHei", sans-serif; fill: #333333; }
    .title { font: bold 16px "Noto Sans CJK SC", "Microsoft YaHei", sans-serif; fill: #000000; }
    .label { font: 12px "Noto Sans CJK SC", "Microsoft YaHei", sans-serif; fill: #000000; }
    .legend { font: 10px "Noto Sans CJK SC", "Microsoft YaHei", sans-serif; fill: #000000; }
    .note { font: 12px "Noto Sans CJK SC", "Microsoft YaHei", sans-serif; fill: #000000; }
"##;

/// Text placed on the chart.
#[derive(Clone, Debug)]
pub(crate) struct PlotLabels {
    pub(crate) title: String,
    pub(crate) x_label: String,
    pub(crate) y_label: String,
}

impl Default for PlotLabels {
    fn default() -> Self {
        Self {
            title: "香港医疗资源（医生）分布的洛伦兹曲线".into(),
            x_label: "人口累计百分比".into(),
            y_label: "医生资源累计百分比".into(),
        }
    }
}

/// Map data coordinates in [0,1]^2 to SVG coordinates (Y down).
#[inline]
fn project(x: f64, y: f64) -> (f64, f64) {
    (LEFT + x * SIDE, TOP + (1.0 - y) * SIDE)
}

fn draw_grid(writer: &mut impl Write) -> Result<()> {
    for i in 0..=5 {
        let t = i as f64 / 5.0;
        let (x, _) = project(t, 0.0);
        let (_, y) = project(0.0, t);
        if i > 0 && i < 5 {
            writeln!(writer, r#"<line class="grid" x1="{x:.3}" y1="{TOP:.3}" x2="{x:.3}" y2="{:.3}"/>"#, TOP + SIDE)?;
            writeln!(writer, r#"<line class="grid" x1="{LEFT:.3}" y1="{y:.3}" x2="{:.3}" y2="{y:.3}"/>"#, LEFT + SIDE)?;
        }
        writeln!(writer, r#"<text class="tick" x="{x:.3}" y="{:.3}" text-anchor="middle">{t:.1}</text>"#, TOP + SIDE + 18.0)?;
        writeln!(writer, r#"<text class="tick" x="{:.3}" y="{:.3}" text-anchor="end">{t:.1}</text>"#, LEFT - 8.0, y + 4.0)?;
    }
    writeln!(writer, r#"<rect class="frame" x="{LEFT}" y="{TOP}" width="{SIDE}" height="{SIDE}"/>"#)?;
    Ok(())
}

fn draw_labels(writer: &mut impl Write, labels: &PlotLabels) -> Result<()> {
    let center = LEFT + SIDE / 2.0;
    writeln!(writer, r#"<text class="title" x="{center:.3}" y="{:.3}" text-anchor="middle">{}</text>"#, TOP - 24.0, escape_xml(&labels.title))?;
    writeln!(writer, r#"<text class="label" x="{center:.3}" y="{:.3}" text-anchor="middle">{}</text>"#, TOP + SIDE + 46.0, escape_xml(&labels.x_label))?;

    let (x, y) = (LEFT - 52.0, TOP + SIDE / 2.0);
    writeln!(writer, r#"<text class="label" x="{x:.3}" y="{y:.3}" text-anchor="middle" transform="rotate(-90 {x:.3} {y:.3})">{}</text>"#, escape_xml(&labels.y_label))?;
    Ok(())
}

fn draw_legend(writer: &mut impl Write) -> Result<()> {
    let (x, y) = (LEFT + 10.0, TOP + 10.0);
    writeln!(writer, r##"<rect x="{x:.3}" y="{y:.3}" width="300" height="46" fill="#ffffff" fill-opacity="0.8" stroke="#cccccc"/>"##)?;
    writeln!(writer, r#"<line class="equality" x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#, x + 10.0, y + 16.0, x + 40.0, y + 16.0)?;
    writeln!(writer, r#"<text class="legend" x="{:.3}" y="{:.3}">绝对公平线 (Line of Perfect Equality)</text>"#, x + 48.0, y + 20.0)?;
    writeln!(writer, r#"<line class="lorenz" x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#, x + 10.0, y + 34.0, x + 40.0, y + 34.0)?;
    writeln!(writer, r#"<text class="legend" x="{:.3}" y="{:.3}">洛伦兹曲线 (Lorenz Curve)</text>"#, x + 48.0, y + 38.0)?;
    Ok(())
}

/// Draw the equality diagonal, the Lorenz polyline and the Gini annotation.
pub(crate) fn draw_lorenz(writer: &mut impl Write, lorenz: &Lorenz, labels: &PlotLabels) -> Result<()> {
    draw_grid(writer)?;

    let (x0, y0) = project(0.0, 0.0);
    let (x1, y1) = project(1.0, 1.0);
    writeln!(writer, r#"<line class="equality" x1="{x0:.3}" y1="{y0:.3}" x2="{x1:.3}" y2="{y1:.3}"/>"#)?;

    let points = lorenz.curve.iter()
        .map(|p| {
            let (x, y) = project(p.population_share, p.resource_share);
            format!("{x:.3},{y:.3}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, r#"<polyline class="lorenz" points="{points}"/>"#)?;

    let (x, y) = project(0.6, 0.2);
    writeln!(writer, r##"<rect x="{:.3}" y="{:.3}" width="330" height="26" fill="#ffffff" fill-opacity="0.5" stroke="#000000"/>"##, x - 6.0, y - 18.0)?;
    writeln!(writer, r#"<text class="note" x="{x:.3}" y="{y:.3}">基尼系数 (Gini Coefficient) = {:.4}</text>"#, lorenz.gini)?;

    draw_labels(writer, labels)?;
    draw_legend(writer)?;
    Ok(())
}

/// Render `lorenz` as a standalone SVG chart at `path`.
pub(crate) fn write_lorenz_svg(path: &Path, lorenz: &Lorenz, labels: &PlotLabels, force: bool) -> Result<()> {
    let mut writer = SvgWriter::create(path, force)?;
    writer.write_header(WIDTH, HEIGHT)?;
    writer.write_styles(STYLES)?;
    draw_lorenz(&mut writer, lorenz, labels)?;
    writer.finish()
}
