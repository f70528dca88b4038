//! Fixed-position HTML legends drawn over the map.

use super::color::LinearColormap;

const DENSITY_TITLE: &str = "“药械通”医院区域密度";
const OUTLINE: &str = "text-shadow: -1px -1px 0 #FFF, 1px -1px 0 #FFF, -1px 1px 0 #FFF, 1px 1px 0 #FFF;";

/// Class edges for the discrete density legend; the last class is open-ended.
pub(crate) const DENSITY_BINS: [u64; 5] = [0, 2, 4, 6, 8];

/// One row of the density legend.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LegendEntry {
    pub(crate) label: String,
    pub(crate) color: String,
}

/// Discrete classes sampled from `colormap` at each class midpoint.
pub(crate) fn density_entries(colormap: &LinearColormap) -> Vec<LegendEntry> {
    let classes = DENSITY_BINS.len() - 1;
    DENSITY_BINS.windows(2)
        .enumerate()
        .map(|(i, edge)| {
            let (lower, upper) = (edge[0], edge[1] - 1);
            let color = colormap.color_at((lower + upper) as f64 / 2.0).to_string();
            let label = if i + 1 < classes { format!("{lower} - {upper}") } else { format!("{lower}+") };
            LegendEntry { label, color }
        })
        .collect()
}

/// Vertical, borderless density legend in the lower-left corner.
pub(crate) fn density_legend_html(colormap: &LinearColormap) -> String {
    let mut html = String::new();
    html.push_str(r#"<div style="position: fixed; bottom: 185px; left: 50px; z-index:9998; font-size:14px; background-color: rgba(255, 255, 255, 0.0);">"#);
    html.push_str(&format!(r#"<h4 style="margin: 0 0 5px 0; text-align: left; color: #333; {OUTLINE}"><b>{DENSITY_TITLE}</b></h4>"#));
    html.push_str(r#"<ul style="list-style: none; padding: 0; margin: 0;">"#);
    for entry in density_entries(colormap) {
        html.push_str(&format!(
            r#"<li style="margin: 5px 0; color: #333; {OUTLINE}"><span style="background-color: {}; width: 20px; height: 20px; display: inline-block; margin-right: 5px; vertical-align: middle; border: 1px solid #ccc;"></span>{}</li>"#,
            entry.color, entry.label,
        ));
    }
    html.push_str("</ul></div>");
    html
}

/// Boxed legend for the point layers, below the density legend.
pub(crate) fn marker_legend_html() -> &'static str {
    r#"<div style="position: fixed; bottom: 50px; left: 50px; width: 280px; height: 120px;
     background-color: white; border:2px solid grey; z-index:9999; font-size:14px;">
     &nbsp; <b>医疗资源图例</b><br>
     &nbsp; <i class="fa fa-circle" style="color:#444444"></i>&nbsp; 普通三甲医院<br>
     &nbsp; <i class="fa fa-circle" style="color:red"></i>&nbsp; “药械通”指定医院 (三甲)<br>
     &nbsp; <i class="fa fa-circle" style="color:#336e99"></i>&nbsp; “药械通”指定医院 (非三甲)<br>
     &nbsp; <i class="fa fa-star" style="color:purple"></i>&nbsp; 主要跨境口岸<br>
     </div>"#
}
