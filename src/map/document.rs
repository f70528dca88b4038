//! Standalone Leaflet HTML document for the policy map.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{
    Anchor, District, Hospital, HospitalKind,
    color::LinearColormap,
    district::districts_bounds,
    hospital::MarkerStyle,
    legend::{density_legend_html, marker_legend_html},
};
use crate::{common::write_bytes, io::geojson::{feature, feature_collection, multipolygon_to_geojson}};

const LEAFLET_VERSION: &str = "1.9.4";
const CHOROPLETH_NAME: &str = "“药械通”医院区域密度";
const DISTRICT_LINES_NAME: &str = "行政区划边界线";
const ANCHORS_NAME: &str = "跨境口岸 (Border Crossings)";

/// Initial viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    /// Fit the viewport to the district boundaries instead of `center`/`zoom`.
    pub fit_districts: bool,
}

impl Default for MapView {
    fn default() -> Self {
        Self { center: [22.54, 114.05], zoom: 11, fit_districts: false }
    }
}

#[derive(Serialize)]
struct Marker {
    lat: f64,
    lng: f64,
    popup: String,
}

#[derive(Serialize)]
struct MarkerLayer {
    name: &'static str,
    style: MarkerStyle,
    markers: Vec<Marker>,
}

#[derive(Serialize)]
struct MapData {
    view: MapView,
    bounds: Option<[[f64; 2]; 2]>,
    choropleth_name: &'static str,
    lines_name: &'static str,
    districts: Value,
    layers: Vec<MarkerLayer>,
}

/// Everything drawn on the policy map.
pub struct PolicyMap {
    pub view: MapView,
    pub districts: Vec<District>,
    pub hospitals: Vec<Hospital>,
    pub anchors: Vec<Anchor>,
}

impl PolicyMap {
    /// Colormap over `[0, max district count]`.
    pub(crate) fn colormap(&self) -> LinearColormap {
        let max = self.districts.iter().map(|d| d.count).max().unwrap_or(0);
        LinearColormap::bugn(0.0, max as f64)
    }

    /// District features with `name`, `count` and precomputed `fill` color.
    fn district_features(&self, colormap: &LinearColormap) -> Value {
        let features = self.districts.iter()
            .map(|d| {
                let mut props = Map::new();
                props.insert("name".into(), json!(d.name));
                props.insert("count".into(), json!(d.count));
                props.insert("fill".into(), json!(colormap.color_at(d.count as f64).to_string()));
                feature(multipolygon_to_geojson(&d.shape), props)
            })
            .collect();
        feature_collection(features)
    }

    fn marker_layers(&self) -> Vec<MarkerLayer> {
        let mut layers = HospitalKind::ALL.iter()
            .map(|&kind| MarkerLayer {
                name: kind.layer_name(),
                style: kind.marker_style(),
                markers: self.hospitals.iter()
                    .filter(|h| h.kind == kind)
                    .map(|h| Marker { lat: h.lat, lng: h.lng, popup: kind.popup(&h.name) })
                    .collect(),
            })
            .collect::<Vec<_>>();

        layers.push(MarkerLayer {
            name: ANCHORS_NAME,
            style: MarkerStyle::Star { color: "purple" },
            markers: self.anchors.iter()
                .map(|a| Marker { lat: a.lat, lng: a.lng, popup: a.popup() })
                .collect(),
        });
        layers
    }

    fn data(&self, colormap: &LinearColormap) -> MapData {
        let bounds = self.view.fit_districts
            .then(|| districts_bounds(&self.districts))
            .flatten()
            .map(|r| [[r.min().y, r.min().x], [r.max().y, r.max().x]]);

        MapData {
            view: self.view,
            bounds,
            choropleth_name: CHOROPLETH_NAME,
            lines_name: DISTRICT_LINES_NAME,
            districts: self.district_features(colormap),
            layers: self.marker_layers(),
        }
    }

    /// Render the complete HTML document.
    pub fn to_html(&self) -> Result<String> {
        let colormap = self.colormap();
        let data = serde_json::to_string(&self.data(&colormap))
            .context("[map] Failed to serialize map data")?
            // Keep the payload from closing the surrounding <script> element.
            .replace("</", "<\\/");

        Ok(TEMPLATE
            .replace("{{LEAFLET}}", LEAFLET_VERSION)
            .replace("{{DENSITY_LEGEND}}", &density_legend_html(&colormap))
            .replace("{{MARKER_LEGEND}}", marker_legend_html())
            .replace("{{DATA}}", &data))
    }

    /// Write the document to `path` atomically.
    pub fn write_html(&self, path: &Path, force: bool) -> Result<()> {
        write_bytes(path, self.to_html()?.as_bytes(), force)
            .with_context(|| format!("[map] Failed to write {}", path.display()))
    }
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>港澳药械通政策空间评估地图</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{{LEAFLET}}/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@{{LEAFLET}}/dist/leaflet.js"></script>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css"/>
<style>
html, body, #map { height: 100%; width: 100%; margin: 0; padding: 0; }
.star-marker { background: none; border: none; font-size: 20px; text-shadow: 0 0 2px #fff; }
</style>
</head>
<body>
<div id="map"></div>
{{DENSITY_LEGEND}}
{{MARKER_LEGEND}}
<script>
const DATA = {{DATA}};

const map = L.map('map').setView(DATA.view.center, DATA.view.zoom);
if (DATA.bounds) { map.fitBounds(DATA.bounds); }

L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
    attribution: '&copy; OpenStreetMap contributors &copy; CARTO',
    subdomains: 'abcd',
    maxZoom: 20,
}).addTo(map);

const overlays = {};

const density = L.geoJSON(DATA.districts, {
    style: (f) => ({ fillColor: f.properties.fill, fillOpacity: 0.7, color: f.properties.fill, opacity: 0, weight: 0 }),
    onEachFeature: (f, layer) => layer.bindTooltip(f.properties.name + ': ' + f.properties.count),
}).addTo(map);
overlays[DATA.choropleth_name] = density;

function makeMarker(style, m) {
    if (style.kind === 'star') {
        const icon = L.divIcon({
            className: 'star-marker',
            html: '<i class="fa fa-star" style="color:' + style.color + '"></i>',
            iconSize: [20, 20],
        });
        return L.marker([m.lat, m.lng], { icon: icon });
    }
    return L.circleMarker([m.lat, m.lng], {
        radius: style.radius,
        color: style.color,
        fill: true,
        fillColor: style.color,
        fillOpacity: style.fill_opacity,
    });
}

for (const layer of DATA.layers) {
    const group = L.featureGroup();
    for (const m of layer.markers) {
        makeMarker(layer.style, m).bindPopup(m.popup, { maxWidth: 250 }).addTo(group);
    }
    group.addTo(map);
    overlays[layer.name] = group;
}

const lines = L.geoJSON(DATA.districts, {
    style: () => ({ color: 'grey', weight: 1, dashArray: '5, 5', fillOpacity: 0.0 }),
    interactive: false,
}).addTo(map);
overlays[DATA.lines_name] = lines;

L.control.layers(null, overlays).addTo(map);
</script>
</body>
</html>
"#;
