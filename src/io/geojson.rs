//! GeoJSON reading and writing for district boundaries.

use anyhow::{Context, Result, anyhow};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value, json};
use tracing::debug;

/// A boundary feature keyed by its `name` property.
#[derive(Clone, Debug)]
pub(crate) struct NamedShape {
    pub(crate) name: String,
    pub(crate) shape: MultiPolygon<f64>,
}

/// Read `Polygon`/`MultiPolygon` features with a `name` property from GeoJSON bytes.
/// Features of other geometry types, or without a name, are skipped.
pub(crate) fn read_named_shapes(bytes: &[u8]) -> Result<Vec<NamedShape>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON bytes")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] expected a FeatureCollection with a features array"))?;

    let mut shapes = Vec::with_capacity(features.len());
    for (idx, feature) in features.iter().enumerate() {
        let Some(name) = feature["properties"]["name"].as_str() else {
            debug!("[io::geojson] feature {idx}: no name property, skipped");
            continue;
        };
        let coords = feature["geometry"]["coordinates"].as_array();
        let shape = match (feature["geometry"]["type"].as_str(), coords) {
            (Some("Polygon"), Some(coords)) => MultiPolygon(vec![parse_polygon_coords(coords)?]),
            (Some("MultiPolygon"), Some(coords)) => parse_multipolygon_coords(coords)?,
            (other, _) => {
                debug!("[io::geojson] feature {idx} ({name}): unsupported geometry {other:?}, skipped");
                continue;
            }
        };
        shapes.push(NamedShape { name: name.to_string(), shape });
    }
    Ok(shapes)
}

/// Parse MultiPolygon coordinates: `[[ring, hole, ...], ...]`.
fn parse_multipolygon_coords(coords: &[Value]) -> Result<MultiPolygon<f64>> {
    coords.iter()
        .map(|polygon| {
            let rings = polygon.as_array()
                .ok_or_else(|| anyhow!("[io::geojson] Invalid MultiPolygon: polygon is not an array"))?;
            parse_polygon_coords(rings)
        })
        .collect::<Result<Vec<_>>>()
        .map(MultiPolygon)
}

/// Parse Polygon coordinates: `[exterior, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        let ring = ring.as_array()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid Polygon: ring is not an array"))?;
        parse_ring_coords(ring)
    });

    let exterior = rings.next()
        .ok_or_else(|| anyhow!("[io::geojson] Invalid Polygon: missing exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from `[[x, y], [x, y], ...]`; extra ordinates are ignored.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for pair in coords {
        let x = pair[0].as_f64()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: x must be a number"))?;
        let y = pair[1].as_f64()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last { points.push(first) }
    }

    Ok(LineString(points))
}

/// GeoJSON geometry value for a MultiPolygon.
pub(crate) fn multipolygon_to_geojson(shape: &MultiPolygon<f64>) -> Value {
    let ring = |ls: &LineString<f64>| ls.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>();
    let polygons = shape.0.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(ring)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    json!({ "type": "MultiPolygon", "coordinates": polygons })
}

/// Wrap a geometry and properties into a Feature.
pub(crate) fn feature(geometry: Value, properties: Map<String, Value>) -> Value {
    json!({ "type": "Feature", "geometry": geometry, "properties": properties })
}

pub(crate) fn feature_collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

#[cfg(test)]
mod tests {
    use geo::Area;

    use super::*;

    const DISTRICTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "name": "罗湖区", "adcode": 440303 },
              "geometry": { "type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2]]] } },
            { "type": "Feature", "properties": { "name": "南山区" },
              "geometry": { "type": "MultiPolygon", "coordinates": [
                  [[[10,0],[12,0],[12,2],[10,2],[10,0]], [[10.5,0.5],[11,0.5],[11,1],[10.5,0.5]]],
                  [[[20,0],[21,0],[21,1],[20,0]]]
              ] } },
            { "type": "Feature", "properties": { "name": "point" },
              "geometry": { "type": "Point", "coordinates": [1,1] } },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] } }
        ]
    }"#;

    #[test]
    fn reads_polygons_and_multipolygons() {
        let shapes = read_named_shapes(DISTRICTS.as_bytes()).unwrap();
        let names = shapes.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["罗湖区", "南山区"]);

        assert_eq!(shapes[0].shape.0.len(), 1);
        assert!((shapes[0].shape.unsigned_area() - 4.0).abs() < 1e-9);

        assert_eq!(shapes[1].shape.0.len(), 2);
        assert_eq!(shapes[1].shape.0[0].interiors().len(), 1);
    }

    #[test]
    fn open_rings_are_closed() {
        let shapes = read_named_shapes(DISTRICTS.as_bytes()).unwrap();
        let ring = shapes[0].shape.0[0].exterior();
        assert_eq!(ring.0.first(), ring.0.last());
    }

    #[test]
    fn rejects_non_collections() {
        assert!(read_named_shapes(br#"{"type": "Feature"}"#).is_err());
        assert!(read_named_shapes(b"not json").is_err());
    }

    #[test]
    fn multipolygon_round_trips_through_value() {
        let shapes = read_named_shapes(DISTRICTS.as_bytes()).unwrap();
        let mut props = Map::new();
        props.insert("name".into(), json!(shapes[1].name));
        let collection = feature_collection(vec![feature(multipolygon_to_geojson(&shapes[1].shape), props)]);

        let bytes = serde_json::to_vec(&collection).unwrap();
        let back = read_named_shapes(&bytes).unwrap();
        assert_eq!(back[0].shape, shapes[1].shape);
    }
}
