use std::collections::HashMap;

use anyhow::Result;
use geo::{BoundingRect, Contains, MultiPolygon, Point, Rect};
use polars::frame::DataFrame;
use tracing::{debug, warn};

use super::Hospital;
use crate::io::{csv::{cell, parse_count, text_column}, geojson::NamedShape};

/// An administrative district with the number of designated hospitals in it.
#[derive(Clone, Debug)]
pub struct District {
    pub name: String,
    pub shape: MultiPolygon<f64>,
    pub count: u64,
}

impl District {
    fn from_shape(shape: NamedShape) -> Self {
        Self { name: shape.name, shape: shape.shape, count: 0 }
    }
}

/// Read a `district` / `count` table into a lookup. Unusable rows are dropped.
pub(crate) fn read_density(df: &DataFrame) -> Result<HashMap<String, u64>> {
    let names = text_column(df, "district")?;
    let counts = text_column(df, "count")?;

    let mut density = HashMap::new();
    for (row, (name, count)) in names.into_iter().zip(counts).enumerate() {
        match (cell(name), cell(count).and_then(parse_count)) {
            (Some(name), Some(count)) => { density.insert(name.to_string(), count); }
            _ => debug!("[map] density row {}: skipped ({name:?}, {count:?})", row + 1),
        }
    }
    Ok(density)
}

/// Left-join district boundaries to a density lookup; missing districts get 0.
pub(crate) fn districts_with_density(shapes: Vec<NamedShape>, density: &HashMap<String, u64>) -> Vec<District> {
    let districts = shapes.into_iter()
        .map(District::from_shape)
        .map(|mut d| {
            d.count = density.get(&d.name).copied().unwrap_or(0);
            d
        })
        .collect::<Vec<_>>();

    for name in density.keys() {
        if !districts.iter().any(|d| &d.name == name) {
            warn!("[map] density entry {name:?} matches no district boundary");
        }
    }
    districts
}

/// Count policy-designated hospitals falling inside each district.
pub(crate) fn districts_with_counted_hospitals(shapes: Vec<NamedShape>, hospitals: &[Hospital]) -> Vec<District> {
    let points = hospitals.iter()
        .filter(|h| h.kind.is_policy_designated())
        .map(|h| Point::new(h.lng, h.lat))
        .collect::<Vec<_>>();

    shapes.into_iter()
        .map(District::from_shape)
        .map(|mut d| {
            d.count = points.iter().filter(|p| d.shape.contains(*p)).count() as u64;
            d
        })
        .collect()
}

/// Bounding box over all district shapes.
pub(crate) fn districts_bounds(districts: &[District]) -> Option<Rect<f64>> {
    districts.iter()
        .filter_map(|d| d.shape.bounding_rect())
        .reduce(|a, b| Rect::new(
            (a.min().x.min(b.min().x), a.min().y.min(b.min().y)),
            (a.max().x.max(b.max().x), a.max().y.max(b.max().y)),
        ))
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;
    use crate::{io::csv::read_table_str, map::HospitalKind};

    fn square(name: &str, x0: f64, y0: f64) -> NamedShape {
        NamedShape {
            name: name.into(),
            shape: MultiPolygon(vec![polygon![
                (x: x0, y: y0), (x: x0 + 1.0, y: y0), (x: x0 + 1.0, y: y0 + 1.0), (x: x0, y: y0 + 1.0), (x: x0, y: y0),
            ]]),
        }
    }

    fn hospital(kind: HospitalKind, lng: f64, lat: f64) -> Hospital {
        Hospital { name: "h".into(), kind, lng, lat }
    }

    #[test]
    fn density_join_defaults_to_zero() {
        let df = read_table_str("district,count\n福田区,5\n南山区,3.0\n,7\n").unwrap();
        let density = read_density(&df).unwrap();
        assert_eq!(density.len(), 2);

        let districts = districts_with_density(vec![square("福田区", 0.0, 0.0), square("罗湖区", 1.0, 0.0)], &density);
        assert_eq!(districts[0].count, 5);
        assert_eq!(districts[1].count, 0);
    }

    #[test]
    fn only_designated_hospitals_are_counted() {
        let hospitals = vec![
            hospital(HospitalKind::PolicyTierA, 0.5, 0.5),
            hospital(HospitalKind::PolicyNonTierA, 0.2, 0.8),
            hospital(HospitalKind::BaselineTierA, 0.4, 0.4),
            hospital(HospitalKind::PolicyTierA, 1.5, 0.5),
            hospital(HospitalKind::PolicyTierA, 5.0, 5.0),
        ];
        let districts = districts_with_counted_hospitals(vec![square("a", 0.0, 0.0), square("b", 1.0, 0.0)], &hospitals);
        assert_eq!(districts.iter().map(|d| d.count).collect::<Vec<_>>(), [2, 1]);
    }

    #[test]
    fn bounds_cover_every_district() {
        let districts = districts_with_density(vec![square("a", 0.0, 0.0), square("b", 3.0, 2.0)], &HashMap::new());
        let bounds = districts_bounds(&districts).unwrap();
        assert_eq!((bounds.min().x, bounds.min().y), (0.0, 0.0));
        assert_eq!((bounds.max().x, bounds.max().y), (4.0, 3.0));
        assert!(districts_bounds(&[]).is_none());
    }
}
