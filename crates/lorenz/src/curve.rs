use crate::{error::LorenzError, integrate::trapezoid, region::Region};

/// A point on the Lorenz curve: the poorest `population_share` of people hold
/// `resource_share` of the resource.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub population_share: f64,
    pub resource_share: f64,
}

impl CurvePoint {
    pub const ORIGIN: Self = Self { population_share: 0.0, resource_share: 0.0 };
}

/// A region in ranked order, with the cumulative shares reached after it.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRegion {
    pub region: Region,
    pub ratio: f64,
    pub cumulative: CurvePoint,
}

/// Result of a Lorenz/Gini computation.
#[derive(Clone, Debug, PartialEq)]
pub struct Lorenz {
    /// Regions sorted ascending by resource per head.
    pub ranked: Vec<RankedRegion>,
    /// `(0, 0)` followed by one point per ranked region.
    pub curve: Vec<CurvePoint>,
    /// Area under `curve`.
    pub area: f64,
    pub gini: f64,
}

/// Rank `regions` by resource per head and build the Lorenz curve and Gini
/// coefficient over them.
///
/// Ties in the per-capita ratio keep their input order. Fails without a
/// partial result if the input is empty, any population is zero, or the
/// regions hold no resources at all.
pub fn compute_lorenz_gini(regions: &[Region]) -> Result<Lorenz, LorenzError> {
    if regions.is_empty() { return Err(LorenzError::EmptyDataset) }

    if let Some(region) = regions.iter().find(|r| r.population == 0) {
        return Err(LorenzError::InvalidInput(format!("region {:?} has zero population", region.id)));
    }

    let total_population: u128 = regions.iter().map(|r| r.population as u128).sum();
    let total_resources: u128 = regions.iter().map(|r| r.resource_count as u128).sum();
    if total_resources == 0 {
        return Err(LorenzError::InvalidInput("total resource count is zero".into()));
    }

    let mut ordered = regions.iter()
        .map(|region| (region, region.ratio()))
        .collect::<Vec<_>>();
    // `sort_by` is stable, so equal ratios keep their input order.
    ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranked = Vec::with_capacity(ordered.len());
    let mut curve = Vec::with_capacity(ordered.len() + 1);
    curve.push(CurvePoint::ORIGIN);

    let (mut running_population, mut running_resources) = (0u128, 0u128);
    for (region, ratio) in ordered {
        running_population += region.population as u128;
        running_resources += region.resource_count as u128;

        let point = CurvePoint {
            population_share: running_population as f64 / total_population as f64,
            resource_share: running_resources as f64 / total_resources as f64,
        };
        curve.push(point);
        ranked.push(RankedRegion { region: region.clone(), ratio, cumulative: point });
    }

    let xs = curve.iter().map(|p| p.population_share).collect::<Vec<_>>();
    let ys = curve.iter().map(|p| p.resource_share).collect::<Vec<_>>();
    let area = trapezoid(&xs, &ys);

    Ok(Lorenz { ranked, curve, area, gini: (0.5 - area) / 0.5 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Region> {
        vec![
            Region::new("north", 100, 10),
            Region::new("east", 50, 10),
            Region::new("south", 50, 80),
        ]
    }

    #[test]
    fn sample_curve_matches_hand_computation() {
        let lorenz = compute_lorenz_gini(&sample()).unwrap();

        let xs = lorenz.curve.iter().map(|p| p.population_share).collect::<Vec<_>>();
        let ys = lorenz.curve.iter().map(|p| p.resource_share).collect::<Vec<_>>();
        for (got, want) in xs.iter().zip([0.0, 0.5, 0.75, 1.0]) { assert!((got - want).abs() < 1e-12) }
        for (got, want) in ys.iter().zip([0.0, 0.1, 0.2, 1.0]) { assert!((got - want).abs() < 1e-12) }

        assert!((lorenz.area - 0.2125).abs() < 1e-9);
        assert!((lorenz.gini - 0.575).abs() < 1e-6);
    }

    #[test]
    fn ranked_order_follows_ratio() {
        let shuffled = vec![
            Region::new("south", 50, 80),
            Region::new("north", 100, 10),
            Region::new("east", 50, 10),
        ];
        let lorenz = compute_lorenz_gini(&shuffled).unwrap();
        let ids = lorenz.ranked.iter().map(|r| r.region.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["north", "east", "south"]);
        assert_eq!(lorenz.ranked[2].ratio, 1.6);
    }

    #[test]
    fn ties_keep_input_order() {
        let regions = vec![
            Region::new("b", 10, 1),
            Region::new("a", 20, 2),
            Region::new("c", 5, 0),
            Region::new("d", 30, 3),
        ];
        let lorenz = compute_lorenz_gini(&regions).unwrap();
        let ids = lorenz.ranked.iter().map(|r| r.region.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["c", "b", "a", "d"]);
    }

    #[test]
    fn ranked_cumulative_matches_curve_tail() {
        let lorenz = compute_lorenz_gini(&sample()).unwrap();
        assert_eq!(lorenz.curve.len(), lorenz.ranked.len() + 1);
        for (ranked, point) in lorenz.ranked.iter().zip(&lorenz.curve[1..]) {
            assert_eq!(ranked.cumulative, *point);
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(compute_lorenz_gini(&[]), Err(LorenzError::EmptyDataset));
    }

    #[test]
    fn zero_population_is_rejected() {
        let regions = vec![Region::new("a", 10, 1), Region::new("ghost", 0, 3)];
        match compute_lorenz_gini(&regions) {
            Err(LorenzError::InvalidInput(msg)) => assert!(msg.contains("ghost")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn zero_total_resources_are_rejected() {
        let regions = vec![Region::new("a", 10, 0), Region::new("b", 20, 0)];
        assert!(matches!(compute_lorenz_gini(&regions), Err(LorenzError::InvalidInput(_))));
    }

    #[test]
    fn single_region_is_perfectly_equal() {
        let lorenz = compute_lorenz_gini(&[Region::new("only", 1234, 56)]).unwrap();
        assert_eq!(lorenz.curve, vec![CurvePoint::ORIGIN, CurvePoint { population_share: 1.0, resource_share: 1.0 }]);
        assert!(lorenz.gini.abs() < 1e-12);
    }
}
