//! Property-based tests for the Lorenz curve: ordering, monotonicity and the
//! bounds of the Gini coefficient over arbitrary region tables.

use lorenz::{compute_lorenz_gini, Region};
use proptest::prelude::*;

fn regions() -> impl Strategy<Value = Vec<Region>> {
    prop::collection::vec((1u64..1_000_000, 0u64..10_000), 1..40)
        .prop_filter("at least one resource", |rows| rows.iter().any(|&(_, r)| r > 0))
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (population, resources))| Region::new(format!("r{i}"), population, resources))
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_ranked_ratios_are_non_decreasing(regions in regions()) {
        let lorenz = compute_lorenz_gini(&regions).unwrap();
        for pair in lorenz.ranked.windows(2) {
            prop_assert!(pair[0].ratio <= pair[1].ratio);
        }
    }

    #[test]
    fn prop_curve_is_monotone_and_ends_at_one(regions in regions()) {
        let lorenz = compute_lorenz_gini(&regions).unwrap();
        prop_assert_eq!(lorenz.curve[0].population_share, 0.0);
        prop_assert_eq!(lorenz.curve[0].resource_share, 0.0);
        for pair in lorenz.curve.windows(2) {
            prop_assert!(pair[0].population_share <= pair[1].population_share);
            prop_assert!(pair[0].resource_share <= pair[1].resource_share);
        }
        let last = lorenz.curve.last().unwrap();
        prop_assert!((last.population_share - 1.0).abs() < 1e-9);
        prop_assert!((last.resource_share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_curve_stays_below_diagonal(regions in regions()) {
        let lorenz = compute_lorenz_gini(&regions).unwrap();
        for point in &lorenz.curve {
            prop_assert!(point.resource_share <= point.population_share + 1e-9);
        }
    }

    #[test]
    fn prop_gini_is_within_unit_interval(regions in regions()) {
        let gini = compute_lorenz_gini(&regions).unwrap().gini;
        prop_assert!(gini >= -1e-9 && gini < 1.0);
    }

    #[test]
    fn prop_input_order_does_not_change_gini(regions in regions()) {
        let mut reversed = regions.clone();
        reversed.reverse();
        let a = compute_lorenz_gini(&regions).unwrap().gini;
        let b = compute_lorenz_gini(&reversed).unwrap().gini;
        prop_assert!((a - b).abs() < 1e-9);
    }
}
