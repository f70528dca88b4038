/// Area under the piecewise-linear curve through `(xs[i], ys[i])`.
///
/// Segment widths are `xs[i + 1] - xs[i]`, so the abscissae need not be
/// evenly spaced. Fewer than two points enclose no area.
///
/// # Panics
///
/// Panics if `xs` and `ys` differ in length.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    assert_eq!(xs.len(), ys.len(),
        "[trapezoid] length mismatch: {} x-values for {} y-values",
        xs.len(),
        ys.len(),
    );

    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_encloses_half() {
        let xs = [0.0, 0.25, 0.5, 1.0];
        assert!((trapezoid(&xs, &xs) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn uneven_widths_are_respected() {
        // 0.5 * (0 + 0.1) / 2 + 0.25 * (0.1 + 0.2) / 2 + 0.25 * (0.2 + 1.0) / 2
        let area = trapezoid(&[0.0, 0.5, 0.75, 1.0], &[0.0, 0.1, 0.2, 1.0]);
        assert!((area - 0.2125).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_have_no_area() {
        assert_eq!(trapezoid(&[], &[]), 0.0);
        assert_eq!(trapezoid(&[0.3], &[0.7]), 0.0);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn mismatched_lengths_panic() {
        trapezoid(&[0.0, 1.0], &[0.0]);
    }
}
