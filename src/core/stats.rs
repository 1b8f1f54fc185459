//! Weighted summary statistics of one binned series.
//!
//! Every bin is represented by its midpoint and weighted by its count.  A
//! series whose counts sum to zero has no mean and no spread: both are NaN.

/// Midpoint of every bin.
#[must_use]
pub fn bin_centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

/// Total, weighted mean and weighted standard deviation of one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub mean: f64,
    pub std: f64,
}

impl Summary {
    #[must_use]
    pub fn of(centers: &[f64], counts: &[f64]) -> Self {
        let total: f64 = counts.iter().sum();
        if total.abs() < f64::MIN_POSITIVE {
            return Self {
                total,
                mean: f64::NAN,
                std: f64::NAN,
            };
        }
        let mean = centers
            .iter()
            .zip(counts)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            / total;
        let var = centers
            .iter()
            .zip(counts)
            .map(|(x, w)| (x - mean).powi(2) * w)
            .sum::<f64>()
            / total;
        Self {
            total,
            mean,
            std: var.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_are_midpoints() {
        assert_eq!(bin_centers(&[0.0, 1.0, 3.0]), vec![0.5, 2.0]);
    }

    #[test]
    fn symmetric_weights_center_the_mean() {
        let s = Summary::of(&[0.5, 1.5, 2.5], &[1.0, 2.0, 1.0]);
        assert!((s.total - 4.0).abs() < 1e-12);
        assert!((s.mean - 1.5).abs() < 1e-12);
        assert!((s.std - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_series_has_no_moments() {
        let s = Summary::of(&[0.5, 1.5], &[0.0, 0.0]);
        assert!(s.total.abs() < f64::EPSILON);
        assert!(s.mean.is_nan());
        assert!(s.std.is_nan());
    }
}
