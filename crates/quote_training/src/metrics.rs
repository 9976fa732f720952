//! Regression metrics reported after training and evaluation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean absolute error, minutes.
    pub mae: f64,
    /// Root mean squared error, minutes.
    pub rmse: f64,
    /// Coefficient of determination.
    pub r2: f64,
    /// Mean absolute percentage error, percent. Rows with a zero target are skipped.
    pub mape: f64,
    pub samples: usize,
}

impl RegressionMetrics {
    /// Compare predictions against actual values. Returns `None` when the
    /// slices are empty or differ in length.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        if actual.is_empty() || actual.len() != predicted.len() {
            return None;
        }
        let n = actual.len() as f64;
        let mean_actual = actual.iter().sum::<f64>() / n;

        let mut abs_err = 0.0;
        let mut sq_err = 0.0;
        let mut total_var = 0.0;
        let mut pct_err = 0.0;
        let mut pct_rows = 0usize;
        for (&a, &p) in actual.iter().zip(predicted) {
            let err = a - p;
            abs_err += err.abs();
            sq_err += err * err;
            total_var += (a - mean_actual).powi(2);
            if a != 0.0 {
                pct_err += (err / a).abs();
                pct_rows += 1;
            }
        }

        let r2 = if total_var > 0.0 {
            1.0 - sq_err / total_var
        } else if sq_err == 0.0 {
            1.0
        } else {
            0.0
        };
        Some(Self {
            mae: abs_err / n,
            rmse: (sq_err / n).sqrt(),
            r2,
            mape: if pct_rows > 0 {
                pct_err / pct_rows as f64 * 100.0
            } else {
                0.0
            },
            samples: actual.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions() {
        let y = [3.0, 5.5, 9.0, 12.25];
        let m = RegressionMetrics::compute(&y, &y).expect("metrics");
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.r2, 1.0);
        assert_eq!(m.mape, 0.0);
    }

    #[test]
    fn known_errors() {
        let actual = [2.0, 4.0, 6.0, 8.0];
        let predicted = [3.0, 3.0, 7.0, 7.0];
        let m = RegressionMetrics::compute(&actual, &predicted).expect("metrics");
        assert!((m.mae - 1.0).abs() < 1e-12);
        assert!((m.rmse - 1.0).abs() < 1e-12);
        // total variance 20, squared error 4
        assert!((m.r2 - 0.8).abs() < 1e-12);
        // (0.5 + 0.25 + 1/6 + 0.125) / 4 * 100
        assert!((m.mape - 26.041_666_666_666_668).abs() < 1e-9);
    }

    #[test]
    fn mismatched_inputs() {
        assert!(RegressionMetrics::compute(&[], &[]).is_none());
        assert!(RegressionMetrics::compute(&[1.0], &[1.0, 2.0]).is_none());
    }
}
