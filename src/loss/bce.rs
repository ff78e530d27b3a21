use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Mean binary cross-entropy loss function.
///
/// Predictions are clamped away from 0 and 1 so the logarithms stay finite.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bce;

const EPS: f32 = 1e-7;

impl Bce {
    /// Returns a new `Bce`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Bce {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        let total: f32 = y_pred
            .iter()
            .zip(y.iter())
            .map(|(&p, &y)| {
                let p = p.clamp(EPS, 1. - EPS);
                -(y * p.ln() + (1. - y) * (1. - p).ln())
            })
            .sum();

        total / y_pred.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        let n = y_pred.len() as f32;

        Array1::from_iter(y_pred.iter().zip(y.iter()).map(|(&p, &y)| {
            let p = p.clamp(EPS, 1. - EPS);
            (p - y) / (p * (1. - p)) / n
        }))
    }
}

#[cfg(test)]
mod test {
    use ndarray::arr1;

    use super::*;

    #[test]
    fn test_confident_correct_prediction_has_near_zero_loss() {
        let loss = Bce.loss(arr1(&[1., 0.]).view(), arr1(&[1., 0.]).view());
        assert!(loss >= 0.);
        assert!(loss < 1e-5, "got loss {loss}");
    }

    #[test]
    fn test_maximally_uncertain_prediction_costs_ln_two() {
        let loss = Bce.loss(arr1(&[0.5]).view(), arr1(&[1.]).view());
        assert!((loss - 2_f32.ln()).abs() < 1e-6, "got loss {loss}");
    }

    #[test]
    fn test_prime_points_away_from_the_target() {
        let y_pred = arr1(&[0.5, 0.5]);
        let y = arr1(&[1., 0.]);

        let d = Bce.loss_prime(y_pred.view(), y.view());
        // (p - y) / (p (1 - p)) / n = ±0.5 / 0.25 / 2 = ±1.
        assert_eq!(d, arr1(&[-1., 1.]));
    }

    #[test]
    fn test_loss_is_finite_at_saturated_predictions() {
        let loss = Bce.loss(arr1(&[0., 1.]).view(), arr1(&[1., 0.]).view());
        assert!(loss.is_finite());
        assert!(loss > 0.);
    }
}
