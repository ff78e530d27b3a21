use ndarray::{Array1, ArrayView1, ArrayView2};

use super::Model;
use crate::error::{Result, TrainError};

/// A single dense layer followed by a sigmoid activation.
///
/// Parameters are laid out flat as `[w_0, .., w_{f-1}, b]`, so the model has
/// `features + 1` of them.
#[derive(Debug, Clone, Copy)]
pub struct Logistic {
    features: usize,
}

impl Logistic {
    /// Creates a new `Logistic` over `features` input features.
    pub fn new(features: usize) -> Self {
        Self { features }
    }

    fn sigmoid(z: f32) -> f32 {
        1. / (1. + (-z).exp())
    }

    fn check(&self, params: &[f32], x: ArrayView2<f32>) -> Result<()> {
        if params.len() != self.num_params() {
            return Err(TrainError::ShapeMismatch {
                what: "params",
                got: params.len(),
                expected: self.num_params(),
            });
        }

        if x.ncols() != self.features {
            return Err(TrainError::ShapeMismatch {
                what: "features",
                got: x.ncols(),
                expected: self.features,
            });
        }

        Ok(())
    }
}

impl Model for Logistic {
    fn num_params(&self) -> usize {
        self.features + 1
    }

    fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array1<f32>> {
        self.check(params, x)?;

        let (w, b) = params.split_at(self.features);
        let w = ArrayView1::from(w);
        let z = x.dot(&w) + b[0];

        Ok(z.mapv(Self::sigmoid))
    }

    fn backward(
        &self,
        params: &[f32],
        x: ArrayView2<f32>,
        error: ArrayView1<f32>,
        grads: &mut [f32],
    ) -> Result<()> {
        self.check(params, x)?;

        if grads.len() != params.len() {
            return Err(TrainError::ShapeMismatch {
                what: "grads",
                got: grads.len(),
                expected: params.len(),
            });
        }

        if error.len() != x.nrows() {
            return Err(TrainError::ShapeMismatch {
                what: "error signal",
                got: error.len(),
                expected: x.nrows(),
            });
        }

        // dL/dz = dL/da * a * (1 - a)
        let mut d = self.forward(params, x)?;
        d.zip_mut_with(&error, |a, &e| *a = e * *a * (1. - *a));

        let dw = x.t().dot(&d);
        let (gw, gb) = grads.split_at_mut(self.features);
        gw.iter_mut().zip(dw.iter()).for_each(|(g, dw)| *g += dw);
        gb[0] += d.sum();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use ndarray::{arr1, arr2};

    use super::*;

    #[test]
    fn test_forward_at_zero_logit_is_half() {
        let model = Logistic::new(2);
        let params = [0., 0., 0.];
        let x = arr2(&[[1., -1.], [3., 5.]]);

        let y_pred = model.forward(&params, x.view()).unwrap();
        assert_eq!(y_pred, arr1(&[0.5, 0.5]));
    }

    #[test]
    fn test_forward_applies_weights_and_bias() {
        let model = Logistic::new(2);
        let params = [1., 2., -1.];
        let x = arr2(&[[3., -1.]]);

        // z = 3*1 + (-1)*2 - 1 = 0
        let y_pred = model.forward(&params, x.view()).unwrap();
        assert_eq!(y_pred[0], 0.5);
    }

    #[test]
    fn test_backward_accumulates_analytic_gradient() {
        let model = Logistic::new(2);
        let params = [0., 0., 0.];
        let x = arr2(&[[1., 2.]]);

        // a = 0.5; with dL/da = -2 (BCE at y = 1), dL/dz = -2 * 0.25 = -0.5.
        let error = arr1(&[-2.]);
        let mut grads = vec![1., 1., 1.];
        model
            .backward(&params, x.view(), error.view(), &mut grads)
            .unwrap();

        assert_eq!(grads, vec![1. - 0.5, 1. - 1.0, 1. - 0.5], "must accumulate");
    }

    #[test]
    fn test_rejects_wrong_param_count() {
        let model = Logistic::new(2);
        let x = arr2(&[[1., 2.]]);

        let err = model.forward(&[0., 0.], x.view()).unwrap_err();
        assert!(matches!(
            err,
            TrainError::ShapeMismatch { what: "params", got: 2, expected: 3 }
        ));
    }
}
