mod bce;

pub use bce::Bce;

use ndarray::{Array1, ArrayView1};

/// A differentiable loss over a batch of predictions.
pub trait LossFn {
    /// The mean loss of `y_pred` against the targets `y`.
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32;

    /// The derivative of [`LossFn::loss`] with respect to each prediction.
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32>;
}
