use super::{check_len, Optimizer};
use crate::error::Result;

/// Plain stochastic gradient descent.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length
    /// modulated by the learning rate.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_len(grad, params)?;

        let lr = self.learning_rate;
        params.iter_mut().zip(grad).for_each(|(p, g)| *p -= lr * g);

        Ok(())
    }
}
