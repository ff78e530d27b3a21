mod gradient_descent;
mod langevin;
mod momentum;

pub use gradient_descent::GradientDescent;
pub use langevin::Langevin;
pub use momentum::Momentum;

use crate::error::{Result, TrainError};

/// Defines the strategy for updating model parameters based on calculated gradients.
pub trait Optimizer {
    /// Updates the provided slice of parameters using the given gradient.
    ///
    /// # Arguments
    /// * `grad` - A reference to the model's gradient.
    /// * `params` - The parameters to update.
    ///
    /// # Errors
    /// Returns an error if there's a mismatch in the sizes of `grad` and `params`.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()>;
}

fn check_len(grad: &[f32], params: &[f32]) -> Result<()> {
    if grad.len() != params.len() {
        return Err(TrainError::ShapeMismatch {
            what: "grad",
            got: grad.len(),
            expected: params.len(),
        });
    }

    Ok(())
}
