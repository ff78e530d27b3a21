use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::{check_len, Optimizer};
use crate::error::Result;

/// Stochastic-gradient Langevin dynamics.
///
/// Each update takes half a gradient-descent step and injects gaussian noise
/// scaled by the square root of the step size, so the parameter trajectory
/// keeps exploring around the mode instead of collapsing onto it.
#[derive(Debug)]
pub struct Langevin<R: Rng> {
    step_size: f32,
    rng: R,
}

impl<R: Rng> Langevin<R> {
    /// Creates a new `Langevin` optimizer.
    ///
    /// # Arguments
    /// * `step_size` - The step size ε of the update rule.
    /// * `rng` - The generator driving the injected noise.
    pub fn new(step_size: f32, rng: R) -> Self {
        Self { step_size, rng }
    }
}

impl Langevin<StdRng> {
    /// Creates a `Langevin` whose noise stream is seeded with `seed`, so two
    /// identically configured runs take identical steps.
    pub fn seeded(step_size: f32, seed: u64) -> Self {
        Self::new(step_size, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Optimizer for Langevin<R> {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_len(grad, params)?;

        let eps = self.step_size;
        let scale = eps.sqrt();
        let rng = &mut self.rng;

        params.iter_mut().zip(grad).for_each(|(p, g)| {
            let noise: f32 = rng.sample(StandardNormal);
            *p -= 0.5 * eps * g - scale * noise;
        });

        Ok(())
    }
}
