mod frames;
mod trajectory;

pub use frames::{Frame, Frames, Histogram};
pub use trajectory::{Snapshot, TrajectoryLog};

use std::num::NonZeroUsize;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    dataset::Dataset,
    error::{ConfigError, Result, TrainError},
    loss::LossFn,
    model::{init_params, Model},
    optimization::Optimizer,
};

/// Configuration for a recorded training run.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Number of full passes over the training split.
    pub epochs: usize,
    /// Mini-batch size for the training passes.
    pub batch_size: NonZeroUsize,
    /// Sliding-window size used when deriving frames.
    pub window: usize,
    /// Number of bins in each per-parameter histogram.
    pub bins: usize,
    /// Seed for parameter initialization. Identical seeds over identical
    /// data, optimizer and epoch count reproduce identical trajectories.
    pub seed: u64,
    /// Ordered labels of the tracked parameters, one per model parameter.
    pub param_labels: Vec<String>,
}

/// The training-trajectory recorder.
///
/// Runs a fixed number of epochs over a fixed train/test split with a
/// pluggable optimizer, snapshotting the flattened parameters and the
/// full-split losses after every epoch (plus once before training). The
/// resulting [`TrajectoryLog`] derives the frame sequence for animation.
pub struct Recorder<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    model: M,
    optimizer: O,
    loss_fn: L,
    train: Dataset,
    test: Dataset,
    config: RecorderConfig,
    grad: Vec<f32>,
}

impl<M, O, L> Recorder<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    /// Creates a new `Recorder`, validating the configuration before any
    /// epoch can run.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The update rule applied after each mini-batch.
    /// * `loss_fn` - The loss measured per batch and per snapshot.
    /// * `train` - The training split.
    /// * `test` - The test split.
    /// * `config` - The run configuration.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the epoch or bin count is zero, a split is
    /// empty, or the parameter labels don't match the model's parameter
    /// count.
    pub fn new(
        model: M,
        optimizer: O,
        loss_fn: L,
        train: Dataset,
        test: Dataset,
        config: RecorderConfig,
    ) -> Result<Self> {
        if config.epochs < 1 {
            return Err(ConfigError::NoEpochs.into());
        }

        if config.bins < 1 {
            return Err(ConfigError::NoBins.into());
        }

        if train.is_empty() {
            return Err(ConfigError::EmptySplit { which: "train" }.into());
        }

        if test.is_empty() {
            return Err(ConfigError::EmptySplit { which: "test" }.into());
        }

        let expected = model.num_params();
        if config.param_labels.len() != expected {
            return Err(ConfigError::ParamMismatch {
                got: config.param_labels.len(),
                expected,
            }
            .into());
        }

        Ok(Self {
            grad: vec![0.; expected],
            model,
            optimizer,
            loss_fn,
            train,
            test,
            config,
        })
    }

    /// Runs the full training loop and returns the recorded trajectory.
    ///
    /// The returned log holds exactly `epochs + 1` snapshots; entry 0 is the
    /// pre-training snapshot of the seeded initial parameters.
    ///
    /// # Errors
    /// Returns `TrainError::NonFiniteLoss` or `TrainError::NonFiniteGrad` if
    /// a step diverges. The run aborts immediately and the partial log is
    /// discarded.
    pub fn run(&mut self) -> Result<TrajectoryLog> {
        let epochs = self.config.epochs;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut params = init_params(self.model.num_params(), &mut rng);

        let mut log = TrajectoryLog::new(
            self.config.param_labels.clone(),
            self.config.window,
            self.config.bins,
            epochs,
        );

        info!(
            "starting run: epochs={epochs}, params={}, train={}, test={}",
            params.len(),
            self.train.len(),
            self.test.len(),
        );

        log.push(self.snapshot(0, &params)?);

        for epoch in 1..=epochs {
            self.train_epoch(epoch, &mut params)?;

            let snapshot = self.snapshot(epoch, &params)?;
            debug!(
                "epoch {epoch}: train_loss={}, test_loss={}",
                snapshot.train_loss, snapshot.test_loss,
            );
            log.push(snapshot);
        }

        info!("run complete: {} snapshots", log.len());
        Ok(log)
    }

    /// One fixed-order pass over the training split in mini-batches.
    fn train_epoch(&mut self, epoch: usize, params: &mut [f32]) -> Result<()> {
        let Self {
            model,
            optimizer,
            loss_fn,
            train,
            config,
            grad,
            ..
        } = self;

        for (x, y) in train.batches(config.batch_size) {
            grad.fill(0.);

            let y_pred = model.forward(params, x)?;
            if !loss_fn.loss(y_pred.view(), y).is_finite() {
                return Err(TrainError::NonFiniteLoss { epoch });
            }

            let d = loss_fn.loss_prime(y_pred.view(), y);
            model.backward(params, x, d.view(), grad)?;
            if grad.iter().any(|g| !g.is_finite()) {
                return Err(TrainError::NonFiniteGrad { epoch });
            }

            optimizer.update_params(grad, params)?;
        }

        Ok(())
    }

    fn snapshot(&self, epoch: usize, params: &[f32]) -> Result<Snapshot> {
        let train_loss = self.split_loss(epoch, &self.train, params)?;
        let test_loss = self.split_loss(epoch, &self.test, params)?;

        Ok(Snapshot::new(params.to_vec(), train_loss, test_loss))
    }

    fn split_loss(&self, epoch: usize, split: &Dataset, params: &[f32]) -> Result<f32> {
        let y_pred = self.model.forward(params, split.x())?;
        let loss = self.loss_fn.loss(y_pred.view(), split.y());

        if !loss.is_finite() {
            return Err(TrainError::NonFiniteLoss { epoch });
        }

        Ok(loss)
    }
}
