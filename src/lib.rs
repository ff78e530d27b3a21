pub mod dataset;
pub mod error;
pub mod loss;
pub mod model;
pub mod optimization;
pub mod recorder;

pub use dataset::Dataset;
pub use error::{ConfigError, Result, TrainError};
pub use loss::{Bce, LossFn};
pub use model::{Logistic, Model};
pub use optimization::{GradientDescent, Langevin, Momentum, Optimizer};
pub use recorder::{Frame, Frames, Histogram, Recorder, RecorderConfig, Snapshot, TrajectoryLog};
