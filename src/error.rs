use std::fmt;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, TrainError>;

/// Errors detected while validating a run's configuration, before any epoch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The run was configured with zero epochs.
    NoEpochs,

    /// The run was configured with zero histogram bins.
    NoBins,

    /// A dataset split has no samples.
    EmptySplit { which: &'static str },

    /// The declared parameter labels do not match the model's parameter count.
    ParamMismatch { got: usize, expected: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoEpochs => write!(f, "the run needs at least one epoch"),
            ConfigError::NoBins => write!(f, "histograms need at least one bin"),
            ConfigError::EmptySplit { which } => {
                write!(f, "the {which} split has no samples")
            }
            ConfigError::ParamMismatch { got, expected } => {
                write!(
                    f,
                    "got {got} parameter labels but the model has {expected} parameters"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors produced during a training run. All of them are fatal: the run
/// aborts and no partial trajectory escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainError {
    /// The run was misconfigured.
    Config(ConfigError),

    /// A shape invariant was violated (e.g. mismatched lengths).
    ShapeMismatch {
        /// Human-readable context for the mismatch (e.g. "params", "grad").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },

    /// The loss stopped being a real number.
    NonFiniteLoss { epoch: usize },

    /// A gradient component stopped being a real number.
    NonFiniteGrad { epoch: usize },
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::Config(e) => write!(f, "invalid configuration: {e}"),
            TrainError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            TrainError::NonFiniteLoss { epoch } => {
                write!(f, "loss became non-finite at epoch {epoch}")
            }
            TrainError::NonFiniteGrad { epoch } => {
                write!(f, "gradient became non-finite at epoch {epoch}")
            }
        }
    }
}

impl std::error::Error for TrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for TrainError {
    fn from(e: ConfigError) -> Self {
        TrainError::Config(e)
    }
}
