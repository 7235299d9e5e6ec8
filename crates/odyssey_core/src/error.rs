//! Error types for ODYSSEY walks.

use std::error::Error as StdError;

/// Error raised by a step's execution logic.
///
/// Steps usually fail because an assertion against the system under test
/// did not hold, so any error type is accepted and carried unchanged.
pub type StepError = Box<dyn StdError + Send + Sync + 'static>;

/// Outcome of a single step execution
pub type StepResult = Result<(), StepError>;

/// Walk result type
pub type WalkResult<T> = Result<T, WalkError>;

/// Walk error type
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A step with this name is already registered
    #[error("There is already a step called {name}")]
    DuplicateStep {
        /// Name that was registered twice
        name: String,
    },

    /// Every registered step rejected the current state
    #[error("No possible steps found ({registered} registered, none applicable)")]
    NoApplicableStep {
        /// Number of registered steps at selection time
        registered: usize,
    },

    /// No registered step carries this name
    #[error("No step with name '{name}' found")]
    UnknownStep {
        /// Name that was looked up
        name: String,
    },

    /// A step's execution logic returned an error
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        /// Name of the failing step
        step: String,
        /// Error returned by the step, unchanged
        #[source]
        source: StepError,
    },

    /// A serialized walk record could not be decoded
    #[error("Invalid walk record: {reason}")]
    InvalidRecord {
        /// Decoder message
        reason: String,
    },
}

impl WalkError {
    /// Wrap a step failure
    #[must_use]
    pub fn step_failed(step: impl Into<String>, source: StepError) -> Self {
        Self::StepFailed {
            step: step.into(),
            source,
        }
    }

    /// Name of the step this error concerns, if any
    #[must_use]
    pub fn step_name(&self) -> Option<&str> {
        match self {
            Self::DuplicateStep { name } | Self::UnknownStep { name } => Some(name),
            Self::StepFailed { step, .. } => Some(step),
            Self::NoApplicableStep { .. } | Self::InvalidRecord { .. } => None,
        }
    }

    /// Take the error returned by a failing step, if this is a step failure
    #[must_use]
    pub fn into_step_error(self) -> Option<StepError> {
        match self {
            Self::StepFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WalkError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRecord {
            reason: err.to_string(),
        }
    }
}
