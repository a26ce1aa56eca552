//! Error types for the fan-in orchestrator.
//!
//! A run itself never fails. Producer failures are per-item values handed to
//! the error handler as [`ProducerFailure`]; [`FanInError`] only covers the
//! fallible setup around a run, such as configuration loading.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FanInError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<config::ConfigError> for FanInError {
    fn from(error: config::ConfigError) -> Self {
        FanInError::ConfigurationError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FanInError>;

/// Failure of a single producer, delivered to the run's error handler.
///
/// `index` is the producer's position in the submitted sequence.
#[derive(Debug, Error)]
pub enum ProducerFailure<E> {
    #[error("producer #{index} failed: {error}")]
    Failed { index: usize, error: E },
    #[error("producer #{index} panicked: {message}")]
    Panicked { index: usize, message: String },
}

impl<E> ProducerFailure<E> {
    pub fn index(&self) -> usize {
        match self {
            ProducerFailure::Failed { index, .. } | ProducerFailure::Panicked { index, .. } => {
                *index
            }
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, ProducerFailure::Panicked { .. })
    }

    /// The producer's own error, if it returned one rather than panicking.
    pub fn into_error(self) -> Option<E> {
        match self {
            ProducerFailure::Failed { error, .. } => Some(error),
            ProducerFailure::Panicked { .. } => None,
        }
    }

    pub(crate) fn from_panic(index: usize, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ProducerFailure::Panicked { index, message }
    }
}
