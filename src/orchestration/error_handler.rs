//! # Error Handlers
//!
//! Receivers for producer failures. The orchestrator calls the handler from
//! its single consumption loop, so implementations never see concurrent calls.

use crate::config::{FailureLogLevel, FanInConfig};
use crate::constants::targets;
use crate::error::ProducerFailure;
use std::fmt;

pub trait ErrorHandler<E>: Send {
    fn handle(&mut self, failure: ProducerFailure<E>);
}

impl<E, F> ErrorHandler<E> for F
where
    F: FnMut(ProducerFailure<E>) + Send,
{
    fn handle(&mut self, failure: ProducerFailure<E>) {
        self(failure)
    }
}

/// Default handler: logs each failure through `tracing` instead of dropping it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogErrorHandler {
    run_name: String,
    level: FailureLogLevel,
}

impl LogErrorHandler {
    pub fn new(run_name: impl Into<String>, level: FailureLogLevel) -> Self {
        Self {
            run_name: run_name.into(),
            level,
        }
    }

    pub fn from_config(config: &FanInConfig) -> Self {
        Self::new(config.run_name.clone(), config.failure_log_level)
    }

    pub fn level(&self) -> FailureLogLevel {
        self.level
    }
}

impl Default for LogErrorHandler {
    fn default() -> Self {
        Self::from_config(&FanInConfig::default())
    }
}

impl<E> ErrorHandler<E> for LogErrorHandler
where
    E: fmt::Display,
{
    fn handle(&mut self, failure: ProducerFailure<E>) {
        let index = failure.index();
        let panicked = failure.is_panic();
        match self.level {
            FailureLogLevel::Warn => tracing::warn!(
                target: targets::PRODUCER_FAILURE,
                run_name = %self.run_name,
                producer_index = index,
                panicked = panicked,
                error = %failure,
                "⚠️ FANIN: Producer failed"
            ),
            FailureLogLevel::Error => tracing::error!(
                target: targets::PRODUCER_FAILURE,
                run_name = %self.run_name,
                producer_index = index,
                panicked = panicked,
                error = %failure,
                "❌ FANIN: Producer failed"
            ),
        }
    }
}
