use crate::constants::env_vars;
use crate::error::{FanInError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Level at which the default error handler logs producer failures.
///
/// Deserialization goes through [`FromStr`], so every loader accepts the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum FailureLogLevel {
    #[default]
    Warn,
    Error,
}

impl FromStr for FailureLogLevel {
    type Err = FanInError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Ok(FailureLogLevel::Warn),
            "error" => Ok(FailureLogLevel::Error),
            other => Err(FanInError::ConfigurationError(format!(
                "Invalid failure_log_level: {other} (expected warn or error)"
            ))),
        }
    }
}

impl TryFrom<String> for FailureLogLevel {
    type Error = FanInError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FailureLogLevel> for String {
    fn from(level: FailureLogLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for FailureLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureLogLevel::Warn => write!(f, "warn"),
            FailureLogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanInConfig {
    /// Label attached to the run's tracing span and summary event
    pub run_name: String,
    pub failure_log_level: FailureLogLevel,
    /// Emit a debug event for every handed-off and consumed item
    pub trace_items: bool,
}

impl Default for FanInConfig {
    fn default() -> Self {
        Self {
            run_name: "fan-in".to_string(),
            failure_log_level: FailureLogLevel::Warn,
            trace_items: false,
        }
    }
}

impl FanInConfig {
    pub fn with_run_name(mut self, run_name: impl Into<String>) -> Self {
        self.run_name = run_name.into();
        self
    }

    pub fn with_failure_log_level(mut self, level: FailureLogLevel) -> Self {
        self.failure_log_level = level;
        self
    }

    pub fn with_trace_items(mut self, trace_items: bool) -> Self {
        self.trace_items = trace_items;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup` (keyed by environment variable name) on the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(run_name) = lookup(env_vars::RUN_NAME) {
            config.run_name = run_name;
        }

        if let Some(level) = lookup(env_vars::FAILURE_LOG_LEVEL) {
            config.failure_log_level = level.parse()?;
        }

        if let Some(trace_items) = lookup(env_vars::TRACE_ITEMS) {
            config.trace_items = trace_items.trim().parse().map_err(|e| {
                FanInError::ConfigurationError(format!("Invalid trace_items: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Layered load: defaults, then the optional TOML file, then `FANIN_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("run_name", defaults.run_name)?
            .set_default("failure_log_level", defaults.failure_log_level.to_string())?
            .set_default("trace_items", defaults.trace_items)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(env_vars::PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.run_name.trim().is_empty() {
            return Err(FanInError::InvalidConfiguration(
                "run_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
