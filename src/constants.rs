//! # System Constants
//!
//! Environment variable names and tracing targets shared across the crate.

/// Environment variables read by configuration and logging setup
pub mod env_vars {
    pub const PREFIX: &str = "FANIN";
    pub const RUN_NAME: &str = "FANIN_RUN_NAME";
    pub const FAILURE_LOG_LEVEL: &str = "FANIN_FAILURE_LOG_LEVEL";
    pub const TRACE_ITEMS: &str = "FANIN_TRACE_ITEMS";
    pub const ENVIRONMENT: &str = "FANIN_ENV";
    pub const LOG_FORMAT: &str = "FANIN_LOG_FORMAT";
}

/// Tracing targets, so subscribers can filter orchestrator output
pub mod targets {
    pub const ORCHESTRATOR: &str = "worker_fanin::orchestrator";
    pub const PRODUCER_FAILURE: &str = "worker_fanin::producer_failure";
}
