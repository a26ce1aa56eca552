//! # Structured Logging Module
//!
//! Environment-aware structured logging for fan-in runs. Console output is
//! human-readable by default and switches to JSON lines when
//! `FANIN_LOG_FORMAT=json`.

use crate::constants::{env_vars, targets};
use crate::statistics::Statistics;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let json = std::env::var(env_vars::LOG_FORMAT)
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let console = if json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .json()
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .boxed()
        };

        // A global subscriber may already be installed by the host application
        if tracing_subscriber::registry()
            .with(console.with_filter(filter))
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized, keeping it");
        }

        tracing::info!(
            environment = %environment,
            json = json,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

fn get_environment() -> String {
    std::env::var(env_vars::ENVIRONMENT)
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log the outcome of one completed run
pub fn log_run_summary(run_name: &str, stats: &Statistics) {
    tracing::info!(
        target: targets::ORCHESTRATOR,
        run_name = %run_name,
        producers = stats.total(),
        success = stats.success,
        failure = stats.failure,
        total_time_ms = stats.total_time.as_secs_f64() * 1000.0,
        total_produce_ms = stats.total_produce.as_secs_f64() * 1000.0,
        total_consume_ms = stats.total_consume.as_secs_f64() * 1000.0,
        "📊 FANIN: Run completed"
    );
}
