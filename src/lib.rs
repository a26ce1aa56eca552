#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Worker Fan-in
//!
//! Run a fixed set of independent producers in parallel and feed their
//! results, in completion order, into a single sequential consumer.
//!
//! ## Overview
//!
//! Every producer runs as its own tokio task. Their outcomes are merged
//! through one channel sized to hold all of them, and a dedicated
//! consumption task hands each value to the consumer and each failure to the
//! error handler, one at a time. The run returns [`Statistics`] with
//! success/failure counts and per-producer produce, consume and block times.
//!
//! ## Module Organization
//!
//! - [`orchestration`] - Orchestrator, producers, error handlers
//! - [`statistics`] - Run statistics and their JSON report
//! - [`config`] - Run configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use worker_fanin::Producers;
//!
//! # async fn example() {
//! let stats = Producers::<u64, String>::new()
//!     .add(|| async {
//!         tokio::time::sleep(Duration::from_millis(50)).await;
//!         Ok(0)
//!     })
//!     .add(|| async { Ok(1) })
//!     .consume(|value| println!("consumed {value}"))
//!     .await;
//!
//! assert_eq!(stats.success, 2);
//! println!("{stats}");
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod orchestration;
pub mod statistics;

pub use config::{FailureLogLevel, FanInConfig};
pub use error::{FanInError, ProducerFailure, Result};
pub use logging::init_structured_logging;
pub use orchestration::{
    boxed, run, run_with_defaults, BoxProducer, ErrorHandler, LogErrorHandler, Orchestrator,
    Outcome, Producers,
};
pub use statistics::{Statistics, StatisticsReport};
