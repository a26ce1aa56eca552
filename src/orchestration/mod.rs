//! # Orchestration Engine
//!
//! Fan-out/fan-in execution of independent producers into one sequential consumer.
//!
//! ## Core Components
//!
//! - **Orchestrator**: launches producers, merges outcomes, drives the consumption loop
//! - **Producers**: ordered producer collection with `consume` / `consume_all` shortcuts
//! - **ErrorHandler**: receiver for producer failures, with `LogErrorHandler` as the default
//! - **Outcome**: a producer's tagged result in transit to the consumer

pub mod error_handler;
pub mod orchestrator;
pub mod outcome;
pub mod producer;

pub use error_handler::{ErrorHandler, LogErrorHandler};
pub use orchestrator::{run, run_with_defaults, Orchestrator};
pub use outcome::Outcome;
pub use producer::{boxed, BoxProducer, Producers};
