//! # Fan-in Orchestrator
//!
//! Runs every producer as its own tokio task and funnels their outcomes
//! through one mpsc channel into a single consumption task.
//!
//! ## Handoff
//!
//! The channel is sized to the number of producers, so a finished producer
//! hands off without waiting on the consumer and its produce time is never
//! inflated by consumer backpressure. Outcomes are consumed in arrival order.
//!
//! ## Serialization
//!
//! `consume` and the error handler are owned by the consumption task and
//! called from its loop only, so they are never invoked concurrently.
//!
//! ## Panics
//!
//! A panicking producer is reported as [`ProducerFailure::Panicked`]. A panic
//! in `consume` or the error handler is resumed on the caller.
//!
//! Must be called from within a tokio runtime.

use crate::config::FanInConfig;
use crate::constants::targets;
use crate::error::ProducerFailure;
use crate::logging::log_run_summary;
use crate::orchestration::error_handler::{ErrorHandler, LogErrorHandler};
use crate::orchestration::outcome::Outcome;
use crate::statistics::Statistics;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info_span, Instrument};

#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    config: FanInConfig,
}

impl Orchestrator {
    pub fn new(config: FanInConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FanInConfig {
        &self.config
    }

    /// The handler `run_with_defaults` uses
    pub fn default_error_handler(&self) -> LogErrorHandler {
        LogErrorHandler::from_config(&self.config)
    }

    /// Run with failures logged by [`LogErrorHandler`]
    pub async fn run_with_defaults<I, P, Fut, T, E, C>(
        &self,
        producers: I,
        consume: C,
    ) -> Statistics
    where
        I: IntoIterator<Item = P>,
        P: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: fmt::Display + Send + 'static,
        C: FnMut(T) + Send + 'static,
    {
        self.run(producers, consume, self.default_error_handler()).await
    }

    /// Run all producers concurrently, feeding each value to `consume` and each
    /// failure to `on_error` in completion order.
    ///
    /// Returns once every outcome has been consumed.
    ///
    /// `success + failure` equals the producer count unless the runtime shuts
    /// down mid-run. If the consumption task is cancelled the returned
    /// statistics are sized for every producer but carry zero counts; if
    /// producer tasks are dropped they carry the partial counts consumed so
    /// far. Both cases emit an error event with the expected count.
    pub async fn run<I, P, Fut, T, E, C, H>(
        &self,
        producers: I,
        consume: C,
        on_error: H,
    ) -> Statistics
    where
        I: IntoIterator<Item = P>,
        P: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
        C: FnMut(T) + Send + 'static,
        H: ErrorHandler<E> + 'static,
    {
        let producers: Vec<P> = producers.into_iter().collect();
        let count = producers.len();
        let span = info_span!(
            target: targets::ORCHESTRATOR,
            "fan_in_run",
            run_name = %self.config.run_name,
            producers = count
        );

        async move {
            let start = Instant::now();
            debug!(
                target: targets::ORCHESTRATOR,
                producers = count,
                "🚀 FANIN: Launching producers"
            );

            let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome<T, E>>(count.max(1));

            for (index, producer) in producers.into_iter().enumerate() {
                spawn_producer(
                    index,
                    producer,
                    start,
                    outcome_tx.clone(),
                    self.config.trace_items,
                );
            }
            // The channel closes once every producer task has handed off
            drop(outcome_tx);

            let consumer = tokio::spawn(
                consume_outcomes(count, outcome_rx, consume, on_error, self.config.trace_items)
                    .in_current_span(),
            );

            let mut stats = match consumer.await {
                Ok(stats) => stats,
                Err(join_error) if join_error.is_panic() => {
                    std::panic::resume_unwind(join_error.into_panic())
                }
                Err(join_error) => {
                    error!(
                        target: targets::ORCHESTRATOR,
                        error = %join_error,
                        expected = count,
                        "❌ FANIN: Consumption task cancelled, returning empty statistics"
                    );
                    Statistics::new(count)
                }
            };

            stats.total_time = start.elapsed();
            log_run_summary(&self.config.run_name, &stats);
            stats
        }
        .instrument(span)
        .await
    }
}

fn spawn_producer<P, Fut, T, E>(
    index: usize,
    producer: P,
    run_start: Instant,
    outcome_tx: mpsc::Sender<Outcome<T, E>>,
    trace_items: bool,
) where
    P: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let launched = Instant::now();
    tokio::spawn(
        async move {
            let result = match AssertUnwindSafe(async move { producer().await })
                .catch_unwind()
                .await
            {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(error)) => Err(ProducerFailure::Failed { index, error }),
                Err(payload) => Err(ProducerFailure::from_panic(index, payload)),
            };

            let outcome = Outcome {
                index,
                produce_time: launched.elapsed(),
                produced_at: run_start.elapsed(),
                result,
            };

            if trace_items {
                debug!(
                    target: targets::ORCHESTRATOR,
                    producer_index = index,
                    success = outcome.is_success(),
                    produce_time_us = outcome.produce_time.as_secs_f64() * 1_000_000.0,
                    "📤 FANIN: Producer handed off"
                );
            }

            // Capacity covers every producer, so this only fails if the consumer is gone
            if let Err(e) = outcome_tx.try_send(outcome) {
                debug!(
                    target: targets::ORCHESTRATOR,
                    producer_index = index,
                    error = %e,
                    "Outcome dropped, consumption task no longer running"
                );
            }
        }
        .in_current_span(),
    );
}

async fn consume_outcomes<T, E, C, H>(
    count: usize,
    mut outcome_rx: mpsc::Receiver<Outcome<T, E>>,
    mut consume: C,
    mut on_error: H,
    trace_items: bool,
) -> Statistics
where
    C: FnMut(T),
    H: ErrorHandler<E>,
{
    let mut stats = Statistics::new(count);
    let consume_start = Instant::now();

    for position in 0..count {
        let wait_from = Instant::now();
        let Some(outcome) = outcome_rx.recv().await else {
            error!(
                target: targets::ORCHESTRATOR,
                consumed = position,
                expected = count,
                "❌ FANIN: Outcome channel closed early"
            );
            break;
        };
        let block_time = wait_from.elapsed();

        let Outcome {
            index,
            produce_time,
            produced_at,
            result,
        } = outcome;

        let from = Instant::now();
        let success = result.is_ok();
        match result {
            Ok(value) => {
                stats.record_success();
                consume(value);
            }
            Err(failure) => {
                stats.record_failure();
                on_error.handle(failure);
            }
        }
        let consume_time = from.elapsed();

        stats.produce_times[index] = produce_time;
        stats.block_times[index] = block_time;
        stats.consume_times[index] = consume_time;
        stats.total_produce = stats.total_produce.max(produced_at);

        if trace_items {
            debug!(
                target: targets::ORCHESTRATOR,
                position = position,
                producer_index = index,
                success = success,
                block_time_us = block_time.as_secs_f64() * 1_000_000.0,
                consume_time_us = consume_time.as_secs_f64() * 1_000_000.0,
                "📥 FANIN: Outcome consumed"
            );
        }
    }

    stats.total_consume = consume_start.elapsed();
    stats
}

/// [`Orchestrator::run`] with the default configuration
pub async fn run<I, P, Fut, T, E, C, H>(
    producers: I,
    consume: C,
    on_error: H,
) -> Statistics
where
    I: IntoIterator<Item = P>,
    P: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    C: FnMut(T) + Send + 'static,
    H: ErrorHandler<E> + 'static,
{
    Orchestrator::default().run(producers, consume, on_error).await
}

/// [`Orchestrator::run_with_defaults`] with the default configuration
pub async fn run_with_defaults<I, P, Fut, T, E, C>(producers: I, consume: C) -> Statistics
where
    I: IntoIterator<Item = P>,
    P: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
    C: FnMut(T) + Send + 'static,
{
    Orchestrator::default().run_with_defaults(producers, consume).await
}
