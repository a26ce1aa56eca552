//! Fixture producers that record what they do in a shared trace.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use worker_fanin::{boxed, BoxProducer, ProducerFailure};

pub type Trace = Arc<Mutex<Vec<String>>>;
pub type TestProducer = BoxProducer<usize, anyhow::Error>;

pub fn new_trace() -> Trace {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn trace_lines(trace: &Trace) -> Vec<String> {
    trace.lock().clone()
}

pub fn return_n(i: usize, out: &Trace) -> TestProducer {
    let out = Arc::clone(out);
    boxed(move || async move {
        out.lock().push(format!("produce:{i}"));
        Ok(i)
    })
}

pub fn sleep_and_return_n(i: usize, msec: u64, out: &Trace) -> TestProducer {
    let out = Arc::clone(out);
    boxed(move || async move {
        tokio::time::sleep(Duration::from_millis(msec)).await;
        out.lock().push(format!("produce:{i} (after sleep {msec} msec)"));
        Ok(i)
    })
}

pub fn sleep_and_fail(msec: u64, out: &Trace) -> TestProducer {
    let out = Arc::clone(out);
    boxed(move || async move {
        tokio::time::sleep(Duration::from_millis(msec)).await;
        out.lock().push(format!("produce error (after sleep {msec} msec)"));
        Err(anyhow::anyhow!("error"))
    })
}

/// Consumer that appends `consume:<value>` to the trace
pub fn tracing_consumer(out: &Trace) -> impl FnMut(usize) + Send + 'static {
    let out = Arc::clone(out);
    move |value| out.lock().push(format!("consume:{value}"))
}

/// Error handler that appends `error:<index>` to the trace
pub fn tracing_error_handler(
    out: &Trace,
) -> impl FnMut(ProducerFailure<anyhow::Error>) + Send + 'static {
    let out = Arc::clone(out);
    move |failure| out.lock().push(format!("error:{}", failure.index()))
}
