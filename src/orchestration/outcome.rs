use crate::error::ProducerFailure;
use std::time::Duration;

/// One producer's result on its way from the producer task to the consumption loop
#[derive(Debug)]
pub struct Outcome<T, E> {
    /// Submission index of the producer
    pub index: usize,
    /// Launch-to-handoff time of the producer
    pub produce_time: Duration,
    /// Offset of the handoff from the run's start
    pub produced_at: Duration,
    pub result: Result<T, ProducerFailure<E>>,
}

impl<T, E> Outcome<T, E> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
