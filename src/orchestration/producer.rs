//! # Producers
//!
//! A producer is any `FnOnce() -> impl Future<Output = Result<T, E>>`. Distinct
//! closures have distinct types, so [`BoxProducer`] erases them to let one
//! sequence hold producers built from different closures.

use crate::orchestration::error_handler::ErrorHandler;
use crate::orchestration::orchestrator::Orchestrator;
use crate::statistics::Statistics;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

pub type BoxProducer<T, E> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T, E>> + Send>;

/// Erase a producer closure's type
pub fn boxed<F, Fut, T, E>(producer: F) -> BoxProducer<T, E>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    Box::new(move || producer().boxed())
}

/// Ordered collection of producers, submitted in insertion order
pub struct Producers<T, E> {
    producers: Vec<BoxProducer<T, E>>,
}

impl<T, E> Producers<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            producers: Vec::new(),
        }
    }

    /// Append a producer (builder style)
    pub fn add<F, Fut>(mut self, producer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.push(producer);
        self
    }

    pub fn push<F, Fut>(&mut self, producer: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.producers.push(boxed(producer));
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Run every producer into `consume`, logging failures with the default handler
    pub async fn consume<C>(self, consume: C) -> Statistics
    where
        C: FnMut(T) + Send + 'static,
        E: fmt::Display,
    {
        Orchestrator::default().run_with_defaults(self, consume).await
    }

    /// Run every producer into `consume`, routing failures to `on_error`
    pub async fn consume_all<C, H>(self, consume: C, on_error: H) -> Statistics
    where
        C: FnMut(T) + Send + 'static,
        H: ErrorHandler<E> + 'static,
    {
        Orchestrator::default().run(self, consume, on_error).await
    }
}

impl<T, E> Default for Producers<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for Producers<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producers")
            .field("len", &self.producers.len())
            .finish()
    }
}

impl<T, E> FromIterator<BoxProducer<T, E>> for Producers<T, E> {
    fn from_iter<I: IntoIterator<Item = BoxProducer<T, E>>>(iter: I) -> Self {
        Self {
            producers: iter.into_iter().collect(),
        }
    }
}

impl<T, E> IntoIterator for Producers<T, E> {
    type Item = BoxProducer<T, E>;
    type IntoIter = std::vec::IntoIter<BoxProducer<T, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.producers.into_iter()
    }
}
