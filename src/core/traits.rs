//! Core traits for the tweet pipeline.
//!
//! A pipeline is a [`Source`] feeding records to a [`Processor`] whose output
//! lands in a [`Sink`]. The [`Classifier`] is the costly predicate the
//! processor consults for every record.

use crate::core::error::Result;
use crate::tweet::Tweet;
use async_trait::async_trait;

/// A source yields records one at a time until it is exhausted.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use tweetweld::core::{Result, Source};
///
/// struct Countdown(u32);
///
/// #[async_trait]
/// impl Source for Countdown {
///     type Item = u32;
///
///     async fn next(&mut self) -> Result<Option<Self::Item>> {
///         if self.0 == 0 {
///             return Ok(None);
///         }
///         self.0 -= 1;
///         Ok(Some(self.0))
///     }
/// }
/// ```
#[async_trait]
pub trait Source {
    /// The type of items this source yields
    type Item: Send + 'static;

    /// Yield the next item, or `None` once the source is exhausted.
    ///
    /// Exhaustion is terminal: every call after the first `None` must also
    /// return `None`.
    async fn next(&mut self) -> Result<Option<Self::Item>>;

    /// Pull up to `demand` items.
    ///
    /// Returns fewer than `demand` items only when the source ran dry, and an
    /// empty Vec once it is exhausted.
    async fn handle_demand(&mut self, demand: usize) -> Result<Vec<Self::Item>> {
        let mut items = Vec::with_capacity(demand);
        while items.len() < demand {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }
}

/// A sink receives the final output of a pipeline.
#[async_trait]
pub trait Sink {
    /// The type of items this sink accepts
    type Item: Send + 'static;

    /// Write a batch of items (primary method).
    async fn write_batch(&mut self, items: Vec<Self::Item>) -> Result<()>;

    /// Write a single item (convenience method).
    async fn write(&mut self, item: Self::Item) -> Result<()> {
        self.write_batch(vec![item]).await
    }

    /// Called once the upstream source is exhausted.
    ///
    /// This allows sinks to flush any buffered state.
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A processor turns one input item into zero or more output items.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use tweetweld::core::{Processor, Result};
///
/// struct Shout;
///
/// #[async_trait]
/// impl Processor for Shout {
///     type Input = String;
///     type Output = String;
///
///     async fn process(&mut self, item: Self::Input) -> Result<Vec<Self::Output>> {
///         Ok(vec![item.to_uppercase()])
///     }
/// }
/// ```
#[async_trait]
pub trait Processor {
    /// The type of items this processor accepts
    type Input: Send + 'static;
    /// The type of items this processor produces
    type Output: Send + 'static;

    /// Process a single input item.
    async fn process(&mut self, item: Self::Input) -> Result<Vec<Self::Output>>;

    /// Process a batch of input items, preserving their order.
    async fn process_batch(&mut self, items: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        let mut outputs = Vec::with_capacity(items.len());
        for item in items {
            outputs.extend(self.process(item).await?);
        }
        Ok(outputs)
    }

    /// Called when upstream is exhausted, allowing final output generation.
    async fn finish(&mut self) -> Result<Vec<Self::Output>> {
        Ok(vec![])
    }
}

/// A predicate deciding whether a tweet is worth reporting on.
///
/// Implementations may be slow (they model costly analysis) but must not
/// fail and must not depend on anything other than the tweet.
#[async_trait]
pub trait Classifier {
    /// Whether `tweet` is relevant.
    async fn is_relevant(&self, tweet: &Tweet) -> bool;
}
