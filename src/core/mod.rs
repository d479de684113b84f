//! Core traits and types for the tweetweld library.
//!
//! This module contains the fundamental traits and error types that define
//! the pipeline stages.

pub mod error;
pub mod traits;

// Re-export core items
pub use error::{Error, Result};
pub use traits::{Classifier, Processor, Sink, Source};
