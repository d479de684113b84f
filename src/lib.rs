//! # Producer/consumer pipelines over a mock tweet stream
//!
//! A slow stream of tweets feeds a slow keyword classifier. The same work is
//! wired up three ways so their structure and wall-clock time can be compared.
//!
//! ## Core Concepts
//!
//! - **Source**: yields records until exhausted ([`sources::MockStream`])
//! - **Classifier**: decides whether a tweet is relevant
//! - **Processor**: turns each tweet into a report
//! - **Sink**: receives the reports
//! - **Pipeline**: one of three orchestration shapes, see [`pipeline`]
//!
//! ## Example
//!
//! ```rust
//! use tweetweld::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = PipelineConfig::instant();
//!     let stream = config.stream(sample_tweets());
//!     let processor = ClassifyProcessor::new(config.classifier());
//!     let sink = CollectSink::new();
//!     let reports = sink.clone();
//!
//!     ConcurrentPipeline::new(stream, processor, sink).run().await?;
//!     assert_eq!(reports.into_items().await.len(), 5);
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod core;
pub mod latency;
pub mod pipeline;
pub mod processors;
pub mod sinks;
pub mod sources;
pub mod sync;
pub mod tweet;

// Re-export commonly used items
pub mod prelude {
    pub use crate::channel::{handoff, ChannelState, Delivery, HandoffReceiver, HandoffSender};
    pub use crate::core::{Classifier, Error, Processor, Result, Sink, Source};
    pub use crate::latency::Latency;
    pub use crate::pipeline::{
        BackgroundPipeline, ConcurrentPipeline, PipelineConfig, RunReport, SequentialPipeline,
        Variant,
    };
    pub use crate::processors::{ClassifyProcessor, KeywordClassifier};
    pub use crate::sinks::{CollectSink, PrintSink};
    pub use crate::sources::{sample_tweets, MockStream};
    pub use crate::sync::{CompletionGuard, WaitGroup};
    pub use crate::tweet::{Report, Tweet, Verdict};
}

// Re-export main error type
pub use crate::core::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
