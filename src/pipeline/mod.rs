//! Pipeline orchestration and execution.
//!
//! Three ways of wiring a source to a processor and sink:
//!
//! - [`SequentialPipeline`] drains the source into memory, then consumes.
//! - [`BackgroundPipeline`] spawns the producer and consumes inline from a
//!   handoff channel.
//! - [`ConcurrentPipeline`] spawns both sides and waits on a [`WaitGroup`]
//!   for the consumer to finish.
//!
//! Every variant delivers items to the sink in source order.

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, trace};

use crate::channel::{handoff, Delivery, HandoffReceiver, HandoffSender};
use crate::core::{Processor, Result, Sink, Source};
use crate::latency::Latency;
use crate::processors::classifier::{CLASSIFY_LATENCY, GOLANG_KEYWORDS};
use crate::processors::KeywordClassifier;
use crate::sources::{MockStream, STREAM_LATENCY};
use crate::sync::WaitGroup;
use crate::tweet::Tweet;

/// Configuration for pipeline execution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    /// Number of in-flight items the handoff channel holds
    pub buffer_size: usize,
    /// Simulated delay of each stream read
    pub stream_latency: Latency,
    /// Simulated delay of each classification
    pub classify_latency: Latency,
    /// Keywords that make a tweet relevant
    pub keywords: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1,
            stream_latency: Latency::Fixed(STREAM_LATENCY),
            classify_latency: Latency::Fixed(CLASSIFY_LATENCY),
            keywords: GOLANG_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration with every simulated delay removed
    pub fn instant() -> Self {
        Self::default()
            .stream_latency(Latency::Zero)
            .classify_latency(Latency::Zero)
    }

    /// Set the handoff buffer size
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the stream read delay
    pub fn stream_latency(mut self, latency: Latency) -> Self {
        self.stream_latency = latency;
        self
    }

    /// Set the classification delay
    pub fn classify_latency(mut self, latency: Latency) -> Self {
        self.classify_latency = latency;
        self
    }

    /// Set the relevance keywords
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// A fresh stream over `tweets` using the configured read delay
    pub fn stream(&self, tweets: Vec<Tweet>) -> MockStream {
        MockStream::new(tweets, self.stream_latency.clone())
    }

    /// A classifier using the configured keywords and delay
    pub fn classifier(&self) -> KeywordClassifier {
        KeywordClassifier::new(&self.keywords, self.classify_latency.clone())
    }
}

/// The three pipeline shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Sequential,
    BackgroundProducer,
    Concurrent,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::Sequential,
        Variant::BackgroundProducer,
        Variant::Concurrent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Sequential => "solution1",
            Variant::BackgroundProducer => "solution2",
            Variant::Concurrent => "solution3",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub variant: Variant,
    /// Items that went through the processor
    pub processed: usize,
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} took {:?}", self.variant, self.elapsed)
    }
}

/// Processor and sink bundled as the consuming half of a pipeline.
struct Consumer<R, K> {
    processor: R,
    sink: K,
    processed: usize,
}

impl<R, K> Consumer<R, K>
where
    R: Processor + Send,
    K: Sink<Item = R::Output> + Send,
{
    fn new(processor: R, sink: K) -> Self {
        Self {
            processor,
            sink,
            processed: 0,
        }
    }

    async fn consume(&mut self, item: R::Input) -> Result<()> {
        let outputs = self.processor.process(item).await?;
        self.processed += 1;
        if !outputs.is_empty() {
            self.sink.write_batch(outputs).await?;
        }
        Ok(())
    }

    /// Flush the processor and sink; returns the number of items processed.
    async fn finish(mut self) -> Result<usize> {
        let final_outputs = self.processor.finish().await?;
        if !final_outputs.is_empty() {
            self.sink.write_batch(final_outputs).await?;
        }
        self.sink.finish().await?;
        Ok(self.processed)
    }

    /// Consume until the channel reports closure.
    async fn drain(mut self, mut rx: HandoffReceiver<R::Input>, variant: Variant) -> Result<usize> {
        while let Delivery::Item(item) = rx.recv().await {
            trace!(%variant, "received item");
            self.consume(item).await?;
        }
        debug!(%variant, processed = self.processed, "channel closed");
        self.finish().await
    }
}

/// Pull every item out of `source`, in order.
pub async fn produce_all<S: Source + Send>(source: &mut S) -> Result<Vec<S::Item>> {
    let mut items = Vec::new();
    while let Some(item) = source.next().await? {
        items.push(item);
    }
    Ok(items)
}

/// Feed `source` into the channel, closing it once the source is exhausted.
///
/// Returns the number of items sent.
async fn run_producer<S>(mut source: S, tx: HandoffSender<S::Item>, variant: Variant) -> Result<usize>
where
    S: Source + Send,
{
    let mut sent = 0;
    while let Some(item) = source.next().await? {
        tx.send(item).await?;
        sent += 1;
    }
    debug!(%variant, sent, "source exhausted, closing channel");
    tx.close();
    Ok(sent)
}

/// Produce everything first, then consume. No concurrency.
pub struct SequentialPipeline<S, R, K> {
    source: S,
    processor: R,
    sink: K,
}

impl<S, R, K> SequentialPipeline<S, R, K>
where
    S: Source + Send,
    R: Processor<Input = S::Item> + Send,
    K: Sink<Item = R::Output> + Send,
{
    /// Create a new sequential pipeline
    pub fn new(source: S, processor: R, sink: K) -> Self {
        Self {
            source,
            processor,
            sink,
        }
    }

    pub async fn run(self) -> Result<RunReport> {
        let variant = Variant::Sequential;
        let start = Instant::now();
        info!(%variant, "starting run");

        let SequentialPipeline {
            mut source,
            processor,
            sink,
        } = self;

        let items = produce_all(&mut source).await?;
        debug!(%variant, produced = items.len(), "source exhausted");

        let mut consumer = Consumer::new(processor, sink);
        for item in items {
            consumer.consume(item).await?;
        }
        let processed = consumer.finish().await?;

        let elapsed = start.elapsed();
        info!(%variant, processed, ?elapsed, "run finished");
        Ok(RunReport {
            variant,
            processed,
            elapsed,
        })
    }
}

/// Producer on a spawned task; the caller's task consumes from the channel.
pub struct BackgroundPipeline<S, R, K> {
    source: S,
    processor: R,
    sink: K,
    buffer_size: usize,
}

impl<S, R, K> BackgroundPipeline<S, R, K>
where
    S: Source + Send + 'static,
    R: Processor<Input = S::Item> + Send,
    K: Sink<Item = R::Output> + Send,
{
    /// Create a new background-producer pipeline
    pub fn new(source: S, processor: R, sink: K) -> Self {
        Self {
            source,
            processor,
            sink,
            buffer_size: 1,
        }
    }

    /// Set the buffer size
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub async fn run(self) -> Result<RunReport> {
        let variant = Variant::BackgroundProducer;
        let start = Instant::now();
        info!(%variant, buffer_size = self.buffer_size, "starting run");

        let (tx, mut rx) = handoff(self.buffer_size);
        let BackgroundPipeline {
            source,
            processor,
            sink,
            ..
        } = self;

        let producer = tokio::spawn(run_producer(source, tx, variant));

        let mut consumer = Consumer::new(processor, sink);
        while let Delivery::Item(item) = rx.recv().await {
            trace!(%variant, "received item");
            consumer.consume(item).await?;
        }
        debug!(%variant, "channel closed");
        let processed = consumer.finish().await?;
        producer.await??;

        let elapsed = start.elapsed();
        info!(%variant, processed, ?elapsed, "run finished");
        Ok(RunReport {
            variant,
            processed,
            elapsed,
        })
    }
}

/// Producer and consumer both on spawned tasks, joined through a [`WaitGroup`].
pub struct ConcurrentPipeline<S, R, K> {
    source: S,
    processor: R,
    sink: K,
    buffer_size: usize,
}

impl<S, R, K> ConcurrentPipeline<S, R, K>
where
    S: Source + Send + 'static,
    R: Processor<Input = S::Item> + Send + 'static,
    K: Sink<Item = R::Output> + Send + 'static,
{
    /// Create a new concurrent pipeline
    pub fn new(source: S, processor: R, sink: K) -> Self {
        Self {
            source,
            processor,
            sink,
            buffer_size: 1,
        }
    }

    /// Set the buffer size
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub async fn run(self) -> Result<RunReport> {
        let variant = Variant::Concurrent;
        let start = Instant::now();
        info!(%variant, buffer_size = self.buffer_size, "starting run");

        let (tx, rx) = handoff(self.buffer_size);
        let ConcurrentPipeline {
            source,
            processor,
            sink,
            ..
        } = self;

        let wg = WaitGroup::new();
        // registered before either task exists, so wait() cannot slip through early
        let guard = wg.add();

        let producer = tokio::spawn(run_producer(source, tx, variant));
        let consumer = tokio::spawn(async move {
            let result = Consumer::new(processor, sink).drain(rx, variant).await;
            guard.done();
            result
        });

        wg.wait().await;
        debug!(%variant, "consumer signalled completion");

        let processed = consumer.await??;
        producer.await??;

        let elapsed = start.elapsed();
        info!(%variant, processed, ?elapsed, "run finished");
        Ok(RunReport {
            variant,
            processed,
            elapsed,
        })
    }
}

/// Run `variant` over the given stages.
pub async fn run<S, R, K>(
    variant: Variant,
    source: S,
    processor: R,
    sink: K,
    config: &PipelineConfig,
) -> Result<RunReport>
where
    S: Source + Send + 'static,
    R: Processor<Input = S::Item> + Send + 'static,
    K: Sink<Item = R::Output> + Send + 'static,
{
    match variant {
        Variant::Sequential => SequentialPipeline::new(source, processor, sink).run().await,
        Variant::BackgroundProducer => {
            BackgroundPipeline::new(source, processor, sink)
                .buffer_size(config.buffer_size)
                .run()
                .await
        }
        Variant::Concurrent => {
            ConcurrentPipeline::new(source, processor, sink)
                .buffer_size(config.buffer_size)
                .run()
                .await
        }
    }
}
