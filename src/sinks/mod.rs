//! Sink implementations for the tweetweld library.

use async_trait::async_trait;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex as TokioMutex;

use crate::core::{Result, Sink};

/// A sink that writes one line per item.
///
/// Writes to stdout by default; any async writer works.
pub struct PrintSink<T, W = Stdout> {
    writer: W,
    _phantom: PhantomData<T>,
}

impl<T> PrintSink<T, Stdout> {
    /// Create a new print sink on stdout
    pub fn new() -> Self {
        Self::to_writer(tokio::io::stdout())
    }
}

impl<T> Default for PrintSink<T, Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, W> PrintSink<T, W> {
    /// Create a print sink writing to `writer`
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer,
            _phantom: PhantomData,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<T, W> Sink for PrintSink<T, W>
where
    T: Display + Send + 'static,
    W: AsyncWrite + Unpin + Send,
{
    type Item = T;

    async fn write_batch(&mut self, items: Vec<Self::Item>) -> Result<()> {
        for item in items {
            self.writer.write_all(format!("{}\n", item).as_bytes()).await?;
        }
        // lines must show up as they are classified, not at the end
        self.writer.flush().await?;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// A sink that collects items into a shared vector.
pub struct CollectSink<T> {
    items: Arc<TokioMutex<Vec<T>>>,
}

impl<T: Send + 'static + Clone> CollectSink<T> {
    /// Create a new collect sink
    pub fn new() -> Self {
        Self {
            items: Arc::new(TokioMutex::new(Vec::new())),
        }
    }

    /// Get the collected items
    pub async fn into_items(self) -> Vec<T> {
        self.items.lock().await.clone()
    }

    /// Get a clone of the items Arc for external access
    pub fn items(&self) -> Arc<TokioMutex<Vec<T>>> {
        self.items.clone()
    }
}

#[async_trait]
impl<T: Send + 'static + Clone> Sink for CollectSink<T> {
    type Item = T;

    async fn write_batch(&mut self, items: Vec<Self::Item>) -> Result<()> {
        let mut collected = self.items.lock().await;
        collected.extend(items);
        Ok(())
    }
}

impl<T: Send + 'static + Clone> Default for CollectSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CollectSink<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tweet::{Report, Tweet, Verdict};

    #[tokio::test]
    async fn test_print_sink_writes_lines() {
        let mut sink = PrintSink::to_writer(Vec::<u8>::new());
        let tweet = Tweet::new("ironzeb", "golang");
        sink.write(Report::new(&tweet, Verdict::Relevant)).await.unwrap();
        sink.write(Report::new(&tweet, Verdict::NotRelevant)).await.unwrap();
        sink.finish().await.unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "ironzeb\ttweets about golang\nironzeb\tdoes not tweet about golang\n"
        );
    }

    #[tokio::test]
    async fn test_collect_sink_shares_items() {
        let mut sink = CollectSink::new();
        let handle = sink.clone();

        sink.write_batch(vec![1, 2]).await.unwrap();
        sink.write(3).await.unwrap();

        assert_eq!(*handle.items().lock().await, vec![1, 2, 3]);
        assert_eq!(handle.into_items().await, vec![1, 2, 3]);
    }
}
