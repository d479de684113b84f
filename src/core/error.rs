//! Error types for the tweet pipeline.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for the pipeline stages.
#[derive(Debug, Error)]
pub enum Error {
    /// A source failed to yield its next record
    #[error("Source error: {0}")]
    Source(#[source] BoxError),

    /// A sink failed to write a report
    #[error("Sink error: {0}")]
    Sink(#[source] BoxError),

    /// A processor failed to transform a record
    #[error("Processor error: {0}")]
    Processor(#[source] BoxError),

    /// The handoff channel was closed by the other side
    #[error("Channel was closed unexpectedly")]
    ChannelClosed,

    /// A spawned producer or consumer task did not run to completion
    #[error("Task failed: {0}")]
    Task(String),

    /// A custom error with a message
    #[error("{0}")]
    Custom(String),
}

// Convenience constructors
impl Error {
    /// Create a source error from any error type
    pub fn source_error<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Source(Box::new(error))
    }

    /// Create a sink error from any error type
    pub fn sink<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Sink(Box::new(error))
    }

    /// Create a processor error from any error type
    pub fn processor<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Processor(Box::new(error))
    }

    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom(message.into())
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for Error {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Error::ChannelClosed
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::sink(err)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Custom(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Custom(s.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::ChannelClosed.to_string(), "Channel was closed unexpectedly");
        assert_eq!(Error::custom("boom").to_string(), "boom");

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io.into();
        assert!(matches!(err, Error::Sink(_)));
        assert_eq!(err.to_string(), "Sink error: pipe closed");
    }

    #[tokio::test]
    async fn test_send_error_maps_to_channel_closed() {
        let (tx, rx) = tokio::sync::mpsc::channel::<u8>(1);
        drop(rx);
        let err: Error = tx.send(1).await.unwrap_err().into();
        assert!(matches!(err, Error::ChannelClosed));
    }
}
