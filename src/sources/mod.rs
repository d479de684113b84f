//! Source implementations for the tweetweld library.
//!
//! The only real source is [`MockStream`], a fixed sequence of tweets behind a
//! cursor with a simulated per-read latency.

use async_trait::async_trait;
use std::time::Duration;

use crate::core::{Result, Source};
use crate::latency::Latency;
use crate::tweet::Tweet;

/// Default simulated delay of a single stream read
pub const STREAM_LATENCY: Duration = Duration::from_millis(320);

/// Tweets allegedly pulled down from Twitter itself.
pub fn sample_tweets() -> Vec<Tweet> {
    vec![
        Tweet::new(
            "davecheney",
            "#golang top tip: if your unit tests import any other package you wrote, including themselves, they're not unit tests.",
        ),
        Tweet::new(
            "beertocode",
            "Backend developer, doing frontend featuring the eternal struggle of centering something. #coding",
        ),
        Tweet::new(
            "ironzeb",
            "Re: Popularity of Golang in China: My thinking nowadays is that it had a lot to do with this book and author https://github.com/astaxie/build-web-application-with-golang",
        ),
        Tweet::new(
            "beertocode",
            "Looking forward to the #gopher meetup in Hsinchu tonight with @ironzeb!",
        ),
        Tweet::new(
            "vampirewalk666",
            "I just wrote a golang slack bot! It reports the state of github repository. #Slack #golang",
        ),
    ]
}

/// A stream of tweets read one at a time.
///
/// Not meant to be shared between readers: [`advance`](Self::advance) takes
/// `&mut self`.
#[derive(Debug, Clone)]
pub struct MockStream {
    tweets: Vec<Tweet>,
    // invariant: cursor <= tweets.len()
    cursor: usize,
    latency: Latency,
}

impl MockStream {
    /// Create a stream over the given tweets
    pub fn new(tweets: Vec<Tweet>, latency: Latency) -> Self {
        Self {
            tweets,
            cursor: 0,
            latency,
        }
    }

    /// The built-in sample tweets with the default read delay
    pub fn sample() -> Self {
        Self::new(sample_tweets(), Latency::Fixed(STREAM_LATENCY))
    }

    /// Read the next tweet, or `None` once every tweet has been read.
    ///
    /// Every call pays the simulated latency, including those past the end.
    pub async fn advance(&mut self) -> Option<Tweet> {
        self.latency.wait().await;

        let tweet = self.tweets.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(tweet)
    }

    /// Number of tweets already read
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Total number of tweets backing the stream
    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// Number of tweets not yet read
    pub fn remaining(&self) -> usize {
        self.tweets.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tweets.len()
    }
}

#[async_trait]
impl Source for MockStream {
    type Item = Tweet;

    async fn next(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.advance().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(n: usize) -> MockStream {
        let tweets = (0..n)
            .map(|i| Tweet::new(format!("user{}", i), format!("tweet {}", i)))
            .collect();
        MockStream::new(tweets, Latency::Zero)
    }

    #[tokio::test]
    async fn test_advance_in_order() {
        let mut stream = stream_of(3);

        for i in 0..3 {
            let tweet = stream.advance().await.unwrap();
            assert_eq!(tweet.user(), format!("user{}", i));
            assert_eq!(stream.position(), i + 1);
        }
        assert!(stream.is_exhausted());
    }

    #[tokio::test]
    async fn test_exhaustion_is_terminal() {
        let mut stream = stream_of(2);
        assert!(stream.advance().await.is_some());
        assert!(stream.advance().await.is_some());

        for _ in 0..5 {
            assert!(stream.advance().await.is_none());
            assert_eq!(stream.position(), 2);
            assert_eq!(stream.remaining(), 0);
        }
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let mut stream = stream_of(0);
        assert!(stream.is_empty());
        assert!(stream.is_exhausted());
        assert!(stream.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_handle_demand_stops_at_end() {
        let mut stream = stream_of(5);
        assert_eq!(stream.handle_demand(3).await.unwrap().len(), 3);
        assert_eq!(stream.handle_demand(3).await.unwrap().len(), 2);
        assert!(stream.handle_demand(3).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_read_pays_latency() {
        let mut stream = MockStream::new(sample_tweets(), Latency::Fixed(STREAM_LATENCY));
        let start = tokio::time::Instant::now();
        while stream.advance().await.is_some() {}
        // five reads plus the one that observes the end
        assert!(start.elapsed() >= STREAM_LATENCY * 6);
    }

    #[test]
    fn test_sample_has_five_tweets() {
        let stream = MockStream::sample();
        assert_eq!(stream.len(), 5);
        assert_eq!(stream.remaining(), 5);
    }
}
