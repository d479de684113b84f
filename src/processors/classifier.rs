//! Keyword-based tweet classification.

use async_trait::async_trait;
use std::time::Duration;

use crate::core::Classifier;
use crate::latency::Latency;
use crate::tweet::Tweet;

/// Default simulated delay of one classification
pub const CLASSIFY_LATENCY: Duration = Duration::from_millis(330);

/// Keywords the default classifier looks for
pub const GOLANG_KEYWORDS: [&str; 2] = ["golang", "gopher"];

/// Flags a tweet as relevant when its text mentions any keyword, ignoring case.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    // stored lowercased
    keywords: Vec<String>,
    latency: Latency,
}

impl KeywordClassifier {
    pub fn new<I, S>(keywords: I, latency: Latency) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            latency,
        }
    }

    /// Looks for "golang" or "gopher", taking the default delay per tweet.
    pub fn golang() -> Self {
        Self::new(GOLANG_KEYWORDS, Latency::Fixed(CLASSIFY_LATENCY))
    }

    /// Replace the simulated delay
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// The keyword match on its own, without the delay.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn is_relevant(&self, tweet: &Tweet) -> bool {
        self.latency.wait().await;
        self.matches(tweet.text())
    }
}
