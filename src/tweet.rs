//! Record and result types flowing through the pipeline.

use std::fmt;

/// A single tweet pulled from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tweet {
    user: String,
    text: String,
}

impl Tweet {
    /// Create a new tweet
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            text: text.into(),
        }
    }

    /// The author handle
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The tweet body
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Outcome of classifying a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Relevant,
    NotRelevant,
}

impl Verdict {
    pub fn is_relevant(self) -> bool {
        matches!(self, Verdict::Relevant)
    }
}

impl From<bool> for Verdict {
    fn from(relevant: bool) -> Self {
        if relevant {
            Verdict::Relevant
        } else {
            Verdict::NotRelevant
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Relevant => f.write_str("tweets about golang"),
            Verdict::NotRelevant => f.write_str("does not tweet about golang"),
        }
    }
}

/// One output line: who tweeted and what the classifier made of it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub user: String,
    pub verdict: Verdict,
}

impl Report {
    pub fn new(tweet: &Tweet, verdict: Verdict) -> Self {
        Self {
            user: tweet.user().to_string(),
            verdict,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.user, self.verdict)
    }
}
