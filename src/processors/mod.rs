//! Processor implementations for the tweetweld library.
//!
//! The consumer side of every pipeline runs a [`ClassifyProcessor`], which
//! turns each tweet into a [`Report`] using a [`Classifier`].

pub mod classifier;

use async_trait::async_trait;

use crate::core::{Classifier, Processor, Result};
use crate::tweet::{Report, Tweet, Verdict};

pub use classifier::KeywordClassifier;

/// A processor that classifies tweets and emits one report per tweet.
pub struct ClassifyProcessor<C> {
    classifier: C,
}

impl<C> ClassifyProcessor<C> {
    /// Create a new classify processor
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

#[async_trait]
impl<C> Processor for ClassifyProcessor<C>
where
    C: Classifier + Send + Sync,
{
    type Input = Tweet;
    type Output = Report;

    async fn process(&mut self, item: Self::Input) -> Result<Vec<Self::Output>> {
        let verdict = Verdict::from(self.classifier.is_relevant(&item).await);
        Ok(vec![Report::new(&item, verdict)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::Latency;

    #[tokio::test]
    async fn test_one_report_per_tweet() {
        let mut processor =
            ClassifyProcessor::new(KeywordClassifier::golang().with_latency(Latency::Zero));

        let reports = processor
            .process_batch(vec![
                Tweet::new("a", "golang!"),
                Tweet::new("b", "nothing here"),
                Tweet::new("c", "gophers"),
            ])
            .await
            .unwrap();

        let verdicts: Vec<_> = reports.iter().map(|r| (r.user.as_str(), r.verdict)).collect();
        assert_eq!(
            verdicts,
            vec![
                ("a", Verdict::Relevant),
                ("b", Verdict::NotRelevant),
                ("c", Verdict::Relevant),
            ]
        );
        assert!(processor.finish().await.unwrap().is_empty());
    }
}
