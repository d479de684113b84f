//! Simulated latency for the mock stream and classifier.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// How long a simulated operation takes.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Latency {
    /// Return immediately
    #[default]
    Zero,
    /// Always wait the same amount
    Fixed(Duration),
    /// Step through a scripted list of waits, wrapping around at the end
    Cycle(
        Vec<Duration>,
        #[cfg_attr(feature = "serde", serde(skip))] AtomicUsize,
    ),
}

impl Latency {
    pub fn fixed_millis(ms: u64) -> Self {
        Latency::Fixed(Duration::from_millis(ms))
    }

    pub fn cycle(waits: Vec<Duration>) -> Self {
        Latency::Cycle(waits, AtomicUsize::new(0))
    }

    /// The delay the next call to [`wait`](Self::wait) will use.
    ///
    /// For [`Latency::Cycle`] this advances the script.
    pub fn next_delay(&self) -> Duration {
        match self {
            Latency::Zero => Duration::ZERO,
            Latency::Fixed(d) => *d,
            Latency::Cycle(waits, step) => {
                if waits.is_empty() {
                    return Duration::ZERO;
                }
                let i = step.fetch_add(1, Ordering::Relaxed);
                waits[i % waits.len()]
            }
        }
    }

    /// Suspend the calling task for the simulated delay.
    pub async fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

impl Clone for Latency {
    fn clone(&self) -> Self {
        match self {
            Latency::Zero => Latency::Zero,
            Latency::Fixed(d) => Latency::Fixed(*d),
            Latency::Cycle(waits, _) => Latency::cycle(waits.clone()),
        }
    }
}

impl PartialEq for Latency {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Latency::Zero, Latency::Zero) => true,
            (Latency::Fixed(a), Latency::Fixed(b)) => a == b,
            (Latency::Cycle(a, _), Latency::Cycle(b, _)) => a == b,
            _ => false,
        }
    }
}
