//! Completion barrier for waiting on spawned tasks.

use std::sync::Arc;
use tokio::sync::watch;

/// Counts outstanding tasks and lets another task wait for all of them.
///
/// Each [`add`](Self::add) hands out a [`CompletionGuard`]; the count drops
/// when that guard is dropped or [`done`](CompletionGuard::done) is called,
/// so a task can only ever signal completion once.
#[derive(Debug, Clone)]
pub struct WaitGroup {
    count: Arc<watch::Sender<usize>>,
}

impl WaitGroup {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self {
            count: Arc::new(count),
        }
    }

    /// Register one more task. Call this before spawning the task.
    pub fn add(&self) -> CompletionGuard {
        self.count.send_modify(|c| *c += 1);
        CompletionGuard {
            count: self.count.clone(),
        }
    }

    /// Number of guards still outstanding
    pub fn count(&self) -> usize {
        *self.count.borrow()
    }

    /// Wait until every guard has been released.
    pub async fn wait(&self) {
        let mut rx = self.count.subscribe();
        // the sender lives in self, so the channel cannot close under us
        let _ = rx.wait_for(|c| *c == 0).await;
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that one registered task is still running.
#[must_use = "dropping the guard immediately marks the task as done"]
#[derive(Debug)]
pub struct CompletionGuard {
    count: Arc<watch::Sender<usize>>,
}

impl CompletionGuard {
    /// Mark the task as finished
    pub fn done(self) {}
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.count.send_modify(|c| *c -= 1);
    }
}
