use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits how many units of work run at once.
///
/// Call [`Throttler::acquire`] before each unit of work and hold the permit until it
/// finishes. At most `max_concurrent` permits are outstanding at any time.
#[derive(Debug)]
pub struct Throttler {
    semaphore: Arc<Semaphore>,
}

impl Throttler {
    /// Create a new throttler that allows at most `max_concurrent` tasks at a time.
    ///
    /// A limit of zero is raised to one so that work can always make progress.
    #[must_use]
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Wait for a concurrency slot.
    ///
    /// When the returned permit is dropped, the slot becomes available for another task.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .expect("semaphore is never closed")
    }

    /// Number of slots currently free.
    #[must_use]
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
