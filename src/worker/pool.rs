use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};
use crate::utils::{MAX_WORKER_COUNT, MIN_WORKER_COUNT};
use super::{WorkerError, WorkerResult};

/// Bounded pool of blocking workers.
///
/// A worker slot is a semaphore permit; the work itself runs on tokio's
/// blocking thread pool, so codec calls never stall the async scheduler.
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    worker_count: usize,
}

/// An acquired worker slot. Dropping it frees the slot.
pub struct WorkerSlot {
    _permit: OwnedSemaphorePermit,
    active_workers: Arc<AtomicUsize>,
}

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.active_workers.fetch_sub(1, Ordering::SeqCst);
    }
}

impl WorkerPool {
    /// Creates a pool of `worker_count` slots, clamped to the supported range.
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.clamp(MIN_WORKER_COUNT, MAX_WORKER_COUNT);
        debug!("Creating worker pool with {} workers", worker_count);
        Self {
            semaphore: Arc::new(Semaphore::new(worker_count)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    /// Waits for a free worker slot.
    pub async fn acquire(&self) -> WorkerResult<WorkerSlot> {
        let permit = self.semaphore.clone().acquire_owned().await.map_err(|e| {
            warn!("Failed to acquire semaphore: {}", e);
            WorkerError::from(e)
        })?;

        let active = self.active_workers.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Worker started - Active: {}/{}, Available permits: {}",
            active,
            self.worker_count,
            self.semaphore.available_permits()
        );

        Ok(WorkerSlot {
            _permit: permit,
            active_workers: self.active_workers.clone(),
        })
    }

    /// Runs `work` on a blocking thread. A panic inside `work` is returned as
    /// [`WorkerError::Panicked`] instead of unwinding into the caller.
    pub async fn run_blocking<F, T>(work: F) -> WorkerResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Ok(tokio::task::spawn_blocking(work).await?)
    }
}
