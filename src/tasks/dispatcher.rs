//! Dispatcher Module
//!
//! Fixed-size worker pool over a bounded FIFO queue. Submissions beyond
//! capacity are rejected immediately instead of blocking the caller; every
//! rejection is logged and counted.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A unit of work executed by a pool worker.
pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

// == Dispatch Error ==
/// Reasons a submission can be refused.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// All workers are busy and the pending queue is full
    #[error("Worker queue is full")]
    QueueFull,

    /// The pool has been shut down
    #[error("Worker pool is shut down")]
    Shutdown,
}

// == Dispatcher ==
/// Bounded worker pool.
///
/// Workers pull jobs from a shared channel: the receiver sits behind a mutex,
/// the holder releases it as soon as a job is taken, so jobs run in parallel
/// up to the worker count. The channel capacity is the pending-queue depth.
#[derive(Debug)]
pub struct Dispatcher {
    sender: mpsc::Sender<Job>,
    workers: Vec<JoinHandle<()>>,
    rejected: AtomicU64,
}

impl Dispatcher {
    // == Constructor ==
    /// Spawns `worker_count` workers sharing a queue of `queue_depth` slots.
    ///
    /// Both counts are clamped to at least one.
    pub fn new(worker_count: usize, queue_depth: usize) -> Self {
        let worker_count = worker_count.max(1);
        let queue_depth = queue_depth.max(1);

        let (sender, receiver) = mpsc::channel::<Job>(queue_depth);
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..worker_count)
            .map(|index| {
                let receiver = receiver.clone();
                tokio::spawn(async move {
                    debug!(worker = index, "Generation worker started");
                    loop {
                        let job = {
                            let mut receiver = receiver.lock().await;
                            receiver.recv().await
                        };
                        match job {
                            Some(job) => job.await,
                            None => break,
                        }
                    }
                    debug!(worker = index, "Generation worker stopped");
                })
            })
            .collect();

        info!(worker_count, queue_depth, "Dispatcher initialized");
        Self {
            sender,
            workers,
            rejected: AtomicU64::new(0),
        }
    }

    // == Submit ==
    /// Enqueues a job for asynchronous execution.
    ///
    /// Never blocks: when the queue is full the job is dropped and the caller
    /// is told, so it can surface the rejection instead of waiting forever.
    pub fn try_submit(&self, job: Job) -> Result<(), DispatchError> {
        match self.sender.try_send(job) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                warn!("Job rejected: worker queue is full");
                Err(DispatchError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("Job rejected: worker pool is shut down");
                Err(DispatchError::Shutdown)
            }
        }
    }

    /// Number of submissions rejected because the queue was full.
    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    // == Shutdown ==
    /// Aborts all workers. Queued jobs are dropped.
    pub fn shutdown(&self) {
        for worker in &self.workers {
            worker.abort();
        }
        info!("Dispatcher workers aborted");
    }
}
