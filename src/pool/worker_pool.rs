// src/pool/worker_pool.rs
// =============================================================================
// The worker pool, the Submitter handle, and the loop every worker runs.
//
// Shared state:
// - one unbounded mpsc channel; the receiver sits behind a tokio Mutex so any
//   idle worker can take the next task, and each task goes to exactly one
// - a watch channel that tells workers to stop waiting for new tasks
// - an "accepting" flag checked by every submit()
//
// Rust concepts:
// - tokio::select!: wait for "next task" and "shutdown" at the same time
// - catch_unwind: turns a panic inside a task into an Err we can log
// - JoinHandle::abort: cancels a spawned task at its next await point
// =============================================================================

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::stats::{Counters, PoolStats};
use super::{ShutdownMode, TaskHandler};

type Queue<T> = Arc<Mutex<mpsc::UnboundedReceiver<T>>>;

#[derive(Debug)]
struct PoolState {
    accepting: AtomicBool,
    counters: Counters,
}

/// Cloneable handle for putting tasks on a pool's queue.
pub struct Submitter<T> {
    sender: mpsc::UnboundedSender<T>,
    state: Arc<PoolState>,
}

// Derive would require T: Clone, which tasks don't need to be
impl<T> Clone for Submitter<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Submitter<T> {
    /// Queues a task. Returns false, without an error, once the pool is
    /// shutting down.
    pub fn submit(&self, task: T) -> bool {
        if !self.state.accepting.load(Ordering::Acquire) {
            self.reject();
            return false;
        }

        let counters = &self.state.counters;
        Counters::bump(&counters.submitted);
        if self.sender.send(task).is_err() {
            // Queue already closed by shutdown()
            counters.submitted.fetch_sub(1, Ordering::Relaxed);
            self.reject();
            return false;
        }
        true
    }

    pub fn stats(&self) -> PoolStats {
        self.state.counters.snapshot()
    }

    fn reject(&self) {
        Counters::bump(&self.state.counters.rejected);
        debug!("Pool is shutting down, task rejected");
    }
}

pub struct WorkerPool<T> {
    submitter: Submitter<T>,
    queue: Queue<T>,
    shutdown_tx: watch::Sender<bool>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Spawns `worker_count` workers on the current tokio runtime.
    pub fn start<H: TaskHandler<T>>(worker_count: usize, handler: H) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let queue: Queue<T> = Arc::new(Mutex::new(receiver));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let submitter = Submitter {
            sender,
            state: Arc::new(PoolState {
                accepting: AtomicBool::new(true),
                counters: Counters::default(),
            }),
        };

        let handler = Arc::new(handler);
        let workers = (0..worker_count)
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&handler),
                    Arc::clone(&queue),
                    submitter.clone(),
                    shutdown_rx.clone(),
                ))
            })
            .collect();

        debug!(workers = worker_count, "Worker pool started");

        Self {
            submitter,
            queue,
            shutdown_tx,
            workers,
        }
    }

    pub fn submitter(&self) -> Submitter<T> {
        self.submitter.clone()
    }

    /// Stops the pool and returns its final counters.
    ///
    /// New submissions are rejected from the moment this is called. Tasks
    /// still in the queue are discarded. Running tasks are aborted or awaited
    /// depending on `mode`. Either way every worker has exited when this
    /// returns.
    pub async fn shutdown(self, mode: ShutdownMode) -> PoolStats {
        let WorkerPool {
            submitter,
            queue,
            shutdown_tx,
            workers,
        } = self;

        submitter.state.accepting.store(false, Ordering::Release);
        // Err only means every worker is already gone
        let _ = shutdown_tx.send(true);

        if mode == ShutdownMode::Abort {
            for worker in &workers {
                worker.abort();
            }
        }

        for result in join_all(workers).await {
            if let Err(e) = result {
                if !e.is_cancelled() {
                    warn!("Worker exited abnormally: {}", e);
                }
            }
        }

        let mut receiver = queue.lock().await;
        receiver.close();
        let mut discarded = 0;
        while receiver.try_recv().is_ok() {
            discarded += 1;
        }
        submitter
            .state
            .counters
            .discarded
            .fetch_add(discarded, Ordering::Relaxed);

        let stats = submitter.stats();
        debug!(?mode, ?stats, "Worker pool shut down");
        stats
    }
}

async fn run_worker<T, H>(
    id: usize,
    handler: Arc<H>,
    queue: Queue<T>,
    submitter: Submitter<T>,
    mut shutdown: watch::Receiver<bool>,
) where
    T: Send + 'static,
    H: TaskHandler<T>,
{
    let counters = &submitter.state.counters;

    loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.changed() => None,
            task = next_task(&queue) => task,
        };
        let Some(task) = next else { break };

        counters.in_flight.fetch_add(1, Ordering::Relaxed);
        let outcome = AssertUnwindSafe(handler.handle(task, &submitter))
            .catch_unwind()
            .await;
        counters.in_flight.fetch_sub(1, Ordering::Relaxed);

        match outcome {
            Ok(()) => Counters::bump(&counters.completed),
            Err(panic) => {
                Counters::bump(&counters.panicked);
                error!(worker = id, "Task panicked: {}", panic_message(&*panic));
            }
        }
    }

    debug!(worker = id, "Worker stopped");
}

async fn next_task<T>(queue: &Mutex<mpsc::UnboundedReceiver<T>>) -> Option<T> {
    queue.lock().await.recv().await
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
