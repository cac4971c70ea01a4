// src/pool/mod.rs
// =============================================================================
// A fixed-size worker pool sharing one unbounded task queue.
//
// How it works:
// 1. start() spawns W tokio tasks ("workers")
// 2. Each worker loops: take the next task from the shared queue, hand it to
//    the TaskHandler, repeat
// 3. A handler can submit more tasks while it runs (a crawl task submits one
//    per newly discovered link), using the Submitter it is given
// 4. shutdown() stops accepting tasks, throws away whatever is still queued,
//    and either waits for running tasks or aborts them (see ShutdownMode)
//
// Every task runs inside a panic boundary, so a bug in one task is logged
// and counted but never takes its worker down with it. Handlers that want to
// report a panic against their own task catch it first (see crawl/task.rs).
//
// Submodules:
// - stats: counters shared by the pool and every Submitter
// - worker_pool: the pool itself, the Submitter handle and the worker loop
// =============================================================================

mod stats;
mod worker_pool;

use std::future::Future;

pub use stats::PoolStats;
pub use worker_pool::{panic_message, Submitter, WorkerPool};

/// Runs one task. Implemented by whatever the pool is executing.
pub trait TaskHandler<T>: Send + Sync + 'static {
    fn handle(&self, task: T, submitter: &Submitter<T>) -> impl Future<Output = ()> + Send;
}

/// What shutdown() does with tasks that are already running.
///
/// Queued-but-not-started tasks are discarded in both modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShutdownMode {
    /// Abort running tasks immediately; in-flight fetches are abandoned
    #[default]
    Abort,
    /// Let each worker finish the task it is running, then stop
    Graceful,
}
