//! Fixed-size worker pool running encode tasks off the producer thread.

use std::io;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use log::warn;

use crate::EncodeError;

/// Outcome of one encode task.
pub type BlockResult = Result<String, EncodeError>;

struct Job {
    task: Box<dyn FnOnce() -> BlockResult + Send + 'static>,
    result: SyncSender<BlockResult>,
}

/// A block of encoded bytes that may not have been produced yet.
///
/// Created when a task is submitted, resolved by whichever worker runs
/// the task, and consumed exactly once with [`PendingBlock::wait`]. The
/// writer pipeline treats a resolved *empty* block as its end-of-stream
/// sentinel.
#[derive(Debug)]
pub struct PendingBlock {
    result: Receiver<BlockResult>,
}

impl PendingBlock {
    /// Construct an already-resolved block without involving a worker.
    pub fn ready(block: String) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        // The channel has room for exactly this one value.
        tx.send(Ok(block)).ok();
        Self { result: rx }
    }

    /// Block until the task resolves, consuming the pending block.
    ///
    /// # Errors
    /// Returns the task's own [`EncodeError`], or
    /// [`EncodeError::TaskAborted`] when the task was dropped before it
    /// could run.
    pub fn wait(self) -> BlockResult {
        self.result
            .recv()
            .unwrap_or(Err(EncodeError::TaskAborted))
    }
}

/// A bounded set of worker threads consuming encode tasks from a shared
/// channel.
///
/// Completion order across tasks is unspecified; callers that need
/// ordering keep the [`PendingBlock`]s in submission order themselves.
#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<JoinHandle<()>>,
    tasks: Option<Sender<Job>>,
}

impl WorkerPool {
    /// Spawn a pool of `threads` workers (at least one).
    ///
    /// # Errors
    /// Returns the underlying error when a worker thread cannot be
    /// spawned.
    pub fn new(threads: usize) -> io::Result<Self> {
        let count = threads.max(1);
        let (tx, rx) = mpsc::channel::<Job>();
        let shared = Arc::new(Mutex::new(rx));
        let mut workers = Vec::with_capacity(count);
        for index in 0..count {
            let jobs = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("waymark-encode-{index}"))
                .spawn(move || worker_loop(&jobs))?;
            workers.push(handle);
        }
        Ok(Self {
            workers,
            tasks: Some(tx),
        })
    }

    /// Thread count used when the caller expresses no preference.
    pub fn default_threads() -> usize {
        thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }

    /// Enqueue a task and return immediately with its pending block.
    ///
    /// A task that panics resolves its block with
    /// [`EncodeError::TaskPanicked`] instead of taking the pool down.
    pub fn submit<F>(&self, task: F) -> PendingBlock
    where
        F: FnOnce() -> BlockResult + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let job = Job {
            task: Box::new(task),
            result: tx,
        };
        if let Some(sender) = &self.tasks {
            // A send failure drops the job, which resolves the block as
            // aborted via the dropped result sender.
            sender.send(job).ok();
        }
        PendingBlock { result: rx }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the channel lets each worker drain what is queued and
        // exit.
        self.tasks.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("encode worker exited by panic");
            }
        }
    }
}

fn worker_loop(jobs: &Mutex<Receiver<Job>>) {
    loop {
        let job = {
            let receiver = jobs.lock().unwrap_or_else(PoisonError::into_inner);
            receiver.recv()
        };
        let Ok(Job { task, result }) = job else {
            // Channel closed: the pool is shutting down.
            return;
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(task)).unwrap_or_else(|_| {
            warn!("encode task panicked; failing its block");
            Err(EncodeError::TaskPanicked)
        });
        // The consumer may have dropped its pending block already.
        result.send(outcome).ok();
    }
}
