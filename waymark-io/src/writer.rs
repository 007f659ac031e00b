//! Order-preserving, backpressured writer pipeline.
//!
//! The producer submits buffers; a worker pool encodes them in parallel;
//! a dedicated output thread waits on the pending blocks in submission
//! order and feeds the bytes to the compressor. Output order therefore
//! always equals submission order, no matter which worker finishes
//! first.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use waymark_core::Buffer;

use crate::compression::Compressor;
use crate::line::BlockFormat;
use crate::pool::{PendingBlock, WorkerPool};
use crate::queue::BlockQueue;
use crate::WriteError;

/// Default bound on outstanding blocks before `submit` throttles the
/// producer. A heuristic, not a load-bearing constant; tune it through
/// [`WriterOptions::queue_depth`].
pub const DEFAULT_QUEUE_DEPTH: usize = 10;

/// Tunables for a [`Writer`].
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Encode worker threads. `None` uses the machine's available
    /// parallelism.
    pub threads: Option<NonZeroUsize>,
    /// Bound on queued blocks before the producer is made to wait.
    pub queue_depth: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            threads: None,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

/// Faults raised on the output thread, parked until the producer's next
/// call.
#[derive(Debug, Default)]
struct FaultStore {
    pending: Mutex<VecDeque<WriteError>>,
    terminated: AtomicBool,
}

impl FaultStore {
    fn record(&self, fault: WriteError) {
        warn!("deferring pipeline fault to the producer: {fault}");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(fault);
    }

    fn record_terminal(&self, fault: WriteError) {
        self.terminated.store(true, Ordering::SeqCst);
        self.record(fault);
    }

    fn take(&self) -> Option<WriteError> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }
}

/// Writes a stream of entity buffers through parallel encoding to a
/// single compressor, preserving submission order on the wire.
///
/// One writer owns one queue, one worker pool, one output thread, and
/// one compressor: it is a single logical stream and is not meant to be
/// shared between producers. [`Writer::close`] consumes the writer, so
/// submit-after-close and double-close are compile errors; dropping an
/// unclosed writer performs a best-effort close.
///
/// # Examples
/// ```
/// use waymark_core::{Buffer, Entity, Meta, Point, TagCollection};
/// use waymark_io::{LineFormat, PlainCompressor, Writer};
///
/// let mut writer = Writer::new(LineFormat, PlainCompressor::new(std::io::sink()))?;
/// let mut buffer = Buffer::new();
/// buffer.push(Entity::Point(Point::new(Meta::new(1, 1), TagCollection::new(), None)));
/// writer.submit(buffer)?;
/// writer.close()?;
/// # Ok::<(), waymark_io::WriteError>(())
/// ```
#[derive(Debug)]
pub struct Writer<F: BlockFormat> {
    format: Arc<F>,
    pool: WorkerPool,
    queue: Arc<BlockQueue>,
    faults: Arc<FaultStore>,
    output: Option<JoinHandle<()>>,
}

impl<F: BlockFormat> Writer<F> {
    /// Construct a writer with default options.
    ///
    /// # Errors
    /// Returns [`WriteError::Spawn`] when a pipeline thread cannot be
    /// started.
    pub fn new<C>(format: F, compressor: C) -> Result<Self, WriteError>
    where
        C: Compressor + Send + 'static,
    {
        Self::with_options(format, compressor, WriterOptions::default())
    }

    /// Construct a writer with explicit options.
    ///
    /// # Errors
    /// Returns [`WriteError::Spawn`] when a pipeline thread cannot be
    /// started.
    pub fn with_options<C>(
        format: F,
        compressor: C,
        options: WriterOptions,
    ) -> Result<Self, WriteError>
    where
        C: Compressor + Send + 'static,
    {
        let threads = options
            .threads
            .map_or_else(WorkerPool::default_threads, NonZeroUsize::get);
        let pool = WorkerPool::new(threads).map_err(|source| WriteError::Spawn { source })?;
        let queue = Arc::new(BlockQueue::new(options.queue_depth));
        let faults = Arc::new(FaultStore::default());
        let output = thread::Builder::new()
            .name("waymark-output".into())
            .spawn({
                let queue = Arc::clone(&queue);
                let faults = Arc::clone(&faults);
                move || output_loop(&queue, compressor, &faults)
            })
            .map_err(|source| WriteError::Spawn { source })?;
        Ok(Self {
            format: Arc::new(format),
            pool,
            queue,
            faults,
            output: Some(output),
        })
    }

    /// Submit one buffer for encoding and eventual output.
    ///
    /// Returns as soon as the buffer's pending block is queued, blocking
    /// only while the queue sits at its bound. An empty buffer is a
    /// no-op: an empty encoded block is the pipeline's end-of-stream
    /// sentinel, so one never enters the queue as payload.
    ///
    /// # Errors
    /// Surfaces at most one fault recorded by the output thread since
    /// the previous call. An [`WriteError::Encode`] leaves the stream
    /// usable; a [`WriteError::Io`] means the stream is dead and every
    /// later submit reports [`WriteError::Terminated`]. The buffer
    /// passed with a failing call is not queued.
    pub fn submit(&mut self, buffer: Buffer) -> Result<(), WriteError> {
        if let Some(fault) = self.faults.take() {
            return Err(fault);
        }
        if self.faults.is_terminated() {
            return Err(WriteError::Terminated);
        }
        if buffer.is_empty() {
            return Ok(());
        }
        let format = Arc::clone(&self.format);
        let block = self.pool.submit(move || format.encode(buffer));
        self.queue.push(block);
        Ok(())
    }

    /// Finish the stream: drain all submitted work, close the
    /// compressor, and stop the output thread.
    ///
    /// Consumes the writer, so the single-close contract is enforced at
    /// compile time.
    ///
    /// # Errors
    /// Surfaces one fault recorded during the drain, or
    /// [`WriteError::OutputThreadPanicked`] if the output thread died.
    pub fn close(mut self) -> Result<(), WriteError> {
        self.finish()
    }

    fn finish(&mut self) -> Result<(), WriteError> {
        let Some(handle) = self.output.take() else {
            return Ok(());
        };
        debug!("closing writer: queueing sentinel and draining");
        self.queue.push(PendingBlock::ready(String::new()));
        if handle.join().is_err() {
            return Err(WriteError::OutputThreadPanicked);
        }
        self.faults.take().map_or(Ok(()), Err)
    }
}

impl<F: BlockFormat> Drop for Writer<F> {
    fn drop(&mut self) {
        if let Err(fault) = self.finish() {
            warn!("writer dropped with unreported fault: {fault}");
        }
    }
}

fn output_loop<C: Compressor>(queue: &BlockQueue, mut compressor: C, faults: &FaultStore) {
    let mut failed = false;
    loop {
        let block = queue.pop();
        match block.wait() {
            // The sentinel: an empty resolved block ends the stream.
            Ok(bytes) if bytes.is_empty() => break,
            Ok(bytes) => {
                if failed {
                    // Terminal fault already recorded; keep draining so
                    // the producer is never wedged on backpressure.
                    continue;
                }
                if let Err(source) = compressor.write(bytes.as_bytes()) {
                    faults.record_terminal(WriteError::Io {
                        stage: "writing a block",
                        source,
                    });
                    failed = true;
                }
            }
            Err(source) => faults.record(WriteError::Encode { source }),
        }
    }
    match compressor.close() {
        Ok(()) => {}
        Err(source) if !failed => {
            faults.record_terminal(WriteError::Io {
                stage: "closing the stream",
                source,
            });
        }
        // The close error after a write fault adds nothing; the write
        // fault is already parked for the producer.
        Err(_) => {}
    }
}
