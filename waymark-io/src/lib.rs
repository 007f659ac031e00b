//! Concurrent, order-preserving output pipeline for entity buffers.
//!
//! Buffers are encoded into byte blocks on a pool of worker threads and
//! written to a [`Compressor`] by one dedicated output thread, in exactly
//! the order they were submitted. The [`Writer`] ties the pieces
//! together; [`LineFormat`] is the object-per-line text codec the
//! pipeline ships with.

#![forbid(unsafe_code)]

mod compression;
mod error;
mod line;
mod pool;
mod queue;
mod writer;

pub use compression::{Compressor, PlainCompressor};
pub use error::{EncodeError, WriteError};
pub use line::{BlockFormat, LineEncoder, LineFormat};
pub use pool::{BlockResult, PendingBlock, WorkerPool};
pub use queue::BlockQueue;
pub use writer::{DEFAULT_QUEUE_DEPTH, Writer, WriterOptions};

#[cfg(feature = "compress-bz2")]
pub use compression::Bzip2Compressor;
