//! Fault taxonomy for the encode pipeline.

use std::io;

use thiserror::Error;

/// Errors produced while encoding one buffer into a block of bytes.
///
/// These are local to a single buffer: a failing block surfaces through
/// its own pending result and leaves other in-flight buffers untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// An entity carried a NaN or infinite coordinate.
    #[error("entity {id} has a non-finite coordinate ({lon}, {lat})")]
    NonFiniteCoordinate {
        /// Identifier of the offending entity.
        id: i64,
        /// Longitude as found.
        lon: f64,
        /// Latitude as found.
        lat: f64,
    },
    /// Formatting into the output block failed.
    #[error("failed to format output block: {source}")]
    Format {
        /// Underlying formatter error.
        #[from]
        source: std::fmt::Error,
    },
    /// The encode task panicked on its worker thread.
    #[error("encode task panicked")]
    TaskPanicked,
    /// The encode task was dropped before it ran.
    #[error("encode task was abandoned before completion")]
    TaskAborted,
}

/// Errors surfaced by the writer pipeline to the producer.
///
/// Faults raised on the output thread are stored and re-raised on the
/// producer's *next* call, never asynchronously at the point of failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteError {
    /// A submitted buffer failed to encode. The stream itself remains
    /// usable; the caller decides whether one bad buffer ends it.
    #[error("failed to encode a submitted buffer: {source}")]
    Encode {
        /// The buffer-level failure.
        #[source]
        source: EncodeError,
    },
    /// The compressor or its destination failed. Terminal: nothing more
    /// will reach the wire.
    #[error("output stream failed while {stage}: {source}")]
    Io {
        /// Pipeline stage that hit the fault.
        stage: &'static str,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A submit arrived after a terminal output fault was surfaced.
    #[error("output stream already failed; no further blocks will be written")]
    Terminated,
    /// A pipeline thread could not be spawned.
    #[error("failed to spawn pipeline thread: {source}")]
    Spawn {
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
    /// The output thread panicked.
    #[error("output thread panicked")]
    OutputThreadPanicked,
}
