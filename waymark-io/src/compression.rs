//! Byte sinks at the downstream end of the pipeline.
//!
//! The output thread is the only caller: blocks arrive strictly in
//! submission order and `close` follows the last block exactly once.

use std::io::{self, Write};

/// A destination for encoded blocks.
pub trait Compressor {
    /// Write one complete block to the destination.
    ///
    /// # Errors
    /// Any I/O error is terminal for the stream that owns this sink.
    fn write(&mut self, data: &[u8]) -> io::Result<()>;

    /// Flush remaining state and release the destination.
    ///
    /// # Errors
    /// Any I/O error is terminal for the stream that owns this sink.
    fn close(&mut self) -> io::Result<()>;
}

/// Pass-through sink writing blocks uncompressed.
#[derive(Debug)]
pub struct PlainCompressor<W: Write> {
    inner: W,
}

impl<W: Write> PlainCompressor<W> {
    /// Wrap a destination.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Release the wrapped destination.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Compressor for PlainCompressor<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(feature = "compress-bz2")]
mod bz2 {
    use std::io::{self, Write};

    use bzip2::Compression;
    use bzip2::write::BzEncoder;

    use super::Compressor;

    /// Sink compressing blocks into a single bzip2 stream.
    #[derive(Debug)]
    pub struct Bzip2Compressor<W: Write> {
        encoder: BzEncoder<W>,
    }

    impl<W: Write> Bzip2Compressor<W> {
        /// Wrap a destination in a bzip2 stream at the default level.
        pub fn new(inner: W) -> Self {
            Self {
                encoder: BzEncoder::new(inner, Compression::default()),
            }
        }

        /// Finish the stream and release the wrapped destination.
        ///
        /// # Errors
        /// Returns the underlying I/O error if finalising the stream
        /// fails.
        pub fn finish(self) -> io::Result<W> {
            self.encoder.finish()
        }
    }

    impl<W: Write> Compressor for Bzip2Compressor<W> {
        fn write(&mut self, data: &[u8]) -> io::Result<()> {
            self.encoder.write_all(data)
        }

        fn close(&mut self) -> io::Result<()> {
            self.encoder.try_finish()
        }
    }
}

#[cfg(feature = "compress-bz2")]
pub use bz2::Bzip2Compressor;
