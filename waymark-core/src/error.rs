//! Faults raised while interpreting raw entity data.

use thiserror::Error;

/// Fatal faults caused by corrupt type tags in raw entity data.
///
/// These are never recoverable: a tag outside the closed variant set
/// means the surrounding bytes cannot be trusted, so the traversal that
/// hit it must be abandoned.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A storage tag byte did not name any known entity variant.
    #[error("unrecognised entity tag byte {tag:#04x}")]
    UnknownEntityTag {
        /// The offending tag byte.
        tag: u8,
    },
    /// A relation member kind character was outside the closed set.
    #[error("unrecognised relation member kind {found:?}")]
    UnknownMemberKind {
        /// The offending character.
        found: char,
    },
}
