//! Shared metadata carried by versioned entities.

use chrono::{DateTime, Utc};

/// Version and provenance metadata common to points, paths, areas, and
/// relations.
///
/// Defaults to id 0, version 0, visible, with the Unix epoch as
/// timestamp, matching the state of a freshly allocated entity before a
/// decoder fills it in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meta {
    /// Entity identifier.
    pub id: i64,
    /// Version number of this revision.
    pub version: u32,
    /// Whether this revision is visible (`false` marks a deletion).
    pub visible: bool,
    /// Identifier of the changeset that produced this revision.
    pub changeset: i64,
    /// Time the revision was created.
    pub timestamp: DateTime<Utc>,
    /// Identifier of the user who created the revision.
    pub uid: i64,
    /// Display name of the user who created the revision.
    pub user: String,
}

impl Meta {
    /// Construct metadata for `id` at `version`, with all other fields
    /// defaulted.
    pub fn new(id: i64, version: u32) -> Self {
        Self {
            id,
            version,
            ..Self::default()
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            id: 0,
            version: 0,
            visible: true,
            changeset: 0,
            timestamp: DateTime::UNIX_EPOCH,
            uid: 0,
            user: String::new(),
        }
    }
}
