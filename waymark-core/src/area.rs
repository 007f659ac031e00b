//! Area entities: closed geometry assembled from outer and inner rings.

use thiserror::Error;

use crate::{Meta, NodeRef, TagCollection};

/// A closed run of node references forming one ring of an area.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring(Vec<NodeRef>);

impl Ring {
    /// Construct an empty ring.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a ring from bare point identifiers.
    pub fn from_ids<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        Self(ids.into_iter().map(NodeRef::new).collect())
    }

    /// Number of node references in the ring.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the ring holds no references.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the node references in order.
    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.0.iter()
    }
}

impl FromIterator<NodeRef> for Ring {
    fn from_iter<I: IntoIterator<Item = NodeRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One outer ring of an area together with the inner rings it encloses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingGroup {
    /// The enclosing outer ring.
    pub outer: Ring,
    /// Holes punched out of the outer ring.
    pub inners: Vec<Ring>,
}

impl RingGroup {
    /// Construct a group with no inner rings.
    pub const fn new(outer: Ring) -> Self {
        Self {
            outer,
            inners: Vec::new(),
        }
    }
}

/// Errors returned by [`Area::new`].
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum AreaError {
    /// An area was assembled without any outer ring.
    #[error("area must contain at least one outer ring")]
    MissingOuterRing,
}

/// An area entity: metadata, tags, and one or more ring groups.
///
/// Construction validates the composite: an area with no outer ring is
/// not a meaningful geometry and is rejected up front.
///
/// # Examples
/// ```
/// use waymark_core::{Area, Meta, Ring, RingGroup, TagCollection};
///
/// let area = Area::new(
///     Meta::new(5, 1),
///     TagCollection::from_pairs([("landuse", "meadow")]),
///     vec![RingGroup::new(Ring::from_ids([1, 2, 3, 1]))],
/// )?;
/// assert_eq!(area.rings().len(), 1);
/// # Ok::<(), waymark_core::AreaError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    /// Version and provenance metadata.
    pub meta: Meta,
    /// Tags attached to the area.
    pub tags: TagCollection,
    rings: Vec<RingGroup>,
}

impl Area {
    /// Validate and construct an area.
    ///
    /// # Errors
    /// Returns [`AreaError::MissingOuterRing`] when `rings` is empty.
    pub fn new(meta: Meta, tags: TagCollection, rings: Vec<RingGroup>) -> Result<Self, AreaError> {
        if rings.is_empty() {
            return Err(AreaError::MissingOuterRing);
        }
        Ok(Self { meta, tags, rings })
    }

    /// The ring groups making up the area geometry.
    pub fn rings(&self) -> &[RingGroup] {
        &self.rings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_requires_an_outer_ring() {
        let result = Area::new(Meta::new(5, 1), TagCollection::new(), Vec::new());
        assert_eq!(result.unwrap_err(), AreaError::MissingOuterRing);
    }

    #[test]
    fn area_keeps_ring_groups() {
        let group = RingGroup {
            outer: Ring::from_ids([1, 2, 3, 1]),
            inners: vec![Ring::from_ids([4, 5, 6, 4])],
        };
        let area = Area::new(Meta::new(5, 1), TagCollection::new(), vec![group]).unwrap();
        assert_eq!(area.rings().len(), 1);
        assert_eq!(area.rings()[0].inners.len(), 1);
    }
}
