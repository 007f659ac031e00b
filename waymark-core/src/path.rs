//! Path entities: an ordered run of node references.

use geo::Coord;

use crate::{Meta, TagCollection};

/// A reference to a member point of a path or ring.
///
/// The referenced point's location travels with the reference when it is
/// known, so geometry consumers can work from the path alone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef {
    /// Identifier of the referenced point.
    pub id: i64,
    /// Location of the referenced point, if resolved.
    pub location: Option<Coord<f64>>,
}

impl NodeRef {
    /// Construct an unresolved reference.
    pub const fn new(id: i64) -> Self {
        Self { id, location: None }
    }

    /// Construct a reference with a resolved location.
    pub const fn with_location(id: i64, location: Coord<f64>) -> Self {
        Self {
            id,
            location: Some(location),
        }
    }
}

/// The ordered node references of a path.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNodeList(Vec<NodeRef>);

impl PathNodeList {
    /// Construct an empty list.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list from bare point identifiers.
    pub fn from_ids<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        Self(ids.into_iter().map(NodeRef::new).collect())
    }

    /// Append a reference.
    pub fn push(&mut self, node: NodeRef) {
        self.0.push(node);
    }

    /// Number of references in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the list holds no references.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The reference at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&NodeRef> {
        self.0.get(index)
    }

    /// The first reference, if any.
    pub fn first(&self) -> Option<&NodeRef> {
        self.0.first()
    }

    /// The last reference, if any.
    pub fn last(&self) -> Option<&NodeRef> {
        self.0.last()
    }

    /// Iterate over the references in order.
    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.0.iter()
    }
}

impl FromIterator<NodeRef> for PathNodeList {
    fn from_iter<I: IntoIterator<Item = NodeRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PathNodeList {
    type Item = &'a NodeRef;
    type IntoIter = std::slice::Iter<'a, NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A path entity: metadata, tags, and an ordered node list.
///
/// # Examples
/// ```
/// use waymark_core::{Meta, Path, PathNodeList, TagCollection};
///
/// let path = Path::new(
///     Meta::new(17, 3),
///     TagCollection::from_pairs([("highway", "residential")]),
///     PathNodeList::from_ids([1, 3, 1]),
/// );
/// assert!(path.is_closed());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Version and provenance metadata.
    pub meta: Meta,
    /// Tags attached to the path.
    pub tags: TagCollection,
    /// Ordered references to the member points.
    pub nodes: PathNodeList,
}

impl Path {
    /// Construct a path.
    pub const fn new(meta: Meta, tags: TagCollection, nodes: PathNodeList) -> Self {
        Self { meta, tags, nodes }
    }

    /// `true` when the first and last node references name the same point.
    ///
    /// An empty path is not closed.
    pub fn is_closed(&self) -> bool {
        self.nodes
            .first()
            .zip(self.nodes.last())
            .is_some_and(|(first, last)| first.id == last.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn path_with_ids(ids: Vec<i64>) -> Path {
        Path::new(
            Meta::new(17, 3),
            TagCollection::from_pairs([("highway", "residential")]),
            PathNodeList::from_ids(ids),
        )
    }

    #[rstest]
    #[case(vec![1, 3, 2], false)]
    #[case(vec![1, 3, 1], true)]
    #[case(vec![], false)]
    fn closed_detection(#[case] ids: Vec<i64>, #[case] expected: bool) {
        assert_eq!(path_with_ids(ids).is_closed(), expected);
    }

    #[test]
    fn node_order_is_preserved() {
        let path = path_with_ids(vec![1, 3, 2]);
        let ids: Vec<_> = path.nodes.iter().map(|node| node.id).collect();
        assert_eq!(ids, [1, 3, 2]);
    }
}
