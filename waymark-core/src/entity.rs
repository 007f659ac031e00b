//! The closed entity sum type and its tag enum.

use crate::{
    Area, Changeset, DecodeError, Meta, Path, PathNodeList, Point, Relation, RelationMemberList,
    Ring, TagCollection,
};

/// One type-tagged record in a [`Buffer`](crate::Buffer).
///
/// The variant set is closed: four primary objects, the changeset, and
/// five structural lists that can also appear as standalone items.
/// Dispatch sites match on this enum exhaustively, so extending the set
/// is a compile-time event, never a runtime surprise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entity {
    /// A point object.
    Point(Point),
    /// A path object.
    Path(Path),
    /// An area object.
    Area(Area),
    /// A relation object.
    Relation(Relation),
    /// A changeset record.
    Changeset(Changeset),
    /// A standalone tag collection.
    Tags(TagCollection),
    /// A standalone path node list.
    PathNodes(PathNodeList),
    /// A standalone relation member list.
    Members(RelationMemberList),
    /// A standalone outer ring.
    OuterRing(Ring),
    /// A standalone inner ring.
    InnerRing(Ring),
}

impl Entity {
    /// The tag of this entity's variant.
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Point(_) => EntityKind::Point,
            Self::Path(_) => EntityKind::Path,
            Self::Area(_) => EntityKind::Area,
            Self::Relation(_) => EntityKind::Relation,
            Self::Changeset(_) => EntityKind::Changeset,
            Self::Tags(_) => EntityKind::Tags,
            Self::PathNodes(_) => EntityKind::PathNodes,
            Self::Members(_) => EntityKind::Members,
            Self::OuterRing(_) => EntityKind::OuterRing,
            Self::InnerRing(_) => EntityKind::InnerRing,
        }
    }
}

/// The closed set of entity variant tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// Tag of [`Entity::Point`].
    Point,
    /// Tag of [`Entity::Path`].
    Path,
    /// Tag of [`Entity::Area`].
    Area,
    /// Tag of [`Entity::Relation`].
    Relation,
    /// Tag of [`Entity::Changeset`].
    Changeset,
    /// Tag of [`Entity::Tags`].
    Tags,
    /// Tag of [`Entity::PathNodes`].
    PathNodes,
    /// Tag of [`Entity::Members`].
    Members,
    /// Tag of [`Entity::OuterRing`].
    OuterRing,
    /// Tag of [`Entity::InnerRing`].
    InnerRing,
}

impl EntityKind {
    /// The storage tag byte for this variant.
    pub const fn tag(self) -> u8 {
        match self {
            Self::Point => b'n',
            Self::Path => b'w',
            Self::Area => b'a',
            Self::Relation => b'r',
            Self::Changeset => b'c',
            Self::Tags => b'T',
            Self::PathNodes => b'N',
            Self::Members => b'M',
            Self::OuterRing => b'O',
            Self::InnerRing => b'I',
        }
    }

    /// Parse a storage tag byte.
    ///
    /// # Errors
    /// Returns [`DecodeError::UnknownEntityTag`] for bytes outside the
    /// closed set. That is always fatal for the data the byte came from:
    /// it indicates corruption, and no traversal may continue past it.
    pub const fn from_tag(tag: u8) -> Result<Self, DecodeError> {
        match tag {
            b'n' => Ok(Self::Point),
            b'w' => Ok(Self::Path),
            b'a' => Ok(Self::Area),
            b'r' => Ok(Self::Relation),
            b'c' => Ok(Self::Changeset),
            b'T' => Ok(Self::Tags),
            b'N' => Ok(Self::PathNodes),
            b'M' => Ok(Self::Members),
            b'O' => Ok(Self::OuterRing),
            b'I' => Ok(Self::InnerRing),
            _ => Err(DecodeError::UnknownEntityTag { tag }),
        }
    }
}

/// A borrowed view over the four primary object variants.
///
/// Handlers receive this in the generic-object callback before the
/// variant-specific one, giving uniform access to the metadata and tags
/// shared by all objects.
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    /// A borrowed point.
    Point(&'a Point),
    /// A borrowed path.
    Path(&'a Path),
    /// A borrowed area.
    Area(&'a Area),
    /// A borrowed relation.
    Relation(&'a Relation),
}

impl<'a> ObjectRef<'a> {
    /// The object's metadata.
    pub const fn meta(&self) -> &'a Meta {
        match self {
            Self::Point(point) => &point.meta,
            Self::Path(path) => &path.meta,
            Self::Area(area) => &area.meta,
            Self::Relation(relation) => &relation.meta,
        }
    }

    /// The object's tags.
    pub const fn tags(&self) -> &'a TagCollection {
        match self {
            Self::Point(point) => &point.tags,
            Self::Path(path) => &path.tags,
            Self::Area(area) => &area.tags,
            Self::Relation(relation) => &relation.tags,
        }
    }

    /// The object's identifier.
    pub const fn id(&self) -> i64 {
        self.meta().id
    }
}
