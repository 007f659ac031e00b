//! Relation entities: typed, role-carrying references to other entities.

use crate::{DecodeError, Meta, TagCollection};

/// The kind of entity a relation member refers to.
///
/// On the wire each kind is a single character; [`MemberKind::from_char`]
/// rejects anything outside the closed set as data corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    /// The member is a point.
    Point,
    /// The member is a path.
    Path,
    /// The member is another relation.
    Relation,
}

impl MemberKind {
    /// The wire character for this kind.
    pub const fn as_char(self) -> char {
        match self {
            Self::Point => 'n',
            Self::Path => 'w',
            Self::Relation => 'r',
        }
    }

    /// Parse a wire character.
    ///
    /// # Errors
    /// Returns [`DecodeError::UnknownMemberKind`] for characters outside
    /// the closed set; this indicates corrupt input, not a recoverable
    /// state.
    pub const fn from_char(found: char) -> Result<Self, DecodeError> {
        match found {
            'n' => Ok(Self::Point),
            'w' => Ok(Self::Path),
            'r' => Ok(Self::Relation),
            _ => Err(DecodeError::UnknownMemberKind { found }),
        }
    }
}

/// One member of a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationMember {
    /// Kind of the referenced entity.
    pub kind: MemberKind,
    /// Identifier of the referenced entity.
    pub id: i64,
    /// Role the member plays within the relation.
    pub role: String,
}

impl RelationMember {
    /// Construct a member.
    pub fn new(kind: MemberKind, id: i64, role: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            role: role.into(),
        }
    }
}

/// The ordered members of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationMemberList(Vec<RelationMember>);

impl RelationMemberList {
    /// Construct an empty list.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a member.
    pub fn push(&mut self, member: RelationMember) {
        self.0.push(member);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the relation has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RelationMember> {
        self.0.iter()
    }
}

impl FromIterator<RelationMember> for RelationMemberList {
    fn from_iter<I: IntoIterator<Item = RelationMember>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RelationMemberList {
    type Item = &'a RelationMember;
    type IntoIter = std::slice::Iter<'a, RelationMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A relation entity: metadata, tags, and an ordered member list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    /// Version and provenance metadata.
    pub meta: Meta,
    /// Tags attached to the relation.
    pub tags: TagCollection,
    /// Ordered members of the relation.
    pub members: RelationMemberList,
}

impl Relation {
    /// Construct a relation.
    pub const fn new(meta: Meta, tags: TagCollection, members: RelationMemberList) -> Self {
        Self {
            meta,
            tags,
            members,
        }
    }
}
