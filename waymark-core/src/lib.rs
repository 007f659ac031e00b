//! Entity model and type-dispatch traversal for the waymark pipeline.
//!
//! A [`Buffer`] holds an ordered run of heterogeneous [`Entity`] values:
//! points, paths, areas, relations, changesets, and the structural lists
//! that appear inside them. The [`apply`] traversal routes every entity to
//! the matching callbacks of one or more [`Handler`] implementations with
//! static dispatch; the closed set of variants is matched exhaustively, so
//! adding a variant forces every dispatch site to be revisited at compile
//! time.

#![forbid(unsafe_code)]

mod apply;
mod area;
mod buffer;
mod changeset;
mod entity;
mod error;
mod handler;
mod meta;
mod path;
mod point;
mod relation;
mod tags;

pub use apply::{apply, apply_item};
pub use area::{Area, AreaError, Ring, RingGroup};
pub use buffer::Buffer;
pub use changeset::{Bounds, Changeset};
pub use entity::{Entity, EntityKind, ObjectRef};
pub use error::DecodeError;
pub use handler::Handler;
pub use meta::Meta;
pub use path::{NodeRef, Path, PathNodeList};
pub use point::Point;
pub use relation::{MemberKind, Relation, RelationMember, RelationMemberList};
pub use tags::{Tag, TagCollection};
