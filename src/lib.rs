//! Facade crate for the waymark encode pipeline.
//!
//! Re-exports the entity model and dispatch traversal from
//! `waymark-core` and the order-preserving writer pipeline from
//! `waymark-io`, so most applications depend on this crate alone.

#![forbid(unsafe_code)]

pub use waymark_core::{
    Area, AreaError, Bounds, Buffer, Changeset, DecodeError, Entity, EntityKind, Handler,
    MemberKind, Meta, NodeRef, ObjectRef, Path, PathNodeList, Point, Relation, RelationMember,
    RelationMemberList, Ring, RingGroup, Tag, TagCollection, apply, apply_item,
};

pub use waymark_io::{
    BlockFormat, BlockQueue, BlockResult, Compressor, DEFAULT_QUEUE_DEPTH, EncodeError,
    LineEncoder, LineFormat, PendingBlock, PlainCompressor, WorkerPool, WriteError, Writer,
    WriterOptions,
};

#[cfg(feature = "compress-bz2")]
pub use waymark_io::Bzip2Compressor;
