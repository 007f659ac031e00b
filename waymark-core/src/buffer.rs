//! Ordered, owned sequences of entities.

use crate::Entity;

/// An ordered, owned run of [`Entity`] values.
///
/// Order is significant and preserved end to end: encoders and the write
/// pipeline never reorder items within or across buffers. Once a buffer
/// is handed to an encoder it travels by move, so exactly one consumer
/// ever reads it.
///
/// # Examples
/// ```
/// use waymark_core::{Buffer, Entity, Meta, Point, TagCollection};
///
/// let mut buffer = Buffer::new();
/// buffer.push(Entity::Point(Point::new(Meta::new(1, 1), TagCollection::new(), None)));
/// assert_eq!(buffer.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buffer(Vec<Entity>);

impl Buffer {
    /// Construct an empty buffer.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Construct an empty buffer with room for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Append an entity, preserving insertion order.
    pub fn push(&mut self, entity: Entity) {
        self.0.push(entity);
    }

    /// Number of entities in the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the buffer holds no entities.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entities in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.0.iter()
    }
}

impl From<Vec<Entity>> for Buffer {
    fn from(entities: Vec<Entity>) -> Self {
        Self(entities)
    }
}

impl FromIterator<Entity> for Buffer {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Buffer {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Buffer {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
