//! Point entities: a tagged, versioned record at a single location.

use geo::Coord;

use crate::{Meta, TagCollection};

/// A point entity.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// location is optional: a point recovered from a partial source may not
/// have been placed yet, and encoders render that state explicitly.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::{Meta, Point, TagCollection};
///
/// let point = Point::new(
///     Meta::new(17, 1),
///     TagCollection::from_pairs([("amenity", "bench")]),
///     Some(Coord { x: 9.5, y: 47.1 }),
/// );
/// assert_eq!(point.meta.id, 17);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Version and provenance metadata.
    pub meta: Meta,
    /// Tags attached to the point.
    pub tags: TagCollection,
    /// Position, if the point has been placed.
    pub location: Option<Coord<f64>>,
}

impl Point {
    /// Construct a point.
    pub const fn new(meta: Meta, tags: TagCollection, location: Option<Coord<f64>>) -> Self {
        Self {
            meta,
            tags,
            location,
        }
    }
}
