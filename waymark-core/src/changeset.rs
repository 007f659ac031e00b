//! Changeset entities and their bounding boxes.

use chrono::{DateTime, Utc};
use geo::{Coord, Rect};

use crate::TagCollection;

/// An axis-aligned bounding box that starts undefined and grows as
/// coordinates are folded in.
///
/// Coordinates are WGS84 with `x = longitude`, `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::Bounds;
///
/// let mut bounds = Bounds::new();
/// assert!(!bounds.is_defined());
/// bounds.extend(Some(Coord { x: 1.2, y: 3.4 }));
/// bounds.extend(Some(Coord { x: 5.6, y: 7.8 }));
/// bounds.extend(None); // undefined input changes nothing
/// assert_eq!(bounds.bottom_left(), Some(Coord { x: 1.2, y: 3.4 }));
/// assert_eq!(bounds.top_right(), Some(Coord { x: 5.6, y: 7.8 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds(Option<Rect<f64>>);

impl Bounds {
    /// Construct an undefined box.
    pub const fn new() -> Self {
        Self(None)
    }

    /// `true` once at least one coordinate has been folded in.
    pub const fn is_defined(&self) -> bool {
        self.0.is_some()
    }

    /// The south-west corner, if the box is defined.
    pub fn bottom_left(&self) -> Option<Coord<f64>> {
        self.0.map(|rect| rect.min())
    }

    /// The north-east corner, if the box is defined.
    pub fn top_right(&self) -> Option<Coord<f64>> {
        self.0.map(|rect| rect.max())
    }

    /// Grow the box to cover `coordinate`. An undefined input is
    /// ignored.
    pub fn extend(&mut self, coordinate: Option<Coord<f64>>) {
        let Some(coordinate) = coordinate else {
            return;
        };
        match &mut self.0 {
            Some(rect) => {
                let min = Coord {
                    x: rect.min().x.min(coordinate.x),
                    y: rect.min().y.min(coordinate.y),
                };
                let max = Coord {
                    x: rect.max().x.max(coordinate.x),
                    y: rect.max().y.max(coordinate.y),
                };
                *rect = Rect::new(min, max);
            }
            None => self.0 = Some(Rect::new(coordinate, coordinate)),
        }
    }
}

/// A changeset entity: the record of one editing session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Changeset {
    /// Changeset identifier.
    pub id: i64,
    /// Number of changes made within the changeset.
    pub num_changes: u32,
    /// Time the changeset was opened.
    pub created_at: DateTime<Utc>,
    /// Time the changeset was closed.
    pub closed_at: DateTime<Utc>,
    /// Identifier of the user who opened the changeset.
    pub uid: i64,
    /// Display name of the user who opened the changeset.
    pub user: String,
    /// Bounding box of all edits in the changeset.
    pub bounds: Bounds,
    /// Tags attached to the changeset.
    pub tags: TagCollection,
}

impl Default for Changeset {
    fn default() -> Self {
        Self {
            id: 0,
            num_changes: 0,
            created_at: DateTime::UNIX_EPOCH,
            closed_at: DateTime::UNIX_EPOCH,
            uid: 0,
            user: String::new(),
            bounds: Bounds::new(),
            tags: TagCollection::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_bounds_have_no_corners() {
        let bounds = Bounds::new();
        assert!(bounds.bottom_left().is_none());
        assert!(bounds.top_right().is_none());
    }

    #[test]
    fn extend_with_undefined_leaves_box_undefined() {
        let mut bounds = Bounds::new();
        bounds.extend(None);
        assert!(!bounds.is_defined());
    }

    #[test]
    fn extend_grows_in_both_directions() {
        let mut bounds = Bounds::new();
        bounds.extend(Some(Coord { x: 3.4, y: 4.5 }));
        bounds.extend(Some(Coord { x: 1.2, y: 7.8 }));
        bounds.extend(Some(Coord { x: 5.6, y: 3.4 }));
        assert_eq!(bounds.bottom_left(), Some(Coord { x: 1.2, y: 3.4 }));
        assert_eq!(bounds.top_right(), Some(Coord { x: 5.6, y: 7.8 }));
    }
}
