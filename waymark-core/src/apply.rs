//! Type-dispatch traversal over entity sequences.

use crate::{Entity, Handler};

/// Route a single entity through `handler`.
///
/// # Errors
/// Propagates the first callback error.
pub fn apply_item<H: Handler>(entity: &Entity, handler: &mut H) -> Result<(), H::Error> {
    handler.dispatch(entity)
}

/// Traverse `items` in order, routing every entity through `handler`,
/// then flush.
///
/// `handler` may be a single [`Handler`] or a tuple of handlers; tuples
/// give every handler the full callback sequence for an item, in supply
/// order, before the next item is visited. The traversal borrows the
/// items and the handlers only for its own duration and keeps no state,
/// so it is freely reentrant.
///
/// # Errors
/// Stops at the first callback error and propagates it; later items are
/// not visited and no flush runs.
pub fn apply<'a, I, H>(items: I, handler: &mut H) -> Result<(), H::Error>
where
    I: IntoIterator<Item = &'a Entity>,
    H: Handler,
{
    for entity in items {
        handler.dispatch(entity)?;
    }
    handler.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Buffer, Changeset, Meta, ObjectRef, PathNodeList, Point, TagCollection,
    };

    /// Records the callback sequence it observes.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Handler for Recorder {
        type Error = std::convert::Infallible;

        fn object(&mut self, object: ObjectRef<'_>) -> Result<(), Self::Error> {
            self.calls.push(format!("object:{}", object.id()));
            Ok(())
        }

        fn point(&mut self, point: &Point) -> Result<(), Self::Error> {
            self.calls.push(format!("point:{}", point.meta.id));
            Ok(())
        }

        fn changeset(&mut self, changeset: &Changeset) -> Result<(), Self::Error> {
            self.calls.push(format!("changeset:{}", changeset.id));
            Ok(())
        }

        fn path_nodes(&mut self, nodes: &PathNodeList) -> Result<(), Self::Error> {
            self.calls.push(format!("path_nodes:{}", nodes.len()));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.calls.push("flush".into());
            Ok(())
        }
    }

    fn point_entity(id: i64) -> Entity {
        Entity::Point(Point::new(Meta::new(id, 1), TagCollection::new(), None))
    }

    #[test]
    fn objects_get_generic_callback_before_variant_callback() {
        let mut buffer = Buffer::new();
        buffer.push(point_entity(7));
        let mut recorder = Recorder::default();
        apply(&buffer, &mut recorder).unwrap();
        assert_eq!(recorder.calls, ["object:7", "point:7", "flush"]);
    }

    #[test]
    fn changesets_skip_the_generic_callback() {
        let entity = Entity::Changeset(Changeset {
            id: 42,
            ..Changeset::default()
        });
        let mut recorder = Recorder::default();
        apply_item(&entity, &mut recorder).unwrap();
        assert_eq!(recorder.calls, ["changeset:42"]);
    }

    #[test]
    fn structural_items_invoke_only_their_own_callback() {
        let entity = Entity::PathNodes(PathNodeList::from_ids([1, 2]));
        let mut recorder = Recorder::default();
        apply_item(&entity, &mut recorder).unwrap();
        assert_eq!(recorder.calls, ["path_nodes:2"]);
    }

    #[test]
    fn flush_runs_once_after_all_items() {
        let buffer: Buffer = vec![point_entity(1), point_entity(2)].into();
        let mut recorder = Recorder::default();
        apply(&buffer, &mut recorder).unwrap();
        assert_eq!(
            recorder.calls,
            ["object:1", "point:1", "object:2", "point:2", "flush"]
        );
    }

    /// Fails on the point with the configured id.
    struct FailOn {
        id: i64,
        visited: Vec<i64>,
    }

    impl Handler for FailOn {
        type Error = String;

        fn point(&mut self, point: &Point) -> Result<(), Self::Error> {
            if point.meta.id == self.id {
                return Err(format!("boom at {}", point.meta.id));
            }
            self.visited.push(point.meta.id);
            Ok(())
        }
    }

    #[test]
    fn first_error_aborts_the_traversal() {
        let buffer: Buffer = vec![point_entity(1), point_entity(2), point_entity(3)].into();
        let mut handler = FailOn {
            id: 2,
            visited: Vec::new(),
        };
        let result = apply(&buffer, &mut handler);
        assert_eq!(result.unwrap_err(), "boom at 2");
        // Item 3 must never be visited once item 2 has failed.
        assert_eq!(handler.visited, [1]);
    }

    #[test]
    fn empty_sequence_still_flushes() {
        let buffer = Buffer::new();
        let mut recorder = Recorder::default();
        apply(&buffer, &mut recorder).unwrap();
        assert_eq!(recorder.calls, ["flush"]);
    }
}
