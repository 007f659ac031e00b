//! The handler capability trait consumed by the dispatch traversal.

use crate::{
    Area, Changeset, Entity, ObjectRef, Path, PathNodeList, Point, Relation, RelationMemberList,
    Ring, TagCollection,
};

/// A consumer of dispatched entities.
///
/// Implement any subset of the callbacks; the rest default to no-ops.
/// Every callback takes a shared reference, so a traversal can never
/// mutate the entities it visits, and returns `Result` so a failing
/// handler aborts the traversal it is part of.
///
/// [`Handler::dispatch`] is the routing hook: its default body encodes
/// the composite rule (the four primary objects receive [`Handler::object`]
/// first, then their variant callback; changesets and the structural
/// lists receive only their own callback). Implementations normally
/// leave it alone; it is overridden only by the tuple combinators in
/// this module, which fan a whole item out to several handlers in turn.
///
/// # Examples
/// ```
/// use waymark_core::{apply, Buffer, Entity, Handler, Meta, Point, TagCollection};
///
/// #[derive(Default)]
/// struct PointCounter {
///     seen: usize,
/// }
///
/// impl Handler for PointCounter {
///     type Error = std::convert::Infallible;
///
///     fn point(&mut self, _point: &Point) -> Result<(), Self::Error> {
///         self.seen += 1;
///         Ok(())
///     }
/// }
///
/// let mut buffer = Buffer::new();
/// buffer.push(Entity::Point(Point::new(Meta::new(1, 1), TagCollection::new(), None)));
/// let mut counter = PointCounter::default();
/// apply(&buffer, &mut counter)?;
/// assert_eq!(counter.seen, 1);
/// # Ok::<(), std::convert::Infallible>(())
/// ```
pub trait Handler {
    /// Error type produced by failing callbacks.
    type Error;

    /// Called for every primary object before its variant callback.
    fn object(&mut self, _object: ObjectRef<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each point.
    fn point(&mut self, _point: &Point) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each path.
    fn path(&mut self, _path: &Path) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each area.
    fn area(&mut self, _area: &Area) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each relation.
    fn relation(&mut self, _relation: &Relation) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each changeset. Changesets skip [`Handler::object`].
    fn changeset(&mut self, _changeset: &Changeset) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each standalone tag collection.
    fn tags(&mut self, _tags: &TagCollection) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each standalone path node list.
    fn path_nodes(&mut self, _nodes: &PathNodeList) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each standalone relation member list.
    fn members(&mut self, _members: &RelationMemberList) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each standalone outer ring.
    fn outer_ring(&mut self, _ring: &Ring) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each standalone inner ring.
    fn inner_ring(&mut self, _ring: &Ring) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called exactly once after a traversal has visited every item.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Route one entity to the callbacks this handler implements.
    ///
    /// The match is exhaustive over the closed variant set; adding a
    /// variant breaks this method at compile time.
    fn dispatch(&mut self, entity: &Entity) -> Result<(), Self::Error> {
        match entity {
            Entity::Point(point) => {
                self.object(ObjectRef::Point(point))?;
                self.point(point)
            }
            Entity::Path(path) => {
                self.object(ObjectRef::Path(path))?;
                self.path(path)
            }
            Entity::Area(area) => {
                self.object(ObjectRef::Area(area))?;
                self.area(area)
            }
            Entity::Relation(relation) => {
                self.object(ObjectRef::Relation(relation))?;
                self.relation(relation)
            }
            Entity::Changeset(changeset) => self.changeset(changeset),
            Entity::Tags(tags) => self.tags(tags),
            Entity::PathNodes(nodes) => self.path_nodes(nodes),
            Entity::Members(members) => self.members(members),
            Entity::OuterRing(ring) => self.outer_ring(ring),
            Entity::InnerRing(ring) => self.inner_ring(ring),
        }
    }
}

/// Fan items out to several handlers: each handler sees the complete
/// callback sequence for an item before the next handler sees any of it,
/// and flushes run in handler order.
macro_rules! impl_handler_for_tuple {
    ($($handler:ident . $index:tt),+) => {
        impl<E, $($handler),+> Handler for ($($handler,)+)
        where
            $($handler: Handler<Error = E>,)+
        {
            type Error = E;

            fn dispatch(&mut self, entity: &Entity) -> Result<(), E> {
                $(self.$index.dispatch(entity)?;)+
                Ok(())
            }

            fn flush(&mut self) -> Result<(), E> {
                $(self.$index.flush()?;)+
                Ok(())
            }
        }
    };
}

impl_handler_for_tuple!(H1.0, H2.1);
impl_handler_for_tuple!(H1.0, H2.1, H3.2);
impl_handler_for_tuple!(H1.0, H2.1, H3.2, H4.3);
