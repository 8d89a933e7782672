//! Identity and value semantics shared by the domain types.

use core::fmt::Debug;
use core::hash::Hash;

/// Something tracked by id: two entities with the same id are the same thing,
/// whatever their other attributes.
pub trait Entity {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

/// Marker for values compared by their attributes alone, such as a set of
/// measurements. Immutable once built.
pub trait ValueObject: Clone + PartialEq + Debug {}

/// Position of the first entity in `items` with `id`.
pub fn position_by_id<E: Entity>(items: &[E], id: E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
