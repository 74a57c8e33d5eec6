//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Business units, companies and users are entities: two records with the same
/// id are the same thing even when a later fetch changed their name.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Identity comparison, ignoring every other attribute.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
