//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Parts and products are compared by identity in the store: two records with
/// the same id are the same entity, even if an update changed every other field.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Display name, used by name searches.
    fn name(&self) -> &str;
}
