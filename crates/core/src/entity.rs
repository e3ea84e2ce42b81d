//! Entity trait: identity + continuity across state changes.

/// Persisted entity whose identifier is assigned by the store.
///
/// A freshly constructed entity has no identifier; the store hands one out on
/// first insert and it stays stable afterwards.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the identifier, or `None` if the entity was never persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Whether the entity currently maps to a stored row.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
