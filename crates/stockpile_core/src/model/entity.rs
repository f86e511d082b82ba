//! Capability traits implemented by repository entities.

/// Caller-assigned integer key. Repositories never generate ids.
pub type EntityId = i32;

/// A record that can live in a typed repository.
///
/// Implementors are plain values: `Clone` is used to hand out snapshots that
/// never alias repository storage.
pub trait Entity: Clone {
    /// Stable snake_case label used in log events and error messages.
    const KIND: &'static str;

    /// Unique key of this entity inside one repository.
    fn id(&self) -> EntityId;
}

/// An entity that carries a non-negative stock quantity.
pub trait Stocked: Entity {
    /// Human-readable display name.
    fn name(&self) -> &str;

    /// Current quantity on hand.
    fn quantity(&self) -> u32;

    /// Returns a copy of `self` with only the quantity replaced.
    ///
    /// # Invariants
    /// - `id()` and every other field of the copy equal those of `self`.
    #[must_use]
    fn with_quantity(&self, quantity: u32) -> Self;
}
