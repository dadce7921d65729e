//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An entity starts without an identifier and receives one exactly once, when
/// a repository stores it for the first time.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Ord + core::hash::Hash + core::fmt::Debug + From<u64> + Into<u64>;

    /// Returns the identifier, or `None` if the entity was never stored.
    fn id(&self) -> Option<Self::Id>;

    /// Assigns the identifier. Only repositories call this.
    fn assign_id(&mut self, id: Self::Id);
}
