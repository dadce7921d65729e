//! Value object trait: equality by value, not identity.
//!
//! A value object has **no identity**. It is defined entirely by its
//! attributes, so two value objects with the same attributes are equal and
//! interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They never
/// receive a repository-assigned id.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: two instances with the same attributes are equal
/// - **Entity**: two instances with the same id are the same record, even if
///   their other fields differ (see [`crate::Entity`])
///
/// In the catalogue a display location (`hall "East", case "A1", 3 of 10
/// occupied`) is a value object, while an item, category or artist is an
/// entity.
///
/// ## Immutability
///
/// Once built, a value object does not change. "Changing" one means building
/// a new value, usually through a `with_*` method that consumes the old one
/// and re-checks the invariants. Owners holding the old value keep seeing it
/// unchanged.
///
/// ## Design Constraints
///
/// The trait requires `Clone` (values are copied, not shared by reference),
/// `PartialEq` (comparison is by attributes) and `Debug` (values show up in
/// logs and test failures).
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Shelf {
///     room: String,
///     slots: u32,
///     used: u32,
/// }
///
/// impl ValueObject for Shelf {}
///
/// impl Shelf {
///     fn with_used(self, used: u32) -> DomainResult<Self> {
///         if used > self.slots {
///             return Err(DomainError::invalid_data("shelf is full"));
///         }
///         Ok(Self { used, ..self })
///     }
/// }
///
/// let empty = Shelf { room: "Archive".into(), slots: 4, used: 0 };
/// let busy = empty.clone().with_used(2)?;
/// assert_ne!(empty, busy); // a new value; `empty` is untouched
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
