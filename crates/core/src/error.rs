//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Kind of stored entity an identifier refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Exhibit,
    Category,
    Artist,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            EntityKind::Exhibit => "exhibit",
            EntityKind::Category => "category",
            EntityKind::Artist => "artist",
        };
        f.write_str(name)
    }
}

/// Domain-level error.
///
/// Every failure is synchronous and leaves stored state untouched; callers
/// decide whether to correct their input and retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing required input on add/update.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An explicit inventory number is already taken by another item.
    #[error("inventory number '{0}' is already in use")]
    DuplicateInventoryNumber(String),

    /// Stale or unknown identifier on get/update/delete.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    /// The external loader/persister failed (I/O, parsing).
    #[error("load/save failed: {0}")]
    Load(String),
}

impl DomainError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    pub fn duplicate_inventory_number(number: impl Into<String>) -> Self {
        Self::DuplicateInventoryNumber(number.into())
    }

    pub fn not_found(entity: EntityKind, id: impl Into<u64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn exhibit_not_found(id: impl Into<u64>) -> Self {
        Self::not_found(EntityKind::Exhibit, id)
    }

    pub fn category_not_found(id: impl Into<u64>) -> Self {
        Self::not_found(EntityKind::Category, id)
    }

    pub fn artist_not_found(id: impl Into<u64>) -> Self {
        Self::not_found(EntityKind::Artist, id)
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// True for any `NotFound`, regardless of entity kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
