//! Storage primitives: keyed in-memory repositories and the inventory number
//! generator.

pub mod inventory_number;
pub mod repository;

pub use inventory_number::{
    DEFAULT_FALLBACK_CODE, DEFAULT_PREFIX, InventoryNumberGenerator, InventoryNumberParts,
};
pub use repository::{InMemoryRepository, Repository};
