//! `museum-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod counter;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use counter::SequenceCounter;
pub use entity::Entity;
pub use error::{DomainError, DomainResult, EntityKind};
pub use id::{ArtistId, CategoryId, ItemId};
pub use value_object::ValueObject;
