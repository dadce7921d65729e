//! Load/save boundary with external persistence collaborators.
//!
//! Every save replaces the whole previously persisted set for that entity
//! kind; there are no incremental writes.

use std::sync::{Mutex, PoisonError};

use museum_catalog::{Artist, Category, Item, ItemRecord};
use museum_core::{DomainError, DomainResult};

/// Supplies the initial catalogue. Categories and artists are loaded before
/// items so item references resolve.
pub trait CatalogSource {
    fn load_categories(&self) -> DomainResult<Vec<Category>>;
    fn load_artists(&self) -> DomainResult<Vec<Artist>>;
    fn load_exhibits(&self) -> DomainResult<Vec<Item>>;
}

/// Receives full snapshots of the catalogue.
pub trait CatalogSink {
    fn save_categories(&self, categories: &[Category]) -> DomainResult<()>;
    fn save_artists(&self, artists: &[Artist]) -> DomainResult<()>;
    fn save_exhibits(&self, items: &[Item]) -> DomainResult<()>;
}

/// In-memory source/sink holding items in their serialized record form.
///
/// Useful as a test double and for moving a catalogue between two
/// [`Museum`](crate::Museum) instances.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    categories: Mutex<Vec<Category>>,
    artists: Mutex<Vec<Artist>>,
    records: Mutex<Vec<ItemRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(
        categories: Vec<Category>,
        artists: Vec<Artist>,
        records: Vec<ItemRecord>,
    ) -> Self {
        Self {
            categories: Mutex::new(categories),
            artists: Mutex::new(artists),
            records: Mutex::new(records),
        }
    }

    /// Persisted item records, as a persister would write them.
    pub fn records(&self) -> Vec<ItemRecord> {
        lock(&self.records).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CatalogSource for InMemoryCatalog {
    fn load_categories(&self) -> DomainResult<Vec<Category>> {
        Ok(lock(&self.categories).clone())
    }

    fn load_artists(&self) -> DomainResult<Vec<Artist>> {
        Ok(lock(&self.artists).clone())
    }

    fn load_exhibits(&self) -> DomainResult<Vec<Item>> {
        lock(&self.records)
            .iter()
            .cloned()
            .map(|record| {
                let name = record.name.clone();
                Item::try_from(record)
                    .map_err(|e| DomainError::load(format!("item record '{name}': {e}")))
            })
            .collect()
    }
}

impl CatalogSink for InMemoryCatalog {
    fn save_categories(&self, categories: &[Category]) -> DomainResult<()> {
        *lock(&self.categories) = categories.to_vec();
        Ok(())
    }

    fn save_artists(&self, artists: &[Artist]) -> DomainResult<()> {
        *lock(&self.artists) = artists.to_vec();
        Ok(())
    }

    fn save_exhibits(&self, items: &[Item]) -> DomainResult<()> {
        *lock(&self.records) = items.iter().map(ItemRecord::from).collect();
        Ok(())
    }
}
