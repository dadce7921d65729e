//! Composition root wiring repositories, the inventory number generator and
//! the services together.
//!
//! ## Startup
//!
//! ```text
//! load_categories → load_artists → load_exhibits → restore inventory counter
//! ```
//!
//! A failing loader is logged and that entity kind starts empty; startup
//! itself never fails. Items are all-or-nothing: one invalid record or one
//! repeated inventory number fails the whole item load.

use std::collections::HashSet;
use std::sync::Arc;

use museum_catalog::{Artist, Category, Item};
use museum_core::{DomainError, DomainResult, Entity};
use museum_store::{InMemoryRepository, InventoryNumberGenerator, Repository};

use crate::artist_service::ArtistService;
use crate::boundary::{CatalogSink, CatalogSource};
use crate::category_service::CategoryService;
use crate::config::MuseumConfig;
use crate::exhibit_service::ExhibitService;
use crate::report_service::ReportService;
use crate::search_service::SearchService;

/// Per-kind record counts after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub categories: usize,
    pub artists: usize,
    pub items: usize,
}

pub struct Museum {
    config: MuseumConfig,
    items: Arc<InMemoryRepository<Item>>,
    categories: Arc<InMemoryRepository<Category>>,
    artists: Arc<InMemoryRepository<Artist>>,
    numbers: Arc<InventoryNumberGenerator>,
    exhibits: ExhibitService,
    category_service: CategoryService,
    artist_service: ArtistService,
}

impl Museum {
    pub fn new(config: MuseumConfig) -> Self {
        let items: Arc<InMemoryRepository<Item>> = InMemoryRepository::arc();
        let categories: Arc<InMemoryRepository<Category>> = InMemoryRepository::arc();
        let artists: Arc<InMemoryRepository<Artist>> = InMemoryRepository::arc();
        let numbers = Arc::new(InventoryNumberGenerator::with_prefix(
            config.inventory_prefix.clone(),
            config.fallback_category_code.clone(),
        ));

        Self {
            exhibits: ExhibitService::new(items.clone(), categories.clone(), numbers.clone()),
            category_service: CategoryService::new(categories.clone()),
            artist_service: ArtistService::new(artists.clone()),
            config,
            items,
            categories,
            artists,
            numbers,
        }
    }

    pub fn config(&self) -> &MuseumConfig {
        &self.config
    }

    pub fn exhibits(&self) -> &ExhibitService {
        &self.exhibits
    }

    pub fn categories(&self) -> &CategoryService {
        &self.category_service
    }

    pub fn artists(&self) -> &ArtistService {
        &self.artist_service
    }

    pub fn inventory_numbers(&self) -> &InventoryNumberGenerator {
        &self.numbers
    }

    /// Fills the repositories from `source`. Loaded records keep the ids they
    /// were persisted with.
    pub fn load(&self, source: &dyn CatalogSource) -> LoadSummary {
        let summary = LoadSummary {
            categories: store_all(
                "categories",
                source.load_categories(),
                self.categories.as_ref(),
            ),
            artists: store_all("artists", source.load_artists(), self.artists.as_ref()),
            items: store_all(
                "exhibits",
                source.load_exhibits().and_then(unique_inventory_numbers),
                self.items.as_ref(),
            ),
        };

        let items = self.items.find_all();
        self.numbers
            .restore_from(items.iter().map(|item| item.inventory_number.as_str()));

        tracing::info!(
            categories = summary.categories,
            artists = summary.artists,
            items = summary.items,
            "catalogue loaded"
        );
        summary
    }

    /// Writes full snapshots of every entity kind to `sink`.
    pub fn persist(&self, sink: &dyn CatalogSink) -> DomainResult<()> {
        let categories = self.categories.find_all();
        let artists = self.artists.find_all();
        let items = self.items.find_all();

        sink.save_categories(&categories)?;
        sink.save_artists(&artists)?;
        sink.save_exhibits(&items)?;

        tracing::info!(
            categories = categories.len(),
            artists = artists.len(),
            items = items.len(),
            "catalogue persisted"
        );
        Ok(())
    }

    /// Search over the items as they are now.
    pub fn search_service(&self) -> SearchService {
        SearchService::new(self.items.find_all())
    }

    /// Reports over the catalogue as it is now.
    pub fn report_service(&self) -> ReportService {
        ReportService::new(
            self.items.find_all(),
            self.categories.find_all(),
            self.artists.find_all(),
        )
    }
}

impl Default for Museum {
    fn default() -> Self {
        Self::new(MuseumConfig::default())
    }
}

/// Saves `loaded` into `repo` and returns how many distinct records ended up
/// stored.
///
/// Records carrying an id go first so an id-less record can never be handed
/// an id that a later record in the same batch already owns.
fn store_all<T, R>(kind: &str, loaded: DomainResult<Vec<T>>, repo: &R) -> usize
where
    T: Entity,
    R: Repository<T>,
{
    let records = match loaded {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(kind, error = %err, "load failed; continuing with no records");
            return 0;
        }
    };

    let (with_id, without_id): (Vec<T>, Vec<T>) =
        records.into_iter().partition(|r| r.id().is_some());

    let mut ids = HashSet::new();
    for record in with_id {
        if let Some(id) = record.id()
            && !ids.insert(id)
        {
            tracing::warn!(kind, id = ?id, "duplicate id in loaded records; later record wins");
        }
        repo.save(record);
    }

    let fresh = without_id.len();
    for record in without_id {
        repo.save(record);
    }
    ids.len() + fresh
}

/// Rejects the whole batch when two items share an inventory number or an
/// item has none.
fn unique_inventory_numbers(items: Vec<Item>) -> DomainResult<Vec<Item>> {
    {
        let mut seen = HashSet::new();
        for item in &items {
            let number = item.inventory_number.trim();
            if number.is_empty() {
                return Err(DomainError::load(format!(
                    "item '{}' has no inventory number",
                    item.name
                )));
            }
            if !seen.insert(number) {
                return Err(DomainError::load(format!(
                    "inventory number '{number}' appears more than once"
                )));
            }
        }
    }
    Ok(items)
}
