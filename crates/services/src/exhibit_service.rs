//! Exhibit CRUD with validation, inventory-number uniqueness and automatic
//! number assignment.
//!
//! ## Flow of `add_exhibit`
//!
//! ```text
//! Item
//!   ↓
//! 1. Field validation (name, dates, value, variant fields)
//!   ↓
//! 2. Category must exist in the category table
//!   ↓
//! 3. Blank inventory number → generate from the category code
//!    Explicit inventory number → must not be taken
//!   ↓
//! 4. Repository save (id assigned here)
//! ```
//!
//! `update_exhibit` runs the same field and category checks, then requires a
//! non-blank number that no other item holds.
//!
//! A rejected call never writes anything.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use museum_catalog::{Category, Item, ItemStatus};
use museum_core::{ArtistId, CategoryId, DomainError, DomainResult, Entity, ItemId};
use museum_store::{InventoryNumberGenerator, Repository};

pub struct ExhibitService {
    items: Arc<dyn Repository<Item>>,
    categories: Arc<dyn Repository<Category>>,
    numbers: Arc<InventoryNumberGenerator>,
}

impl ExhibitService {
    pub fn new(
        items: Arc<dyn Repository<Item>>,
        categories: Arc<dyn Repository<Category>>,
        numbers: Arc<InventoryNumberGenerator>,
    ) -> Self {
        Self {
            items,
            categories,
            numbers,
        }
    }

    /// Validates and stores a new exhibit, returning it with id and inventory
    /// number populated.
    pub fn add_exhibit(&self, item: Item) -> DomainResult<Item> {
        self.add_exhibit_on(item, today())
    }

    fn add_exhibit_on(&self, mut item: Item, today: NaiveDate) -> DomainResult<Item> {
        if item.name.trim().is_empty() {
            return Err(reject(DomainError::invalid_data("exhibit name is required")));
        }
        if item.category().is_none() {
            return Err(reject(DomainError::invalid_data(
                "exhibit category is required",
            )));
        }
        item.validate(today).map_err(reject)?;
        let category = self.known_category(&item)?;

        let explicit = item.inventory_number.trim().to_string();
        if explicit.is_empty() {
            item.inventory_number = self.numbers.generate(Some(&category.code));
        } else {
            if self.inventory_number_owner(&explicit).is_some() {
                return Err(reject(DomainError::duplicate_inventory_number(explicit)));
            }
            item.inventory_number = explicit;
        }

        let stored = self.items.save(item);
        tracing::info!(
            id = ?stored.id(),
            inventory_number = %stored.inventory_number,
            kind = stored.type_name(),
            "exhibit added"
        );
        Ok(stored)
    }

    /// Full overwrite of an existing exhibit.
    pub fn update_exhibit(&self, item: Item) -> DomainResult<Item> {
        self.update_exhibit_on(item, today())
    }

    fn update_exhibit_on(&self, mut item: Item, today: NaiveDate) -> DomainResult<Item> {
        let Some(id) = item.id() else {
            return Err(reject(DomainError::invalid_data("exhibit id is required")));
        };
        if item.name.trim().is_empty() {
            return Err(reject(DomainError::invalid_data("exhibit name is required")));
        }
        if !self.items.exists(id) {
            return Err(reject(DomainError::exhibit_not_found(id)));
        }
        item.validate(today).map_err(reject)?;
        self.known_category(&item)?;

        let number = item.inventory_number.trim().to_string();
        if number.is_empty() {
            return Err(reject(DomainError::invalid_data(
                "inventory number cannot be blank on update",
            )));
        }
        if self
            .inventory_number_owner(&number)
            .is_some_and(|owner| owner != id)
        {
            return Err(reject(DomainError::duplicate_inventory_number(number)));
        }
        item.inventory_number = number;

        let stored = self.items.save(item);
        tracing::info!(id = %id, "exhibit updated");
        Ok(stored)
    }

    /// The stored category `item` points at. Missing and unknown categories
    /// are both invalid data.
    fn known_category(&self, item: &Item) -> DomainResult<Category> {
        let Some(category_id) = item.category() else {
            return Err(reject(DomainError::invalid_data(
                "exhibit category is required",
            )));
        };
        self.categories.find_by_id(category_id).ok_or_else(|| {
            reject(DomainError::invalid_data(format!(
                "category {category_id} does not exist"
            )))
        })
    }

    pub fn delete_exhibit(&self, id: ItemId) -> DomainResult<()> {
        if !self.items.delete_by_id(id) {
            return Err(reject(DomainError::exhibit_not_found(id)));
        }
        tracing::info!(id = %id, "exhibit deleted");
        Ok(())
    }

    pub fn get_exhibit(&self, id: ItemId) -> DomainResult<Item> {
        self.items
            .find_by_id(id)
            .ok_or_else(|| DomainError::exhibit_not_found(id))
    }

    pub fn get_all_exhibits(&self) -> Vec<Item> {
        self.items.find_all()
    }

    /// Case-insensitive substring match on the name. A blank query matches
    /// nothing.
    pub fn search_by_name(&self, name: &str) -> Vec<Item> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.items
            .find_matching(&|item: &Item| item.name.to_lowercase().contains(&needle))
    }

    pub fn find_by_inventory_number(&self, number: &str) -> Option<Item> {
        let number = number.trim();
        if number.is_empty() {
            return None;
        }
        self.items
            .find_first(&|item: &Item| item.inventory_number == number)
    }

    /// Exhibits in `category`; `None` returns every item.
    pub fn filter_by_category(&self, category: Option<CategoryId>) -> Vec<Item> {
        match category {
            None => self.items.find_all(),
            Some(id) => self
                .items
                .find_matching(&|item: &Item| item.category() == Some(id)),
        }
    }

    /// Exhibits attributed to `author`; `None` returns every item.
    pub fn filter_by_author(&self, author: Option<ArtistId>) -> Vec<Item> {
        match author {
            None => self.items.find_all(),
            Some(id) => self
                .items
                .find_matching(&|item: &Item| item.author() == Some(id)),
        }
    }

    /// Items (plain or exhibit) in `status`; `None` returns every item.
    pub fn filter_by_status(&self, status: Option<ItemStatus>) -> Vec<Item> {
        match status {
            None => self.items.find_all(),
            Some(status) => self
                .items
                .find_matching(&|item: &Item| item.status == status),
        }
    }

    pub fn get_total_count(&self) -> usize {
        self.items.count()
    }

    fn inventory_number_owner(&self, number: &str) -> Option<ItemId> {
        self.items
            .find_first(&|item: &Item| item.inventory_number == number)
            .and_then(|item| item.id())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn reject(err: DomainError) -> DomainError {
    tracing::warn!(error = %err, "exhibit operation rejected");
    err
}
