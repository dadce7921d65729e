//! Snapshot-based multi-predicate search.
//!
//! `SearchService` holds its own copy of the item list. It does not observe
//! the repository; call [`SearchService::update_exhibits`] to refresh it.

use chrono::{Datelike, NaiveDate};

use museum_catalog::{Item, ItemStatus};
use museum_core::{ArtistId, CategoryId};

#[derive(Debug, Clone, Default)]
pub struct SearchService {
    items: Vec<Item>,
}

impl SearchService {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Replaces the snapshot.
    pub fn update_exhibits(&mut self, items: Vec<Item>) {
        tracing::debug!(count = items.len(), "search snapshot refreshed");
        self.items = items;
    }

    pub fn snapshot(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive match over name, description and inventory number.
    /// A blank query returns the whole snapshot.
    pub fn search(&self, query: &str) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| item.matches_query(query))
            .cloned()
            .collect()
    }

    /// Narrows the snapshot by query, then category, then author, then
    /// status. Each of the last three, when given, also drops every item that
    /// is not an exhibit.
    pub fn advanced_search(
        &self,
        query: Option<&str>,
        category: Option<CategoryId>,
        author: Option<ArtistId>,
        status: Option<ItemStatus>,
    ) -> Vec<Item> {
        let mut candidates: Vec<&Item> = self.items.iter().collect();

        if let Some(query) = query {
            candidates.retain(|item| item.matches_query(query));
        }
        if let Some(category) = category {
            candidates.retain(|item| item.is_exhibit() && item.category() == Some(category));
        }
        if let Some(author) = author {
            candidates.retain(|item| item.is_exhibit() && item.author() == Some(author));
        }
        if let Some(status) = status {
            candidates.retain(|item| item.is_exhibit() && item.status == status);
        }

        candidates.into_iter().cloned().collect()
    }

    /// Items created within `start_year..=end_year`. Undated items are
    /// excluded.
    pub fn find_by_creation_period(&self, start_year: i32, end_year: i32) -> Vec<Item> {
        self.by_year(start_year, end_year, |item| item.creation_date)
    }

    /// Items acquired within `start_year..=end_year`. Undated items are
    /// excluded.
    pub fn find_by_acquisition_period(&self, start_year: i32, end_year: i32) -> Vec<Item> {
        self.by_year(start_year, end_year, |item| item.acquisition_date)
    }

    /// Items whose inventory number starts with `prefix`. Unlike
    /// [`search`](Self::search), a blank prefix matches nothing.
    pub fn find_by_inventory_number_start(&self, prefix: &str) -> Vec<Item> {
        if prefix.trim().is_empty() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| item.inventory_number.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn by_year(
        &self,
        start_year: i32,
        end_year: i32,
        date: impl Fn(&Item) -> Option<NaiveDate>,
    ) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| {
                date(item).is_some_and(|d| (start_year..=end_year).contains(&d.year()))
            })
            .cloned()
            .collect()
    }
}
