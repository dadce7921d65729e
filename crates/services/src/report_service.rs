//! Read-only aggregation and CSV export over a fixed snapshot.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use museum_catalog::{Artist, Category, Item, ItemStatus, ItemType, Location};
use museum_core::{ArtistId, CategoryId, Entity};

pub const CSV_HEADER: &str = "ID,Name,Type,Status,InventoryNumber";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ItemStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStatistics {
    pub total_items: usize,
    pub total_categories: usize,
    pub total_artists: usize,
    /// Every status in fixed order, zero counts included.
    pub by_status: Vec<StatusCount>,
    /// Keyed by runtime variant tag; only tags that occur.
    pub by_type: BTreeMap<ItemType, usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportService {
    items: Vec<Item>,
    categories: Vec<Category>,
    artists: Vec<Artist>,
}

impl ReportService {
    pub fn new(items: Vec<Item>, categories: Vec<Category>, artists: Vec<Artist>) -> Self {
        Self {
            items,
            categories,
            artists,
        }
    }

    pub fn generate_general_statistics(&self) -> GeneralStatistics {
        let mut by_type = BTreeMap::new();
        for item in &self.items {
            *by_type.entry(item.item_type()).or_insert(0) += 1;
        }

        GeneralStatistics {
            total_items: self.items.len(),
            total_categories: self.categories.len(),
            total_artists: self.artists.len(),
            by_status: self.get_status_summary(),
            by_type,
        }
    }

    /// Exhibit counts per category name. Exhibits whose category is not in
    /// the snapshot are left out.
    pub fn get_category_statistics(&self) -> BTreeMap<String, usize> {
        let names: HashMap<CategoryId, &str> = self
            .categories
            .iter()
            .filter_map(|c| c.id().map(|id| (id, c.name.as_str())))
            .collect();

        let mut stats = BTreeMap::new();
        for item in self.items.iter().filter(|i| i.is_exhibit()) {
            let Some(category) = item.category() else {
                continue;
            };
            match names.get(&category) {
                Some(name) => *stats.entry((*name).to_string()).or_insert(0) += 1,
                None => tracing::debug!(category = %category, "category missing from report snapshot"),
            }
        }
        stats
    }

    pub fn get_exhibits_by_status(&self, status: ItemStatus) -> Vec<Item> {
        self.filtered(|item| item.status == status)
    }

    pub fn get_exhibits_by_artist(&self, artist: ArtistId) -> Vec<Item> {
        self.filtered(|item| item.author() == Some(artist))
    }

    /// Exhibits placed in the same hall and display as `location`.
    pub fn get_exhibits_by_location(&self, location: &Location) -> Vec<Item> {
        self.filtered(|item| item.location().is_some_and(|l| l.same_place(location)))
    }

    /// Count per status in fixed enumeration order, zero counts included.
    pub fn get_status_summary(&self) -> Vec<StatusCount> {
        ItemStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: self.items.iter().filter(|i| i.status == status).count(),
            })
            .collect()
    }

    /// Comma-separated export: one header line, then one line per item.
    pub fn export_to_csv(&self, items: &[Item]) -> String {
        let mut out = String::with_capacity(CSV_HEADER.len() + 1 + items.len() * 64);
        out.push_str(CSV_HEADER);
        out.push('\n');

        for item in items {
            let id = item.id().map(|id| id.to_string()).unwrap_or_default();
            let row = [
                id.as_str(),
                item.name.as_str(),
                item.type_name(),
                item.status.display_name(),
                item.inventory_number.as_str(),
            ]
            .map(escape_csv)
            .join(",");
            out.push_str(&row);
            out.push('\n');
        }
        out
    }

    fn filtered(&self, predicate: impl Fn(&Item) -> bool) -> Vec<Item> {
        self.items.iter().filter(|i| predicate(i)).cloned().collect()
    }
}

/// Quotes a field containing a comma, quote or line break, doubling inner
/// quotes. Other fields pass through unchanged.
pub fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
