//! Flat serialized form of an item, exchanged with loaders and persisters.
//!
//! The `type` discriminator decides which variant-specific fields are present.
//! Category and author travel as ids; the location is embedded.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use museum_core::{ArtistId, CategoryId, DomainError, DomainResult, Entity, ItemId};

use crate::item::{
    ArtifactDetails, Exhibit, ExhibitVariant, Item, ItemKind, ItemType, PaintingDetails,
    SculptureDetails,
};
use crate::location::Location;
use crate::status::ItemStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(default)]
    pub inventory_number: String,
    #[serde(default)]
    pub status: ItemStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<ArtistId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    // Painting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_frame: Option<bool>,

    // Painting (whole centimetres) and Sculpture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    // Sculpture and Artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    // Artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        let mut record = ItemRecord {
            item_type: item.item_type(),
            id: item.id(),
            name: item.name.clone(),
            description: item.description.clone(),
            creation_date: item.creation_date,
            acquisition_date: item.acquisition_date,
            inventory_number: item.inventory_number.clone(),
            status: item.status,
            author: None,
            category: None,
            location: None,
            estimated_value: None,
            image_path: None,
            technique: None,
            width: None,
            has_frame: None,
            height: None,
            material: None,
            weight: None,
            origin: None,
            period: None,
            age: None,
        };

        let ItemKind::Exhibit(exhibit) = &item.kind else {
            return record;
        };

        record.author = exhibit.author;
        record.category = exhibit.category;
        record.location = exhibit.location.clone();
        record.estimated_value = exhibit.estimated_value;
        record.image_path = exhibit.image_path.clone();

        match &exhibit.variant {
            ExhibitVariant::General => {}
            ExhibitVariant::Painting(p) => {
                record.technique = Some(p.technique.clone());
                record.width = Some(p.width);
                record.height = Some(f64::from(p.height));
                record.has_frame = Some(p.has_frame);
            }
            ExhibitVariant::Sculpture(s) => {
                record.material = Some(s.material.clone());
                record.weight = Some(s.weight);
                record.height = Some(s.height);
            }
            ExhibitVariant::Artifact(a) => {
                record.origin = Some(a.origin.clone());
                record.period = Some(a.period.clone());
                record.material = Some(a.material.clone());
                record.age = Some(a.age);
            }
        }

        record
    }
}

impl ItemRecord {
    /// Rebuilds the item and runs the same field rules as an add, with `today`
    /// as the bound for dates.
    pub fn into_item_on(self, today: NaiveDate) -> DomainResult<Item> {
        let record = self;
        let kind = match record.item_type {
            ItemType::Item => ItemKind::Plain,
            other => {
                let variant = match other {
                    ItemType::Painting => ExhibitVariant::Painting(PaintingDetails {
                        technique: field(record.technique.clone(), "Painting", "technique")?,
                        width: field(record.width, "Painting", "width")?,
                        height: whole_centimetres(field(record.height, "Painting", "height")?)?,
                        has_frame: record.has_frame.unwrap_or(false),
                    }),
                    ItemType::Sculpture => ExhibitVariant::Sculpture(SculptureDetails {
                        material: field(record.material.clone(), "Sculpture", "material")?,
                        weight: field(record.weight, "Sculpture", "weight")?,
                        height: field(record.height, "Sculpture", "height")?,
                    }),
                    ItemType::Artifact => ExhibitVariant::Artifact(ArtifactDetails {
                        origin: field(record.origin.clone(), "Artifact", "origin")?,
                        period: field(record.period.clone(), "Artifact", "period")?,
                        material: field(record.material.clone(), "Artifact", "material")?,
                        age: field(record.age, "Artifact", "age")?,
                    }),
                    _ => ExhibitVariant::General,
                };
                ItemKind::Exhibit(Exhibit {
                    author: record.author,
                    category: record.category,
                    location: record.location,
                    estimated_value: record.estimated_value,
                    image_path: record.image_path,
                    variant,
                })
            }
        };

        let mut item = Item {
            name: record.name,
            description: record.description,
            creation_date: record.creation_date,
            acquisition_date: record.acquisition_date,
            inventory_number: record.inventory_number,
            status: record.status,
            kind,
            ..Item::new("")
        };
        if let Some(id) = record.id {
            item.assign_id(id);
        }
        item.validate(today)?;
        Ok(item)
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        record.into_item_on(Local::now().date_naive())
    }
}

fn field<T>(value: Option<T>, type_name: &str, name: &str) -> DomainResult<T> {
    value.ok_or_else(|| {
        DomainError::invalid_data(format!("{type_name} record is missing '{name}'"))
    })
}

fn whole_centimetres(value: f64) -> DomainResult<u32> {
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(DomainError::invalid_data(format!(
            "painting height must be a whole number of centimetres, got {value}"
        )));
    }
    Ok(value as u32)
}
