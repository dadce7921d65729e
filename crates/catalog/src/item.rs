use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use museum_core::{ArtistId, CategoryId, DomainError, DomainResult, Entity, ItemId};

use crate::location::Location;
use crate::status::ItemStatus;

/// Runtime variant tag of an item (serialized as the record's `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Item,
    Exhibit,
    Painting,
    Sculpture,
    Artifact,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Item => "Item",
            ItemType::Exhibit => "Exhibit",
            ItemType::Painting => "Painting",
            ItemType::Sculpture => "Sculpture",
            ItemType::Artifact => "Artifact",
        }
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintingDetails {
    pub technique: String,
    /// Centimetres.
    pub width: u32,
    /// Centimetres.
    pub height: u32,
    pub has_frame: bool,
}

impl PaintingDetails {
    pub fn new(technique: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            technique: technique.into(),
            width,
            height,
            has_frame: false,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require_text(&self.technique, "technique")?;
        if self.width == 0 || self.height == 0 {
            return Err(DomainError::invalid_data(
                "painting width and height must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SculptureDetails {
    pub material: String,
    /// Kilograms.
    pub weight: f64,
    /// Centimetres.
    pub height: f64,
}

impl SculptureDetails {
    fn validate(&self) -> DomainResult<()> {
        require_text(&self.material, "material")?;
        require_positive(self.weight, "weight")?;
        require_positive(self.height, "height")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactDetails {
    pub origin: String,
    pub period: String,
    pub material: String,
    /// Approximate age in years.
    pub age: f64,
}

impl ArtifactDetails {
    fn validate(&self) -> DomainResult<()> {
        require_text(&self.origin, "origin")?;
        require_text(&self.period, "period")?;
        require_text(&self.material, "material")?;
        require_positive(self.age, "age")
    }
}

/// Type-specific payload of an exhibit.
#[derive(Debug, Clone, PartialEq)]
pub enum ExhibitVariant {
    General,
    Painting(PaintingDetails),
    Sculpture(SculptureDetails),
    Artifact(ArtifactDetails),
}

/// Attribution carried by every exhibit-variant item.
///
/// Category and author are references into their own tables; the location is
/// an embedded value.
#[derive(Debug, Clone, PartialEq)]
pub struct Exhibit {
    pub author: Option<ArtistId>,
    pub category: Option<CategoryId>,
    pub location: Option<Location>,
    pub estimated_value: Option<Decimal>,
    pub image_path: Option<String>,
    pub variant: ExhibitVariant,
}

impl Exhibit {
    pub fn new(category: Option<CategoryId>, variant: ExhibitVariant) -> Self {
        Self {
            author: None,
            category,
            location: None,
            estimated_value: None,
            image_path: None,
            variant,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// An item with no exhibit attribution.
    Plain,
    Exhibit(Exhibit),
}

/// A catalogued object.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub(crate) id: Option<ItemId>,
    pub name: String,
    pub description: String,
    pub creation_date: Option<NaiveDate>,
    pub acquisition_date: Option<NaiveDate>,
    /// Blank until assigned; globally unique once stored.
    pub inventory_number: String,
    pub status: ItemStatus,
    pub kind: ItemKind,
}

impl Item {
    fn with_kind(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            creation_date: None,
            acquisition_date: None,
            inventory_number: String::new(),
            status: ItemStatus::default(),
            kind,
        }
    }

    /// A plain item without exhibit attribution.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, ItemKind::Plain)
    }

    /// An exhibit without type-specific payload.
    pub fn general_exhibit(name: impl Into<String>, category: Option<CategoryId>) -> Self {
        Self::with_kind(
            name,
            ItemKind::Exhibit(Exhibit::new(category, ExhibitVariant::General)),
        )
    }

    pub fn painting(
        name: impl Into<String>,
        category: Option<CategoryId>,
        details: PaintingDetails,
    ) -> Self {
        Self::with_kind(
            name,
            ItemKind::Exhibit(Exhibit::new(category, ExhibitVariant::Painting(details))),
        )
    }

    pub fn sculpture(
        name: impl Into<String>,
        category: Option<CategoryId>,
        details: SculptureDetails,
    ) -> Self {
        Self::with_kind(
            name,
            ItemKind::Exhibit(Exhibit::new(category, ExhibitVariant::Sculpture(details))),
        )
    }

    pub fn artifact(
        name: impl Into<String>,
        category: Option<CategoryId>,
        details: ArtifactDetails,
    ) -> Self {
        Self::with_kind(
            name,
            ItemKind::Exhibit(Exhibit::new(category, ExhibitVariant::Artifact(details))),
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_inventory_number(mut self, number: impl Into<String>) -> Self {
        self.inventory_number = number.into();
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_creation_date(mut self, date: NaiveDate) -> Self {
        self.creation_date = Some(date);
        self
    }

    pub fn with_acquisition_date(mut self, date: NaiveDate) -> Self {
        self.acquisition_date = Some(date);
        self
    }

    /// No effect on plain items.
    pub fn with_author(mut self, author: ArtistId) -> Self {
        if let Some(exhibit) = self.exhibit_mut() {
            exhibit.author = Some(author);
        }
        self
    }

    /// No effect on plain items.
    pub fn with_location(mut self, location: Location) -> Self {
        if let Some(exhibit) = self.exhibit_mut() {
            exhibit.location = Some(location);
        }
        self
    }

    /// No effect on plain items.
    pub fn with_estimated_value(mut self, value: Decimal) -> Self {
        if let Some(exhibit) = self.exhibit_mut() {
            exhibit.estimated_value = Some(value);
        }
        self
    }

    pub fn exhibit(&self) -> Option<&Exhibit> {
        match &self.kind {
            ItemKind::Exhibit(exhibit) => Some(exhibit),
            ItemKind::Plain => None,
        }
    }

    pub fn exhibit_mut(&mut self) -> Option<&mut Exhibit> {
        match &mut self.kind {
            ItemKind::Exhibit(exhibit) => Some(exhibit),
            ItemKind::Plain => None,
        }
    }

    pub fn is_exhibit(&self) -> bool {
        self.exhibit().is_some()
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.exhibit().and_then(|e| e.category)
    }

    pub fn author(&self) -> Option<ArtistId> {
        self.exhibit().and_then(|e| e.author)
    }

    pub fn location(&self) -> Option<&Location> {
        self.exhibit().and_then(|e| e.location.as_ref())
    }

    pub fn item_type(&self) -> ItemType {
        match &self.kind {
            ItemKind::Plain => ItemType::Item,
            ItemKind::Exhibit(exhibit) => match exhibit.variant {
                ExhibitVariant::General => ItemType::Exhibit,
                ExhibitVariant::Painting(_) => ItemType::Painting,
                ExhibitVariant::Sculpture(_) => ItemType::Sculpture,
                ExhibitVariant::Artifact(_) => ItemType::Artifact,
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.item_type().as_str()
    }

    /// Case-insensitive substring match over name, description and inventory
    /// number. A blank query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.inventory_number.to_lowercase().contains(&needle)
    }

    /// Field-level rules. The inventory number is not checked here because an
    /// add may leave it blank for generation.
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        require_text(&self.name, "name")?;

        if self.creation_date.is_some_and(|d| d > today) {
            return Err(DomainError::invalid_data(
                "creation date cannot be in the future",
            ));
        }
        if self.acquisition_date.is_some_and(|d| d > today) {
            return Err(DomainError::invalid_data(
                "acquisition date cannot be in the future",
            ));
        }

        let Some(exhibit) = self.exhibit() else {
            return Ok(());
        };

        if exhibit.estimated_value.is_some_and(|v| v < Decimal::ZERO) {
            return Err(DomainError::invalid_data(
                "estimated value cannot be negative",
            ));
        }

        match &exhibit.variant {
            ExhibitVariant::General => Ok(()),
            ExhibitVariant::Painting(p) => p.validate(),
            ExhibitVariant::Sculpture(s) => s.validate(),
            ExhibitVariant::Artifact(a) => a.validate(),
        }
    }

    /// One-line human summary.
    pub fn display_info(&self) -> String {
        let Some(exhibit) = self.exhibit() else {
            return format!("Item: {}", self.name);
        };
        match &exhibit.variant {
            ExhibitVariant::General => format!("Exhibit: {}", self.name),
            ExhibitVariant::Painting(p) => format!(
                "Painting: {}, technique: {}, size: {}x{} cm, {}",
                self.name,
                p.technique,
                p.width,
                p.height,
                if p.has_frame { "framed" } else { "unframed" }
            ),
            ExhibitVariant::Sculpture(s) => format!(
                "Sculpture: {}, material: {}, height: {:.1} cm, weight: {:.1} kg",
                self.name, s.material, s.height, s.weight
            ),
            ExhibitVariant::Artifact(a) => format!(
                "Artifact: {}, origin: {}, period: {}",
                self.name, a.origin, a.period
            ),
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Option<ItemId> {
        self.id
    }

    fn assign_id(&mut self, id: ItemId) {
        self.id = Some(id);
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name, self.inventory_number)
    }
}

fn require_text(value: &str, field: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_data(format!("{field} is required")));
    }
    Ok(())
}

fn require_positive(value: f64, field: &str) -> DomainResult<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(DomainError::invalid_data(format!("{field} must be positive")));
    }
    Ok(())
}
