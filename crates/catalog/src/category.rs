use serde::{Deserialize, Serialize};

use museum_core::{CategoryId, DomainError, DomainResult, Entity};

/// Node of the classification tree.
///
/// Parent/child links are ids resolved through the category table, never
/// owning pointers. Each setter below maintains one side of a link only;
/// `CategoryService` keeps both directions consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    id: Option<CategoryId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    parent: Option<CategoryId>,
    #[serde(default)]
    children: Vec<CategoryId>,
}

impl Category {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            code: code.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_data("category name is required"));
        }
        Ok(())
    }

    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    /// Child ids in insertion order.
    pub fn children(&self) -> &[CategoryId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn set_parent(&mut self, parent: Option<CategoryId>) {
        self.parent = parent;
    }

    /// Appends `child` unless it is already listed.
    pub fn add_child(&mut self, child: CategoryId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Returns whether `child` was listed.
    pub fn remove_child(&mut self, child: CategoryId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != child);
        self.children.len() != before
    }

    /// Copies the descriptive fields of `other`, keeping id and links.
    pub fn overwrite_details(&mut self, other: &Category) {
        self.name = other.name.clone();
        self.description = other.description.clone();
        self.code = other.code.clone();
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> Option<CategoryId> {
        self.id
    }

    fn assign_id(&mut self, id: CategoryId) {
        self.id = Some(id);
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} [{}]", self.name, self.code)
    }
}
