//! Category CRUD and tree maintenance.
//!
//! Links live on both ends (`child.parent` and `parent.children`). Every
//! operation here that touches a link writes both records, so the two sides
//! always agree once the call returns.

use std::collections::HashSet;
use std::sync::Arc;

use museum_catalog::Category;
use museum_core::{CategoryId, DomainError, DomainResult, Entity};
use museum_store::Repository;

pub struct CategoryService {
    categories: Arc<dyn Repository<Category>>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn Repository<Category>>) -> Self {
        Self { categories }
    }

    /// Stores a new root category. Links are created through
    /// [`add_subcategory`](Self::add_subcategory) only.
    pub fn add_category(&self, category: Category) -> DomainResult<Category> {
        category.validate().map_err(reject)?;
        if category.parent().is_some() || !category.children().is_empty() {
            return Err(reject(DomainError::invalid_data(
                "new categories cannot carry tree links; use add_subcategory",
            )));
        }

        let stored = self.categories.save(category);
        tracing::info!(id = ?stored.id(), code = %stored.code, "category added");
        Ok(stored)
    }

    /// Overwrites name, code and description. Tree links are kept as stored.
    pub fn update_category(&self, category: Category) -> DomainResult<Category> {
        let Some(id) = category.id() else {
            return Err(reject(DomainError::invalid_data("category id is required")));
        };
        category.validate().map_err(reject)?;
        let mut stored = self.require(id)?;

        stored.overwrite_details(&category);
        let stored = self.categories.save(stored);
        tracing::info!(id = %id, "category updated");
        Ok(stored)
    }

    /// Removes a category. It is detached from its parent and its children
    /// become roots.
    pub fn delete_category(&self, id: CategoryId) -> DomainResult<()> {
        let category = self.require(id)?;

        if let Some(parent_id) = category.parent()
            && let Some(mut parent) = self.categories.find_by_id(parent_id)
        {
            parent.remove_child(id);
            self.categories.save(parent);
        }
        for child_id in category.children() {
            if let Some(mut child) = self.categories.find_by_id(*child_id) {
                child.set_parent(None);
                self.categories.save(child);
            }
        }

        self.categories.delete_by_id(id);
        tracing::info!(
            id = %id,
            promoted = category.children().len(),
            "category deleted"
        );
        Ok(())
    }

    pub fn get_category(&self, id: CategoryId) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .ok_or_else(|| DomainError::category_not_found(id))
    }

    pub fn get_all_categories(&self) -> Vec<Category> {
        self.categories.find_all()
    }

    pub fn get_root_categories(&self) -> Vec<Category> {
        self.categories.find_matching(&|c: &Category| c.is_root())
    }

    /// Children of `parent_id` in insertion order. Unknown parent → empty.
    pub fn get_subcategories(&self, parent_id: CategoryId) -> Vec<Category> {
        let Some(parent) = self.categories.find_by_id(parent_id) else {
            return Vec::new();
        };
        parent
            .children()
            .iter()
            .filter_map(|id| self.categories.find_by_id(*id))
            .collect()
    }

    /// Links `child` under `parent_id`, storing `child` first if it is new.
    ///
    /// An already stored child keeps its own children, adopts the details of
    /// `child`, and is moved away from any previous parent. Links that would
    /// close a cycle are rejected.
    pub fn add_subcategory(
        &self,
        parent_id: CategoryId,
        child: Category,
    ) -> DomainResult<Category> {
        self.require(parent_id)?;
        child.validate().map_err(reject)?;

        let mut child = match child.id() {
            None => {
                if !child.children().is_empty() {
                    return Err(reject(DomainError::invalid_data(
                        "a new subcategory cannot already have children",
                    )));
                }
                child
            }
            Some(child_id) => {
                if child_id == parent_id || self.is_ancestor(child_id, parent_id) {
                    return Err(reject(DomainError::invalid_data(format!(
                        "linking category {child_id} under {parent_id} would create a cycle"
                    ))));
                }
                let mut stored = self.require(child_id)?;
                stored.overwrite_details(&child);
                if let Some(old_parent) = stored.parent().filter(|p| *p != parent_id)
                    && let Some(mut previous) = self.categories.find_by_id(old_parent)
                {
                    previous.remove_child(child_id);
                    self.categories.save(previous);
                }
                stored
            }
        };

        child.set_parent(Some(parent_id));
        let child = self.categories.save(child);
        let Some(child_id) = child.id() else {
            return Err(DomainError::invalid_data("repository did not assign an id"));
        };

        // Re-read: the previous-parent detach above may have rewritten it.
        let mut parent = self.require(parent_id)?;
        parent.add_child(child_id);
        self.categories.save(parent);

        tracing::info!(parent = %parent_id, child = %child_id, "subcategory linked");
        Ok(child)
    }

    /// Unlinks `child_id` from `parent_id`. Returns `false` when the child was
    /// not listed under that parent.
    pub fn remove_subcategory(
        &self,
        parent_id: CategoryId,
        child_id: CategoryId,
    ) -> DomainResult<bool> {
        let mut parent = self.require(parent_id)?;
        let mut child = self.require(child_id)?;

        if !parent.remove_child(child_id) {
            return Ok(false);
        }
        child.set_parent(None);
        self.categories.save(parent);
        self.categories.save(child);

        tracing::info!(parent = %parent_id, child = %child_id, "subcategory unlinked");
        Ok(true)
    }

    /// First category (in id order) whose code equals `code` exactly.
    pub fn find_by_code(&self, code: &str) -> Option<Category> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.categories.find_first(&|c: &Category| c.code == code)
    }

    /// Case-insensitive substring match on the name. Blank → empty.
    pub fn find_by_name(&self, name: &str) -> Vec<Category> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.categories
            .find_matching(&|c: &Category| c.name.to_lowercase().contains(&needle))
    }

    pub fn get_total_count(&self) -> usize {
        self.categories.count()
    }

    fn require(&self, id: CategoryId) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .ok_or_else(|| reject(DomainError::category_not_found(id)))
    }

    /// Whether `candidate` appears on the parent chain above `node`.
    fn is_ancestor(&self, candidate: CategoryId, node: CategoryId) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = self.categories.find_by_id(node).and_then(|c| c.parent());
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            if !seen.insert(id) {
                break;
            }
            cursor = self.categories.find_by_id(id).and_then(|c| c.parent());
        }
        false
    }
}

fn reject(err: DomainError) -> DomainError {
    tracing::warn!(error = %err, "category operation rejected");
    err
}
