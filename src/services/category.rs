//! Category service
//!
//! Creates, lists, edits, and deletes a user's income and expense
//! categories. Names are unique per user (case-insensitive), and a category
//! that is still referenced by transactions or limits can neither be
//! deleted nor switch between income and expense.

use std::collections::HashMap;

use crate::error::{PaydayError, PaydayResult};
use crate::models::{Category, CategoryId, TransactionKind, UserId};
use crate::storage::Storage;

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionKind,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Changes to an existing category; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub kind: Option<TransactionKind>,
    /// An empty value removes the icon
    pub icon: Option<String>,
    /// An empty value removes the color
    pub color: Option<String>,
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, user: &UserId, input: NewCategory) -> PaydayResult<Category> {
        let name = input.name.trim();

        if self.get_by_name(user, name)?.is_some() {
            return Err(PaydayError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut category = Category::new(user.clone(), name, input.kind);
        category.icon = input.icon.filter(|icon| !icon.trim().is_empty());
        category.color = input.color;

        category
            .validate()
            .map_err(|e| PaydayError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(user = %user, category = %category.name, kind = %category.kind, "category created");
        Ok(category)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, user: &UserId, name: &str) -> PaydayResult<Option<Category>> {
        let name = name.trim();
        let mut matches = self
            .storage
            .categories
            .filter_for_user(user, |c| c.name.eq_ignore_ascii_case(name))?;
        Ok(matches.pop())
    }

    /// Find a category by name or ID reference
    pub fn find(&self, user: &UserId, reference: &str) -> PaydayResult<Option<Category>> {
        if let Some(category) = self.get_by_name(user, reference)? {
            return Ok(Some(category));
        }
        self.storage.categories.find_by_reference(user, reference)
    }

    /// Find a category or fail with NotFound
    pub fn require(&self, user: &UserId, reference: &str) -> PaydayResult<Category> {
        self.find(user, reference)?
            .ok_or_else(|| PaydayError::category_not_found(reference))
    }

    /// List the user's categories, income first, then by name
    pub fn list(&self, user: &UserId, kind: Option<TransactionKind>) -> PaydayResult<Vec<Category>> {
        let mut categories = self
            .storage
            .categories
            .filter_for_user(user, |c| kind.map_or(true, |k| c.kind == k))?;
        categories.sort_by(|a, b| {
            kind_order(a.kind)
                .cmp(&kind_order(b.kind))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    /// Category id to display name, for rendering
    pub fn names(&self, user: &UserId) -> PaydayResult<HashMap<CategoryId, String>> {
        Ok(self
            .storage
            .categories
            .list_for_user(user)?
            .into_iter()
            .map(|c| (c.id, c.display_name()))
            .collect())
    }

    /// Update a category
    pub fn update(&self, user: &UserId, reference: &str, input: UpdateCategory) -> PaydayResult<Category> {
        let mut category = self.require(user, reference)?;

        if let Some(name) = input.name {
            let name = name.trim();
            if let Some(existing) = self.get_by_name(user, name)? {
                if existing.id != category.id {
                    return Err(PaydayError::Duplicate {
                        entity_type: "Category",
                        identifier: name.to_string(),
                    });
                }
            }
            category.name = name.to_string();
        }

        if let Some(kind) = input.kind {
            if kind != category.kind {
                self.ensure_unused(user, &category, "change its type")?;
                category.kind = kind;
            }
        }

        if let Some(icon) = input.icon {
            category.icon = Some(icon.trim().to_string()).filter(|icon| !icon.is_empty());
        }
        if let Some(color) = input.color {
            category.color = Some(color.trim().to_string()).filter(|color| !color.is_empty());
        }

        category
            .validate()
            .map_err(|e| PaydayError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(user = %user, category = %category.name, kind = %category.kind, "category updated");
        Ok(category)
    }

    /// Delete a category that nothing references
    pub fn delete(&self, user: &UserId, reference: &str) -> PaydayResult<Category> {
        let category = self.require(user, reference)?;
        self.ensure_unused(user, &category, "delete it")?;

        self.storage.categories.delete(category.id)?;
        self.storage.categories.save()?;

        tracing::info!(user = %user, category = %category.name, "category deleted");
        Ok(category)
    }

    /// Fail when transactions or limits still point at `category`
    fn ensure_unused(&self, user: &UserId, category: &Category, action: &str) -> PaydayResult<()> {
        let transactions = self
            .storage
            .transactions
            .filter_for_user(user, |t| t.category_id == category.id)?;
        if !transactions.is_empty() {
            return Err(PaydayError::Validation(format!(
                "Category '{}' has {} transaction(s); remove them before you {}",
                category.name,
                transactions.len(),
                action
            )));
        }

        let limits = self
            .storage
            .limits
            .filter_for_user(user, |l| l.category_id == Some(category.id))?;
        if !limits.is_empty() {
            return Err(PaydayError::Validation(format!(
                "Category '{}' has {} limit(s); remove them before you {}",
                category.name,
                limits.len(),
                action
            )));
        }
        Ok(())
    }
}

fn kind_order(kind: TransactionKind) -> u8 {
    match kind {
        TransactionKind::Income => 0,
        TransactionKind::Expense => 1,
    }
}
