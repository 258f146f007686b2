//! Category model
//!
//! Categories are per user and are either income or expense categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::transaction::TransactionKind;

const MAX_NAME_LEN: usize = 50;

/// A user-defined category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub user_id: UserId,
    pub name: String,
    pub kind: TransactionKind,

    /// Optional emoji or icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Optional display color (e.g. "#ef4444")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(user_id: UserId, name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            id: CategoryId::new(),
            user_id,
            name: name.into(),
            kind,
            icon: None,
            color: None,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(name.chars().count()));
        }
        if let Some(color) = &self.color {
            let valid = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(CategoryValidationError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }

    /// Name prefixed with the icon when one is set
    pub fn display_name(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} characters, max {})",
                len, MAX_NAME_LEN
            ),
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}': expected #rrggbb", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut category = Category::new(UserId::default(), "Groceries", TransactionKind::Expense);
        assert!(category.validate().is_ok());

        category.name = "  ".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "x".repeat(51);
        assert_eq!(category.validate(), Err(CategoryValidationError::NameTooLong(51)));
    }

    #[test]
    fn test_color_validation() {
        let mut category = Category::new(UserId::default(), "Salary", TransactionKind::Income);
        category.color = Some("#10b981".into());
        assert!(category.validate().is_ok());

        category.color = Some("green".into());
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_display_name() {
        let mut category = Category::new(UserId::default(), "Food", TransactionKind::Expense);
        assert_eq!(category.display_name(), "Food");
        category.icon = Some("🍔".into());
        assert_eq!(category.display_name(), "🍔 Food");
    }
}
