//! Category display formatting

use tabled::Tabled;

use super::report::render_table;
use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Color")]
    color: String,
}

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'payday category add <name> --type expense' to create one.\n"
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.display_name(),
        kind: c.kind.to_string(),
        color: c.color.clone().unwrap_or_default(),
    });

    let mut output = render_table(rows);
    output.push('\n');
    output
}

/// Format category details for display
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.display_name()));
    output.push_str(&format!("  ID:   {}\n", category.id));
    output.push_str(&format!("  Type: {}\n", category.kind));
    if let Some(color) = &category.color {
        output.push_str(&format!("  Color: {}\n", color));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionKind, UserId};

    #[test]
    fn test_empty_list_hint() {
        assert!(format_category_list(&[]).contains("No categories found."));
    }

    #[test]
    fn test_list_shows_names_and_types() {
        let categories = vec![
            Category::new(UserId::default(), "Salary", TransactionKind::Income),
            Category::new(UserId::default(), "Groceries", TransactionKind::Expense),
        ];
        let output = format_category_list(&categories);
        assert!(output.contains("Salary"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("expense"));
    }
}
