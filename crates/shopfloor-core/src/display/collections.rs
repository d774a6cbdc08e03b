//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::{HistoryEntry, Product, Step};

/// Implements the slice-like accessors shared by every collection wrapper.
macro_rules! collection {
    ($wrapper:ident, $item:ty) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Iterate over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// Products rendered as one summary block each.
///
/// # Examples
///
/// ```rust
/// use shopfloor_core::{
///     display::Products,
///     models::{Product, ProductStatus},
/// };
/// use jiff::Timestamp;
///
/// let product = Product {
///     id: 4,
///     name: "Bookshelf".to_string(),
///     description: "Pine, three shelves".to_string(),
///     has_invoice: true,
///     status: ProductStatus::Pending,
///     registered_at: Timestamp::now(),
///     steps: vec![],
/// };
///
/// let output = Products(vec![product]).to_string();
/// assert!(output.contains("Bookshelf (ID: 4)"));
/// assert_eq!(Products(vec![]).to_string(), "No products found.\n");
/// ```
#[derive(Debug, Clone)]
pub struct Products(pub Vec<Product>);

collection!(Products, Product);

impl fmt::Display for Products {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No products found.");
        }

        for product in &self.0 {
            let progress = if product.steps.is_empty() {
                String::new()
            } else {
                format!(" ({}/{})", product.completed_steps(), product.steps.len())
            };

            writeln!(f, "## {} (ID: {}){progress}", product.name, product.id)?;
            writeln!(f)?;
            writeln!(f, "- **Status**: {}", product.status)?;
            if let Some(step) = product.active_step() {
                writeln!(f, "- **Current step**: {}", step.name)?;
            }
            if !product.description.is_empty() {
                writeln!(f, "- **Description**: {}", product.description)?;
            }
            if product.has_invoice {
                writeln!(f, "- **Invoice**: issued")?;
            }
            writeln!(f, "- **Registered**: {}", LocalDateTime(&product.registered_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Steps of one product in processing order.
#[derive(Debug, Clone)]
pub struct Steps(pub Vec<Step>);

collection!(Steps, Step);

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No steps found.")
        } else {
            for step in &self.0 {
                write!(f, "{step}")?;
            }
            Ok(())
        }
    }
}

/// Finalization records, newest first.
#[derive(Debug, Clone)]
pub struct History(pub Vec<HistoryEntry>);

collection!(History, HistoryEntry);

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No finalized products yet.")
        } else {
            for entry in &self.0 {
                write!(f, "{entry}")?;
            }
            Ok(())
        }
    }
}
