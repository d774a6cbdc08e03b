//! Filter types for querying products.

use super::ProductStatus;

/// Filter options for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name
    pub name_contains: Option<String>,

    /// Restrict to products in the given status
    pub status: Option<ProductStatus>,
}

impl ProductFilter {
    /// Filter for a case-insensitive name search.
    ///
    /// The term is trimmed and lowercased before matching.
    ///
    /// ```rust
    /// use shopfloor_core::models::ProductFilter;
    ///
    /// let filter = ProductFilter::for_name("  Table ");
    /// assert_eq!(filter.name_contains.as_deref(), Some("table"));
    /// assert!(filter.status.is_none());
    /// ```
    pub fn for_name(term: &str) -> Self {
        Self {
            name_contains: Some(term.trim().to_lowercase()),
            ..Default::default()
        }
    }
}
