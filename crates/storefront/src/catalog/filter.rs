//! Pure catalog filtering and sorting.
//!
//! [`filter_and_sort`] is the single function behind the storefront's
//! search box, category selector, and sort selector. It never mutates the
//! catalog and is deterministic: re-applying it with identical arguments
//! yields an identical sequence.

use shopsphere_core::Product;

/// Sort order for the filtered catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Preserve catalog order.
    #[default]
    Default,
    /// Ascending by price.
    PriceLowToHigh,
    /// Descending by price.
    PriceHighToLow,
}

impl SortMode {
    /// Parse the sort selector's wire value.
    ///
    /// `"low"` and `"high"` select the price orders; anything else is the
    /// default catalog order.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "low" => Self::PriceLowToHigh,
            "high" => Self::PriceHighToLow,
            _ => Self::Default,
        }
    }
}

/// Category restriction for the filtered catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// The "all" pseudo-category: no restriction.
    #[default]
    All,
    /// Only products whose category label matches exactly.
    Category(String),
}

impl CategoryFilter {
    /// Parse the category selector's wire value (`"all"` is the
    /// pseudo-category).
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(label) => label == category,
        }
    }
}

/// Filter and sort the catalog for display.
///
/// A product is included iff its title contains `search` as a
/// case-insensitive substring and its category passes `category`. Ties on
/// price keep their catalog order (the sort is stable), so output is
/// deterministic across re-filters.
#[must_use]
pub fn filter_and_sort(
    items: &[Product],
    search: &str,
    category: &CategoryFilter,
    sort: SortMode,
) -> Vec<Product> {
    let needle = search.to_lowercase();

    let mut results: Vec<Product> = items
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .filter(|p| category.matches(&p.category))
        .cloned()
        .collect();

    match sort {
        SortMode::Default => {}
        SortMode::PriceLowToHigh => results.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceHighToLow => results.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    results
}
