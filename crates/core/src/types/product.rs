//! Catalog product data model.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable catalog item.
///
/// Products are supplied by the catalog endpoint and are immutable as far
/// as the cart is concerned. Unknown fields in the catalog payload are
/// ignored, so richer upstream records deserialize without trouble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Category label used by the catalog filter.
    pub category: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Units available for purchase.
    pub stock: u32,
}

impl Product {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
