//! Integration tests for ShopSphere.
//!
//! The library part holds shared test fixtures; the actual tests live in
//! `tests/`.
//!
//! # Test Categories
//!
//! - `cart_properties` - Stock bounds, clamping, and totals laws of the
//!   cart state container
//! - `persistence` - Snapshot write-through and fail-soft restore
//! - `catalog_filter` - Catalog payload parsing and filter/sort laws

use rust_decimal::Decimal;
use shopsphere_core::{Price, Product, ProductId};

/// Build a catalog product fixture.
///
/// Negative prices are not representable; the fixture clamps to zero so
/// callers can stay infallible.
#[must_use]
pub fn product(id: i64, title: &str, price: Decimal, category: &str, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::new(price).unwrap_or(Price::ZERO),
        category: category.to_string(),
        thumbnail: format!("https://cdn.example.com/{id}.jpg"),
        stock,
    }
}
