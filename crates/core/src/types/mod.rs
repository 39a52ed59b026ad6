//! Core types for ShopSphere.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLine, OutOfStockError, QuantityUpdate};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
