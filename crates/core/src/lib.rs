//! ShopSphere Core - Shared types library.
//!
//! This crate provides the common types used across all ShopSphere components:
//! - `storefront` - Catalog, cart, and persistence library embedded by the UI
//! - `integration-tests` - Cross-crate property tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no storage access. The cart type enforces its own stock
//! invariants; persistence and change notification live in the storefront
//! crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   product and cart data model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
