//! ShopSphere Storefront library.
//!
//! The storefront core embedded by the presentation layer: it fetches the
//! product catalog, filters and sorts it, and owns a stock-aware shopping
//! cart persisted to a local snapshot slot.
//!
//! The presentation layer is an external collaborator. It forwards user
//! intents (add, remove, set quantity, filter, sort) into this crate and
//! re-reads state after each change notification; nothing here renders or
//! blocks.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopsphere_storefront::catalog::filter::{CategoryFilter, SortMode, filter_and_sort};
//! use shopsphere_storefront::config::StorefrontConfig;
//! use shopsphere_storefront::state::AppState;
//!
//! let config = StorefrontConfig::from_env()?;
//! let state = AppState::new(config);
//!
//! let products = state.catalog().fetch_products().await?;
//! let visible = filter_and_sort(&products, "shoe", &CategoryFilter::All, SortMode::PriceLowToHigh);
//!
//! state.cart().add_to_cart(&visible[0])?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod telemetry;
