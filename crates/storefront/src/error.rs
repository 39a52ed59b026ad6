//! Unified error handling for the storefront library.
//!
//! Each subsystem keeps its own error enum; `AppError` unifies them at
//! the embedding boundary so callers can hold a single error type.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Catalog fetch failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Snapshot store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether this error is a recoverable user-facing condition rather
    /// than a fault.
    ///
    /// Out-of-stock rejections are part of normal operation; the
    /// presentation layer shows a notice and carries on.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Cart(CartError::OutOfStock(_)))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
