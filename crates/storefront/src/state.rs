//! Application state shared with the presentation layer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::CartState;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::store::{FileSnapshotStore, SnapshotStore};

/// Application state owned by the embedding root and passed down
/// explicitly.
///
/// Cheaply cloneable via `Arc`. This replaces the module-level singleton
/// of the original web storefront: whoever constructs the UI constructs
/// the state and injects it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: Mutex<CartState>,
}

impl AppState {
    /// Create application state with the file-backed snapshot store under
    /// the configured data directory.
    ///
    /// The cart is restored from the snapshot slot (fail-soft to empty).
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = FileSnapshotStore::new(&config.data_dir);
        Self::with_store(config, Box::new(store))
    }

    /// Create application state with an injected snapshot store.
    ///
    /// Used by tests and embedders that persist somewhere other than the
    /// local filesystem.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Box<dyn SnapshotStore>) -> Self {
        let catalog = CatalogClient::new(&config);
        let cart = Mutex::new(CartState::restore(store));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Lock and return the cart state container.
    ///
    /// User intents are processed one at a time, so contention is not
    /// expected; the mutex only serializes the odd overlap from an
    /// embedder with more than one thread.
    pub fn cart(&self) -> MutexGuard<'_, CartState> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
