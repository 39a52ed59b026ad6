//! Cart state container.
//!
//! [`CartState`] owns the authoritative in-memory [`Cart`], writes every
//! successful mutation through to the snapshot store, and notifies
//! registered subscribers so the presentation layer can re-read state.
//!
//! # Stock policy
//!
//! Attempts to add or increment beyond the available stock are rejected
//! with a recoverable error value ([`CartError::OutOfStock`]); the
//! presentation layer decides how to surface it to the user. The
//! container never blocks or alerts.
//!
//! # Persistence
//!
//! Write-through: the full snapshot is saved after each successful
//! mutation, not batched or debounced. The in-memory cart is
//! authoritative; if a save fails the mutation stands, the error is
//! surfaced, and the next successful save repairs the slot since every
//! save writes the complete snapshot.

use shopsphere_core::{Cart, OutOfStockError, Product, ProductId, QuantityUpdate};
use thiserror::Error;
use tracing::{instrument, warn};

use crate::store::{SnapshotStore, StoreError};

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The stock bound would be violated; the cart is unchanged.
    #[error(transparent)]
    OutOfStock(#[from] OutOfStockError),

    /// The snapshot could not be encoded.
    #[error("snapshot encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The snapshot could not be written. The in-memory mutation stands.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle identifying a change subscription, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeCallback = Box<dyn Fn(&Cart) + Send>;

struct Subscriber {
    id: SubscriptionId,
    callback: ChangeCallback,
}

/// The authoritative cart, its persistence, and its subscribers.
///
/// Mutations take `&mut self`: user intents arrive one at a time from the
/// UI event loop, so a single owner (or a mutex in shared state) is all
/// the coordination needed.
pub struct CartState {
    cart: Cart,
    store: Box<dyn SnapshotStore>,
    subscribers: Vec<Subscriber>,
    next_subscription: u64,
}

impl CartState {
    /// Create a container with an empty cart.
    #[must_use]
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self {
            cart: Cart::new(),
            store,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Restore the cart from the snapshot store.
    ///
    /// Fails soft: an absent slot, unreadable bytes, a payload that is not
    /// a cart, or a cart violating its own invariants all yield an empty
    /// cart. Nothing propagates to the caller.
    #[must_use]
    pub fn restore(store: Box<dyn SnapshotStore>) -> Self {
        let cart = match store.load() {
            Ok(Some(bytes)) => match serde_json::from_slice::<Cart>(&bytes) {
                Ok(cart) if cart.is_well_formed() => cart,
                Ok(_) => {
                    warn!("stored cart snapshot violates invariants, starting empty");
                    Cart::new()
                }
                Err(e) => {
                    warn!(error = %e, "stored cart snapshot failed to parse, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "cart snapshot unreadable, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            store,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> shopsphere_core::Price {
        self.cart.total_price()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product, persist, and notify.
    ///
    /// Returns the resulting line quantity.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] when the stock bound would be violated
    /// (the cart is unchanged and nothing is persisted); [`CartError::Store`]
    /// or [`CartError::Encode`] when the write-through fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) -> Result<u32, CartError> {
        let quantity = self.cart.add(product)?;
        self.persist_and_notify()?;
        Ok(quantity)
    }

    /// Set the quantity of a line, clamped into `1..=stock`, persist, and
    /// notify.
    ///
    /// [`QuantityUpdate::StockLimited`] is the recoverable out-of-stock
    /// signal for requests above the stock bound; the clamped value is
    /// stored either way. An unknown id is a no-op and does not persist.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] or [`CartError::Encode`] when the
    /// write-through fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        quantity: u32,
    ) -> Result<QuantityUpdate, CartError> {
        let outcome = self.cart.set_quantity(id, quantity);
        if outcome == QuantityUpdate::Ignored {
            return Ok(outcome);
        }
        self.persist_and_notify()?;
        Ok(outcome)
    }

    /// Remove the line for a product, persist, and notify.
    ///
    /// Returns whether a line was removed. An unknown id is a no-op and
    /// does not persist.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] or [`CartError::Encode`] when the
    /// write-through fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<bool, CartError> {
        if !self.cart.remove(id) {
            return Ok(false);
        }
        self.persist_and_notify()?;
        Ok(true)
    }

    /// Empty the cart, persist, and notify.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] or [`CartError::Encode`] when the
    /// write-through fails.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.cart.clear();
        self.persist_and_notify()
    }

    // =========================================================================
    // Change notification
    // =========================================================================

    /// Register a callback invoked with the new cart after every
    /// successful mutation.
    ///
    /// Callbacks run synchronously on the mutating call, after the
    /// snapshot is persisted.
    pub fn subscribe(&mut self, callback: impl Fn(&Cart) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn persist_and_notify(&mut self) -> Result<(), CartError> {
        let result = self.persist();
        // The in-memory cart changed even if the save failed, so the
        // presentation layer still needs to re-read.
        for subscriber in &self.subscribers {
            (subscriber.callback)(&self.cart);
        }
        result
    }

    fn persist(&self) -> Result<(), CartError> {
        let bytes = serde_json::to_vec(&self.cart)?;
        self.store.save(&bytes)?;
        Ok(())
    }
}

impl std::fmt::Debug for CartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartState")
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
