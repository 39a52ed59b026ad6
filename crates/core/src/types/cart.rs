//! Cart data model with stock-aware mutation rules.
//!
//! [`Cart`] is the pure state machine: it owns the lines and enforces the
//! quantity invariants, but does no I/O. Persistence and change
//! notification are layered on top by the storefront crate.
//!
//! # Invariants
//!
//! - Line quantities stay within `1..=stock` under every mutation.
//! - Lines are unique by product id.
//! - Insertion order is preserved.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// Signal that an add or increment would exceed the available stock.
///
/// This is a recoverable condition, not a failure: the cart is unchanged
/// and the caller decides how to notify the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("out of stock: product {id} has {stock} unit(s) available")]
pub struct OutOfStockError {
    /// The product that could not be added.
    pub id: ProductId,
    /// Units available at the time of the attempt.
    pub stock: u32,
}

/// Outcome of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The quantity was stored, clamped up to 1 if a lower value was asked.
    Applied(u32),
    /// The request exceeded the available stock and was clamped down.
    ///
    /// Carries the stored quantity. This is the recoverable out-of-stock
    /// signal for the increment path of the quantity controls.
    StockLimited(u32),
    /// No line with the given id exists; the cart is unchanged.
    Ignored,
}

/// A cart line: a product snapshot plus the quantity in the cart.
///
/// Serializes with the product fields inlined, matching the stored
/// snapshot format (a JSON array of product records each carrying a
/// `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product as observed when it was added.
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product in the cart, always in `1..=stock`.
    pub quantity: u32,
}

impl CartLine {
    /// Create a fresh line holding a single unit.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// An insertion-ordered collection of cart lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// Inserts a new single-unit line when the product is not yet in the
    /// cart and has stock; increments the existing line while its quantity
    /// is below the stock observed on `product`. Returns the resulting
    /// line quantity.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfStockError`] when the stock bound would be violated.
    /// The quantity is unchanged in that case, but the line still records
    /// the fresh stock observation so later clamping uses it.
    pub fn add(&mut self, product: &Product) -> Result<u32, OutOfStockError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            // Track the latest stock observation for later clamping,
            // rejected or not
            line.product.stock = product.stock;
            if line.quantity >= product.stock {
                return Err(OutOfStockError {
                    id: product.id,
                    stock: product.stock,
                });
            }
            line.quantity += 1;
            return Ok(line.quantity);
        }

        if !product.in_stock() {
            return Err(OutOfStockError {
                id: product.id,
                stock: product.stock,
            });
        }

        self.lines.push(CartLine::new(product.clone()));
        Ok(1)
    }

    /// Set the quantity of an existing line, clamped into `1..=stock`.
    ///
    /// The stock bound is the snapshot stored on the line, i.e. the latest
    /// observation made when the product was added.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> QuantityUpdate {
        let Some(line) = self.lines.iter_mut().find(|l| l.product.id == id) else {
            return QuantityUpdate::Ignored;
        };

        let stock = line.product.stock;
        let clamped = quantity.clamp(1, stock.max(1));
        line.quantity = clamped;

        if quantity > stock {
            QuantityUpdate::StockLimited(clamped)
        } else {
            QuantityUpdate::Applied(clamped)
        }
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    ///
    /// Recomputed on every call; carts are small so derived reads are O(n)
    /// and uncached.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Whether every invariant holds: quantities within bounds and product
    /// ids unique. Used to reject malformed restored snapshots wholesale.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.lines.iter().enumerate().all(|(i, line)| {
            line.quantity >= 1
                && line.quantity <= line.product.stock
                && self
                    .lines
                    .iter()
                    .skip(i + 1)
                    .all(|other| other.product.id != line.product.id)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn product(id: i64, price: rust_decimal::Decimal, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::new(price).unwrap(),
            category: "misc".to_string(),
            thumbnail: String::new(),
            stock,
        }
    }

    #[test]
    fn test_add_new_line_starts_at_one() {
        let mut cart = Cart::new();
        let qty = cart.add(&product(1, dec!(10), 2)).unwrap();
        assert_eq!(qty, 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_add_caps_at_stock() {
        // The worked example from the product brief: stock 2, price 10
        let mut cart = Cart::new();
        let shoe = product(1, dec!(10), 2);

        assert_eq!(cart.add(&shoe).unwrap(), 1);
        assert_eq!(cart.add(&shoe).unwrap(), 2);
        assert_eq!(cart.total_price().amount(), dec!(20));

        let err = cart.add(&shoe).unwrap_err();
        assert_eq!(err.id, shoe.id);
        assert_eq!(err.stock, 2);
        assert_eq!(cart.line(shoe.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_zero_stock_rejected() {
        let mut cart = Cart::new();
        let gone = product(3, dec!(5), 0);
        assert!(cart.add(&gone).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_sequences_never_exceed_stock() {
        let mut cart = Cart::new();
        let item = product(9, dec!(1.50), 4);
        for _ in 0..20 {
            let _ = cart.add(&item);
            let qty = cart.line(item.id).unwrap().quantity;
            assert!((1..=4).contains(&qty));
        }
        assert_eq!(cart.line(item.id).unwrap().quantity, 4);
    }

    #[test]
    fn test_set_quantity_clamping_law() {
        let mut cart = Cart::new();
        let item = product(2, dec!(3), 5);
        cart.add(&item).unwrap();

        // Far below the range
        assert_eq!(
            cart.set_quantity(item.id, 0),
            QuantityUpdate::Applied(1)
        );
        // Inside the range
        assert_eq!(
            cart.set_quantity(item.id, 4),
            QuantityUpdate::Applied(4)
        );
        // Far above the range signals the stock limit
        assert_eq!(
            cart.set_quantity(item.id, 100),
            QuantityUpdate::StockLimited(5)
        );
        assert_eq!(cart.line(item.id).unwrap().quantity, 5);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, dec!(1), 1)).unwrap();
        let snapshot = cart.clone();

        assert_eq!(
            cart.set_quantity(ProductId::new(99), 3),
            QuantityUpdate::Ignored
        );
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_rejected_add_still_refreshes_stock_observation() {
        let mut cart = Cart::new();
        let item = product(6, dec!(4), 3);
        cart.add(&item).unwrap();
        cart.add(&item).unwrap();

        // Stock dropped below the held quantity upstream; the add is
        // rejected but the new bound sticks
        let depleted = product(6, dec!(4), 1);
        assert!(cart.add(&depleted).is_err());
        assert_eq!(cart.line(item.id).unwrap().quantity, 2);
        assert_eq!(cart.line(item.id).unwrap().product.stock, 1);

        // Clamping now uses the fresh observation, not the stale one
        assert_eq!(
            cart.set_quantity(item.id, 5),
            QuantityUpdate::StockLimited(1)
        );
    }

    #[test]
    fn test_remove_then_re_add_is_fresh() {
        let mut cart = Cart::new();
        let item = product(4, dec!(2), 3);
        cart.add(&item).unwrap();
        cart.add(&item).unwrap();

        assert!(cart.remove(item.id));
        assert!(!cart.remove(item.id));
        assert!(cart.is_empty());

        // No residual quantity leaks into the new line
        assert_eq!(cart.add(&item).unwrap(), 1);
    }

    #[test]
    fn test_totals_hold_after_every_mutation() {
        let mut cart = Cart::new();
        let a = product(1, dec!(10), 2);
        let b = product(2, dec!(4.25), 8);

        let assert_totals = |cart: &Cart| {
            let items: u32 = cart.lines().iter().map(|l| l.quantity).sum();
            let price: Price = cart.lines().iter().map(CartLine::line_total).sum();
            assert_eq!(cart.total_items(), items);
            assert_eq!(cart.total_price(), price);
        };

        cart.add(&a).unwrap();
        assert_totals(&cart);
        cart.add(&b).unwrap();
        assert_totals(&cart);
        cart.set_quantity(b.id, 6);
        assert_totals(&cart);
        let _ = cart.add(&a);
        assert_totals(&cart);
        cart.remove(a.id);
        assert_totals(&cart);
        cart.clear();
        assert_totals(&cart);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        for id in [5, 1, 3] {
            cart.add(&product(id, dec!(1), 1)).unwrap();
        }
        let ids: Vec<i64> = cart
            .lines()
            .iter()
            .map(|l| l.product.id.as_i64())
            .collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }

    #[test]
    fn test_snapshot_shape_flattens_product() {
        let mut cart = Cart::new();
        cart.add(&product(1, dec!(10), 2)).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        // A JSON array of product records each carrying a quantity
        let line = json.as_array().unwrap().first().unwrap();
        assert_eq!(line["id"], 1);
        assert_eq!(line["quantity"], 1);
        assert!(line.get("product").is_none());
    }

    #[test]
    fn test_well_formedness() {
        let mut cart = Cart::new();
        cart.add(&product(1, dec!(1), 2)).unwrap();
        cart.add(&product(2, dec!(1), 2)).unwrap();
        assert!(cart.is_well_formed());

        // A hand-built snapshot with a duplicate id is rejected
        let dup: Cart = serde_json::from_value(serde_json::json!([
            {"id": 1, "title": "a", "price": 1, "category": "c", "thumbnail": "", "stock": 2, "quantity": 1},
            {"id": 1, "title": "a", "price": 1, "category": "c", "thumbnail": "", "stock": 2, "quantity": 1}
        ]))
        .unwrap();
        assert!(!dup.is_well_formed());

        // Quantity above stock is rejected
        let over: Cart = serde_json::from_value(serde_json::json!([
            {"id": 1, "title": "a", "price": 1, "category": "c", "thumbnail": "", "stock": 2, "quantity": 3}
        ]))
        .unwrap();
        assert!(!over.is_well_formed());
    }
}
