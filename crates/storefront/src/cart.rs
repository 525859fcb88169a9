//! Shopping cart engine with stock-bounded quantities and persistence.
//!
//! Each product id is a tiny state machine: absent, or present with a
//! quantity in `[1, stock-at-mutation-time]` and a selection flag. Stock
//! bounds are point-in-time checks at add/edit; a catalog reload never
//! retroactively shrinks existing lines. Every mutation rewrites the whole
//! line list to storage before returning - in-memory state is authoritative
//! first, and a failed write downgrades to a warning rather than rolling
//! back an already-reported success.

use apteka_core::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::storage::{Storage, namespaces};

/// One product's entry in the cart.
///
/// Name, price, and image are denormalized at add time so the cart renders
/// even if the product later disappears from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub qty: u32,
    pub selected: bool,
}

impl CartLine {
    /// Quantity times unit price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// Expected, recoverable cart failures - user-facing notices, not errors to
/// log or abort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product has zero stock; nothing was added.
    #[error("product is out of stock")]
    OutOfStock,

    /// The line already holds every available unit; nothing changed.
    #[error("stock limit reached ({max} available)")]
    LimitReached { max: u32 },
}

/// Successful `add`: the resulting quantity and the stock bound, so callers
/// can display "3 of 45" style feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    pub qty: u32,
    pub max: u32,
}

/// Result of `set_quantity`: what was actually stored, the bound it was
/// clamped against, and whether the request was reduced to fit. A clamped
/// request must be surfaced to the user, never silently absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityOutcome {
    pub qty: u32,
    pub max: u32,
    pub limited: bool,
}

/// The cart: ordered line items (insertion order, stable across reloads)
/// plus the storage handle every mutation persists through.
pub struct CartEngine {
    lines: Vec<CartLine>,
    storage: Box<dyn Storage>,
}

impl CartEngine {
    /// Construct the engine, restoring persisted lines.
    ///
    /// Corrupt or missing storage yields an empty cart - never an error.
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let lines = match storage.read(namespaces::CART) {
            Ok(Some(payload)) => serde_json::from_str(&payload).unwrap_or_else(|e| {
                warn!(error = %e, "corrupt cart data ignored, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read cart data, starting empty");
                Vec::new()
            }
        };
        Self { lines, storage }
    }

    /// Add one unit of `product`.
    ///
    /// Creates the line at qty 1 (selected) on first add; increments an
    /// existing line otherwise. The product's stock at this moment is the
    /// authoritative bound.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] when stock is zero,
    /// [`CartError::LimitReached`] when the line already holds `stock`
    /// units. Neither mutates the cart.
    pub fn add(&mut self, product: &Product) -> Result<AddOutcome, CartError> {
        let max = product.stock;
        if max == 0 {
            return Err(CartError::OutOfStock);
        }

        let qty = match self.lines.iter_mut().find(|l| l.id == product.id) {
            Some(line) => {
                if line.qty >= max {
                    return Err(CartError::LimitReached { max });
                }
                line.qty = (line.qty + 1).min(max);
                line.qty
            }
            None => {
                self.lines.push(CartLine {
                    id: product.id,
                    name: product.name.clone(),
                    price: product.price,
                    image: product.image.clone(),
                    qty: 1,
                    selected: true,
                });
                1
            }
        };

        self.persist();
        Ok(AddOutcome { qty, max })
    }

    /// Set a line's quantity, clamped to `[1, bound]`.
    ///
    /// The bound is `stock` when the product is still resolvable against the
    /// current catalog; for a stale line (catalog reloaded underneath it) the
    /// existing quantity serves as the bound, so the line never grows or
    /// shrinks below 1. A request reduced by the clamp comes back with
    /// `limited: true`.
    ///
    /// Returns `None` when no line with this id exists.
    pub fn set_quantity(
        &mut self,
        id: ProductId,
        requested: u32,
        stock: Option<u32>,
    ) -> Option<QuantityOutcome> {
        let line = self.lines.iter_mut().find(|l| l.id == id)?;
        let max = match stock {
            Some(s) if s > 0 => s,
            _ => line.qty.max(1),
        };
        let qty = requested.clamp(1, max);
        let limited = requested > max;
        line.qty = qty;

        self.persist();
        Some(QuantityOutcome { qty, max, limited })
    }

    /// Remove a line. Absent ids are a no-op, not an error.
    pub fn remove(&mut self, id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Flip a line's selection flag; returns the new state, or `None` for an
    /// absent id (no-op).
    pub fn toggle_selected(&mut self, id: ProductId) -> Option<bool> {
        let line = self.lines.iter_mut().find(|l| l.id == id)?;
        line.selected = !line.selected;
        let selected = line.selected;
        self.persist();
        Some(selected)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// All line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Lines flagged for the next checkout action.
    #[must_use]
    pub fn selected(&self) -> Vec<&CartLine> {
        self.lines.iter().filter(|l| l.selected).collect()
    }

    /// Sum of quantities across all lines. Recomputed per call; the cart is
    /// small and recomputation keeps the aggregate trivially consistent.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    /// Sum of quantity times price across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write the full line list to storage. State is already committed in
    /// memory; a failed write is logged and the call still counts as
    /// successful.
    fn persist(&self) {
        let payload = match serde_json::to_string(&self.lines) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.write(namespaces::CART, &payload) {
            warn!(error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::fallback_products;
    use crate::storage::{JsonStore, MemoryStore};
    use rust_decimal::Decimal;

    fn product(id: u32) -> Product {
        fallback_products()
            .into_iter()
            .find(|p| p.id == ProductId::new(id))
            .unwrap()
    }

    fn engine() -> CartEngine {
        CartEngine::new(Box::new(MemoryStore::new()))
    }

    fn assert_aggregates_consistent(cart: &CartEngine) {
        let qty: u32 = cart.items().iter().map(|l| l.qty).sum();
        let price: Decimal = cart.items().iter().map(CartLine::subtotal).sum();
        assert_eq!(cart.total_quantity(), qty);
        assert_eq!(cart.total_price(), price);
    }

    #[test]
    fn test_add_creates_selected_line_at_one() {
        let mut cart = engine();
        let outcome = cart.add(&product(1)).unwrap();
        assert_eq!(outcome, AddOutcome { qty: 1, max: 45 });

        let line = &cart.items()[0];
        assert_eq!(line.id, ProductId::new(1));
        assert_eq!(line.qty, 1);
        assert!(line.selected);
        assert_aggregates_consistent(&cart);
    }

    #[test]
    fn test_add_zero_stock_rejected() {
        let mut cart = engine();
        // id 7 "Magnesium Complex" ships with stock 0.
        assert_eq!(cart.add(&product(7)), Err(CartError::OutOfStock));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_never_exceeds_stock() {
        let mut cart = engine();
        let p = product(13); // stock 1
        assert_eq!(cart.add(&p).unwrap().qty, 1);
        assert_eq!(cart.add(&p), Err(CartError::LimitReached { max: 1 }));
        assert_eq!(cart.items()[0].qty, 1);

        let p = product(4); // stock 8
        for expected in 1..=8 {
            assert_eq!(cart.add(&p).unwrap().qty, expected);
        }
        assert_eq!(cart.add(&p), Err(CartError::LimitReached { max: 8 }));
        assert_eq!(
            cart.items().iter().find(|l| l.id == p.id).unwrap().qty,
            8
        );
        assert_aggregates_consistent(&cart);
    }

    #[test]
    fn test_one_line_per_product() {
        let mut cart = engine();
        cart.add(&product(1)).unwrap();
        cart.add(&product(1)).unwrap();
        cart.add(&product(2)).unwrap();
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_set_quantity_clamps_and_reports() {
        let mut cart = engine();
        cart.add(&product(1)).unwrap(); // stock 45

        let outcome = cart.set_quantity(ProductId::new(1), 100, Some(45)).unwrap();
        assert_eq!(
            outcome,
            QuantityOutcome { qty: 45, max: 45, limited: true }
        );

        let outcome = cart.set_quantity(ProductId::new(1), 10, Some(45)).unwrap();
        assert_eq!(
            outcome,
            QuantityOutcome { qty: 10, max: 45, limited: false }
        );

        // Below one clamps up without the limited signal.
        let outcome = cart.set_quantity(ProductId::new(1), 0, Some(45)).unwrap();
        assert_eq!(
            outcome,
            QuantityOutcome { qty: 1, max: 45, limited: false }
        );
        assert_aggregates_consistent(&cart);
    }

    #[test]
    fn test_set_quantity_stale_line_bounded_by_existing_qty() {
        let mut cart = engine();
        let p = product(4); // stock 8
        for _ in 0..3 {
            cart.add(&p).unwrap();
        }

        // Product no longer resolvable: bound is the existing quantity.
        let outcome = cart.set_quantity(p.id, 50, None).unwrap();
        assert_eq!(outcome, QuantityOutcome { qty: 3, max: 3, limited: true });

        let outcome = cart.set_quantity(p.id, 2, None).unwrap();
        assert_eq!(outcome.qty, 2);
    }

    #[test]
    fn test_set_quantity_absent_is_none() {
        let mut cart = engine();
        assert!(cart.set_quantity(ProductId::new(42), 3, Some(10)).is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = engine();
        cart.add(&product(1)).unwrap();
        cart.remove(ProductId::new(1));
        assert!(cart.is_empty());
        cart.remove(ProductId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_toggle_selected() {
        let mut cart = engine();
        cart.add(&product(1)).unwrap();
        assert_eq!(cart.toggle_selected(ProductId::new(1)), Some(false));
        assert!(cart.selected().is_empty());
        assert_eq!(cart.toggle_selected(ProductId::new(1)), Some(true));
        assert_eq!(cart.selected().len(), 1);
        assert_eq!(cart.toggle_selected(ProductId::new(9)), None);
    }

    #[test]
    fn test_clear() {
        let mut cart = engine();
        cart.add(&product(1)).unwrap();
        cart.add(&product(2)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_typical_order_totals() {
        let mut cart = engine();
        let aspirin = product(1); // stock 45, price 509.0
        for _ in 0..4 {
            cart.add(&aspirin).unwrap();
        }
        assert_eq!(cart.total_quantity(), 4);
        assert_eq!(cart.total_price(), Decimal::new(20360, 1)); // 2036.0

        assert_eq!(cart.add(&product(7)), Err(CartError::OutOfStock));

        let outcome = cart.set_quantity(aspirin.id, 100, Some(45)).unwrap();
        assert_eq!(
            outcome,
            QuantityOutcome { qty: 45, max: 45, limited: true }
        );
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        let mut cart = CartEngine::new(Box::new(store.clone()));
        cart.add(&product(1)).unwrap();
        cart.add(&product(1)).unwrap();
        cart.add(&product(2)).unwrap();
        cart.toggle_selected(ProductId::new(2));
        cart.add(&product(3)).unwrap();
        cart.remove(ProductId::new(3));

        let restored = CartEngine::new(Box::new(store));
        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.total_quantity(), 3);
        assert_eq!(restored.total_price(), cart.total_price());
        assert_eq!(restored.selected().len(), 1);
        assert_aggregates_consistent(&restored);
    }

    #[test]
    fn test_corrupt_storage_yields_empty_cart() {
        let store = MemoryStore::new();
        store.write(namespaces::CART, "{definitely not json").unwrap();
        let cart = CartEngine::new(Box::new(store));
        assert!(cart.is_empty());
    }
}
