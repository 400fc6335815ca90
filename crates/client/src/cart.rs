//! Cart engine.
//!
//! A cart is an ordered sequence of lines, unique by product id, owned
//! exclusively by the current session. Quantities are always at least one:
//! any edit that would drop a line to zero removes the line instead, so a
//! zero-quantity line is not a representable state.
//!
//! Checkout is an in-memory transaction. The [`Settlement`] trait is the
//! seam where a real payment or inventory service would be injected; the
//! shipped [`LocalSettlement`] completes unconditionally, preserving the
//! client-local design.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use our_shop_core::ProductId;

use crate::catalog::{Catalog, Product};

/// Errors that can occur in cart operations.
#[derive(thiserror::Error, Debug)]
pub enum CartError {
    /// Checkout attempted with no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Cart mutation attempted by an admin session.
    #[error("admin sessions cannot modify a cart")]
    AdminSession,

    /// A cart line references a product the catalog no longer resolves.
    /// This indicates a broken invariant upstream and aborts the operation.
    #[error("cart line references unknown product {0}")]
    MissingProduct(ProductId),

    /// The injected settlement strategy refused the checkout.
    #[error("settlement failed: {0}")]
    Settlement(String),
}

/// A product/quantity pair in the cart. Quantity is always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Units of the product, at least one.
    pub quantity: u32,
}

/// The result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Total at the moment of checkout.
    pub total: Decimal,
    /// Units across all lines.
    pub item_count: u32,
    /// When the checkout completed.
    pub completed_at: DateTime<Utc>,
}

/// Strategy invoked by [`Cart::checkout`] before the cart is cleared.
///
/// A future payment or inventory service slots in here without changing
/// any checkout call site.
pub trait Settlement {
    /// Settle the purchase described by `lines` for `total`.
    ///
    /// # Errors
    ///
    /// Returns a reason string when the purchase cannot be completed; the
    /// cart is left untouched in that case.
    fn settle(&mut self, total: Decimal, lines: &[CartLine]) -> Result<(), String>;
}

/// The observed design: checkout completes in memory with no external
/// settlement.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSettlement;

impl Settlement for LocalSettlement {
    fn settle(&mut self, _total: Decimal, _lines: &[CartLine]) -> Result<(), String> {
        Ok(())
    }
}

/// The mutable collection of product/quantity pairs accumulated by a
/// non-admin session before checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`: increments an existing line, or appends
    /// a new line with quantity 1.
    ///
    /// Taking the full [`Product`] (not a bare id) means every line starts
    /// out backed by a catalog entry.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                quantity: 1,
            });
        }
    }

    /// Adjust the quantity of the line for `product_id` by `delta`.
    ///
    /// No-op when the line is absent. When the new quantity would be zero
    /// or negative the line is removed entirely, not clamped.
    pub fn change_quantity(&mut self, product_id: ProductId, delta: i32) {
        let Some(index) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return;
        };

        let new_quantity = i64::from(line.quantity) + i64::from(delta);
        if new_quantity <= 0 {
            self.lines.remove(index);
        } else {
            line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
    }

    /// Drop the line for `product_id` if present; no-op otherwise.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Sum of quantity x unit price across all lines, resolved against
    /// `catalog`. Recomputed on every call, never cached.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingProduct`] if any line references a
    /// product absent from the catalog. The mismatch is an invariant
    /// breach and aborts the computation rather than skipping the line.
    pub fn subtotal(&self, catalog: &Catalog) -> Result<Decimal, CartError> {
        self.lines.iter().try_fold(Decimal::ZERO, |acc, line| {
            let product = catalog
                .get(line.product_id)
                .ok_or(CartError::MissingProduct(line.product_id))?;
            Ok(acc + product.price.line_total(line.quantity))
        })
    }

    /// Finalize the cart: compute the total, run `settlement`, and clear
    /// all lines on success.
    ///
    /// # Errors
    ///
    /// - [`CartError::EmptyCart`] when there are no lines; the cart is
    ///   unchanged
    /// - [`CartError::MissingProduct`] if the total cannot be computed
    /// - [`CartError::Settlement`] if the strategy refuses; the cart is
    ///   unchanged
    pub fn checkout(
        &mut self,
        catalog: &Catalog,
        settlement: &mut dyn Settlement,
    ) -> Result<CheckoutReceipt, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let total = self.subtotal(catalog)?;
        let item_count = self.item_count();

        settlement
            .settle(total, &self.lines)
            .map_err(CartError::Settlement)?;

        self.lines.clear();

        Ok(CheckoutReceipt {
            total,
            item_count,
            completed_at: Utc::now(),
        })
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
