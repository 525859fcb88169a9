//! Checkout hand-off to an external messaging channel.
//!
//! "Checkout" here is the whole story: validate the customer fields, format
//! an itemized order summary, and build an outbound WhatsApp link carrying
//! the summary URL-encoded. There is no payment capture and no order
//! persistence; payment details are arranged over the channel.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::CartLine;

/// Recoverable checkout failures; these block the hand-off and re-prompt,
/// they are never logged as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// A required field was empty after trimming.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// No line items were passed (e.g. "buy selected" with nothing
    /// selected).
    #[error("no items to order")]
    EmptyOrder,
}

/// A validated order ready for hand-off.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    customer: String,
    address: String,
    lines: Vec<CartLine>,
}

impl Order {
    /// Validate and build an order from customer details and line items
    /// (either the full cart or the selected subset).
    ///
    /// # Errors
    ///
    /// [`CheckoutError::Validation`] when name or address is empty after
    /// trimming; [`CheckoutError::EmptyOrder`] when `lines` is empty.
    pub fn new(
        customer: &str,
        address: &str,
        lines: Vec<CartLine>,
    ) -> Result<Self, CheckoutError> {
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(CheckoutError::Validation("name"));
        }
        let address = address.trim();
        if address.is_empty() {
            return Err(CheckoutError::Validation("address"));
        }
        if lines.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }
        Ok(Self {
            customer: customer.to_string(),
            address: address.to_string(),
            lines,
        })
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Grand total across all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// The plain-text order summary sent over the messaging channel:
    /// customer, address, one line per item with its subtotal, grand total.
    #[must_use]
    pub fn summary(&self) -> String {
        let items = self
            .lines
            .iter()
            .map(|l| format!("{} × {} → ₽{}", l.name, l.qty, l.subtotal()))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "🛒 New Order!\n\nCustomer: {}\nAddress: {}\n\nItems:\n{}\n\nTotal: ₽{}\n\nPlease confirm payment details.",
            self.customer,
            self.address,
            items,
            self.total()
        )
    }

    /// Outbound link: `https://wa.me/<phone>?text=<summary, URL-encoded>`.
    #[must_use]
    pub fn whatsapp_url(&self, phone: &str) -> String {
        format!(
            "https://wa.me/{phone}?text={}",
            urlencoding::encode(&self.summary())
        )
    }
}
