//! CLI command implementations.

pub mod ask;
pub mod browse;
pub mod cart;
pub mod checkout;

use rust_decimal::Decimal;

/// Format a price for display. Single-currency store; the engine itself is
/// currency-agnostic.
pub(crate) fn rub(amount: Decimal) -> String {
    format!("{} ₽", amount.round_dp(2))
}
