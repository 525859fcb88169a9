//! Unified error handling for the storefront engine.
//!
//! Expected, recoverable outcomes (stock limits, checkout validation) are
//! typed values the presentation layer turns into transient notices. Only
//! genuinely fatal conditions - no catalog data from any source, unusable
//! configuration - propagate here as hard failures, and the top level must
//! degrade to a visible, actionable error state rather than a blank screen.

use thiserror::Error;

use crate::assistant::AssistantError;
use crate::cart::CartError;
use crate::catalog::LoadError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog unavailable from every source - fatal to initial render.
    #[error("Catalog error: {0}")]
    Load(#[from] LoadError),

    /// Persistence read/write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stock-bounded cart operation declined.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout blocked by validation.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Remote assistant failure (normally degraded to a canned answer
    /// before reaching this type).
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
