//! Apteka Storefront library.
//!
//! This crate provides the storefront engine as a library: the product
//! catalog with its filtered view, the persistent shopping cart with
//! stock-bounded quantities, pagination over the current view, the checkout
//! hand-off to an external messaging channel, and a rule-based assistant.
//!
//! The engine is deliberately presentation-free. It deals in product records,
//! decimal prices, and typed outcomes; rendering, localization, and currency
//! formatting belong to whatever front end drives it (see `apteka-cli`).
//!
//! # Concurrency model
//!
//! Cart and query operations are synchronous, in-memory computations - no
//! call yields between checking stock and committing a quantity, which is
//! what keeps the stock/quantity invariants easy to reason about. Only the
//! catalog load and the assistant's remote fallback are async I/O.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod pagination;
pub mod query;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::App;
