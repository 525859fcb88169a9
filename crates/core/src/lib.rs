//! Apteka Core - Shared types library.
//!
//! This crate provides common types used across all Apteka components:
//! - `storefront` - Catalog, cart, and checkout engine
//! - `cli` - Command-line front end for browsing and ordering
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records and type-safe ID wrappers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
