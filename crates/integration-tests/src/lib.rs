//! Integration tests for the Apteka storefront.
//!
//! The tests in `tests/` exercise the engine across component boundaries:
//! catalog loading from a file source, the query pipeline over a loaded
//! catalog, and the cart's persistence round-trip through real storage.
//!
//! ```bash
//! cargo test -p apteka-integration-tests
//! ```
//!
//! This crate only provides shared fixtures; everything interesting lives in
//! the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use apteka_storefront::config::StorefrontConfig;

/// A small catalog covering the behaviors the tests need: multiple
/// categories, an out-of-stock product, and tied prices for sort stability.
pub const SAMPLE_CATALOG: &str = r#"[
  {
    "id": 1,
    "name": "Aspirin Plus",
    "price": 509.0,
    "description": "Pain relief and anti-inflammatory tablets.",
    "category": "Pain Relief",
    "active_ingredient": "Acetylsalicylic Acid",
    "stock": 45
  },
  {
    "id": 2,
    "name": "Vitamin D3 Supreme",
    "price": 59.0,
    "description": "Premium vitamin D3 supplement.",
    "category": "Vitamins & Supplements",
    "active_ingredient": "Cholecalciferol",
    "stock": 120
  },
  {
    "id": 3,
    "name": "Vitamin C Complex",
    "price": 59.0,
    "description": "Buffered vitamin C with rose hips.",
    "category": "Vitamins & Supplements",
    "active_ingredient": "Ascorbic Acid",
    "stock": 80
  },
  {
    "id": 4,
    "name": "Magnesium Complex",
    "price": 74.0,
    "description": "High-absorption magnesium glycinate.",
    "category": "Minerals",
    "active_ingredient": "Magnesium Glycinate",
    "stock": 0
  }
]"#;

/// Write the sample catalog into `dir` and return its path.
///
/// # Panics
///
/// Panics on I/O failure; fixtures fail fast.
#[must_use]
pub fn write_sample_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("products.json");
    std::fs::write(&path, SAMPLE_CATALOG).expect("failed to write catalog fixture");
    path
}

/// A config pointing at a file catalog and an isolated data directory, with
/// the remote assistant disabled.
#[must_use]
pub fn file_config(catalog: &Path, data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        catalog_source: catalog.display().to_string(),
        data_dir: data_dir.to_path_buf(),
        assistant_url: None,
        ..StorefrontConfig::default()
    }
}
