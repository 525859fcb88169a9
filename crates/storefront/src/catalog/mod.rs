//! The product catalog and its filtered view.
//!
//! `CatalogStore` owns the full product list in load order plus the current
//! filtered/sorted view. The view is a list of indices into the full list, so
//! every view element *is* a catalog element by construction and the view can
//! never outgrow the catalog. Each query re-derives the view from scratch;
//! there is no incremental update.

mod loader;

use apteka_core::{Product, ProductId};

use crate::query::{self, Query};
use crate::storage::{Storage, StorageError, namespaces};

pub use loader::{CatalogLoader, CatalogSource, LoadError, LoadStatus};

/// In-memory catalog: full product list, derived categories, current view.
#[derive(Debug)]
pub struct CatalogStore {
    products: Vec<Product>,
    categories: Vec<String>,
    view: Vec<usize>,
    status: LoadStatus,
}

impl CatalogStore {
    /// Build a store from a loaded product list.
    ///
    /// The initial view is the whole catalog; categories are the sorted
    /// distinct category values.
    #[must_use]
    pub fn new(products: Vec<Product>, status: LoadStatus) -> Self {
        let categories = derive_categories(&products);
        let view = (0..products.len()).collect();
        Self {
            products,
            categories,
            view,
            status,
        }
    }

    /// The full catalog in load order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Sorted distinct category values across the full catalog.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// How the catalog was obtained (primary source or fallback).
    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether the load fell back to the bundled dataset.
    #[must_use]
    pub const fn used_fallback(&self) -> bool {
        matches!(self.status, LoadStatus::Fallback { .. })
    }

    /// First product with the given id, in load order.
    ///
    /// Duplicate ids across merged sources are tolerated; lookups resolve to
    /// the first match (base catalog before local additions).
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in the current filtered/sorted view.
    #[must_use]
    pub fn view(&self) -> Vec<&Product> {
        self.view
            .iter()
            .filter_map(|&i| self.products.get(i))
            .collect()
    }

    /// Number of products in the current view.
    #[must_use]
    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Re-derive the view from the full catalog: category filter, then text
    /// search, then optional sort. Sort runs last so it is never overridden
    /// by a later stage.
    pub fn apply(&mut self, q: &Query) {
        let all: Vec<usize> = (0..self.products.len()).collect();
        let filtered =
            query::filter_by_category(&self.products, all, q.category.as_deref());
        let searched = match q.text.as_deref() {
            Some(text) => query::search(&self.products, filtered, text),
            None => filtered,
        };
        self.view = match q.sort {
            Some(sort) => query::sort_by(&self.products, searched, sort.key, sort.order),
            None => searched,
        };
    }

    /// Reset the view to the whole catalog.
    pub fn reset_view(&mut self) {
        self.view = (0..self.products.len()).collect();
    }

    /// Append a user-added product and persist it to the local-products
    /// namespace. Local additions survive reloads and are merged after the
    /// base catalog on the next load.
    ///
    /// # Errors
    ///
    /// Returns an error if the addition cannot be persisted; the in-memory
    /// catalog is updated regardless.
    pub fn add_local_product(
        &mut self,
        product: Product,
        storage: &dyn Storage,
    ) -> Result<(), StorageError> {
        self.products.push(product.clone());
        self.categories = derive_categories(&self.products);
        self.view.push(self.products.len() - 1);

        let mut local = loader::read_local_products(storage);
        local.push(product);
        let payload = serde_json::to_string(&local)?;
        storage.write(namespaces::LOCAL_PRODUCTS, &payload)
    }
}

fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> =
        products.iter().map(|p| p.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}
