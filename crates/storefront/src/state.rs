//! Application facade bundling the storefront components.
//!
//! Front ends construct an [`App`] once and drive everything through it.
//! Components take the data they need as arguments (the cart receives a
//! resolved stock bound, not the catalog) so each stays independently
//! testable; this facade is just the wiring.

use apteka_core::ProductId;
use tracing::instrument;

use crate::assistant::{Assistant, RemoteAssistant};
use crate::cart::{CartEngine, QuantityOutcome};
use crate::catalog::{CatalogLoader, CatalogSource, CatalogStore};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::pagination::Paginator;
use crate::storage::JsonStore;

/// A fully initialized storefront: loaded catalog, restored cart, paginator,
/// assistant.
pub struct App {
    config: StorefrontConfig,
    storage: JsonStore,
    catalog: CatalogStore,
    cart: CartEngine,
    paginator: Paginator,
    assistant: Assistant,
}

impl App {
    /// Initialize the storefront: open storage, load the catalog (with
    /// fallback and local merge), restore the persisted cart.
    ///
    /// # Errors
    ///
    /// Fails only when storage cannot be opened or no catalog data exists
    /// in any source.
    #[instrument(skip(config))]
    pub async fn init(config: StorefrontConfig) -> Result<Self> {
        let storage = JsonStore::open(&config.data_dir)?;

        let source = CatalogSource::parse(&config.catalog_source);
        let catalog = CatalogLoader::new(source)?.load(&storage).await?;

        let cart = CartEngine::new(Box::new(storage.clone()));

        let remote = match &config.assistant_url {
            Some(url) => Some(RemoteAssistant::new(url.clone())?),
            None => None,
        };

        Ok(Self {
            paginator: Paginator::new(config.page_size),
            assistant: Assistant::new(remote),
            config,
            storage,
            catalog,
            cart,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn storage(&self) -> &JsonStore {
        &self.storage
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub const fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartEngine {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartEngine {
        &mut self.cart
    }

    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub const fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    #[must_use]
    pub const fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Set a cart line's quantity, resolving the stock bound from the
    /// current catalog (stale lines fall back to their own quantity).
    pub fn set_cart_quantity(
        &mut self,
        id: ProductId,
        requested: u32,
    ) -> Option<QuantityOutcome> {
        let stock = self.catalog.find(id).map(|p| p.stock);
        self.cart.set_quantity(id, requested, stock)
    }

    /// Ask the assistant a question against the loaded catalog.
    pub async fn ask(&self, prompt: &str) -> String {
        self.assistant.ask(prompt, &self.catalog).await
    }
}
