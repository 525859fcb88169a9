//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; defaults match the reference deployment. A set-but-empty
//! variable counts as unset.
//!
//! - `APTEKA_CATALOG_SOURCE` - Catalog URL or file path (default:
//!   `products.json`)
//! - `APTEKA_DATA_DIR` - Directory for persisted cart and local products
//!   (default: `.apteka`)
//! - `APTEKA_WHATSAPP_PHONE` - Phone number for the checkout hand-off link
//! - `APTEKA_ASSISTANT_URL` - Remote assistant endpoint; unset disables the
//!   remote fallback
//! - `APTEKA_PAGE_SIZE` - Products per page (default: 6)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default products-per-page, matching the reference front end.
pub const DEFAULT_PAGE_SIZE: usize = 6;

const DEFAULT_CATALOG_SOURCE: &str = "products.json";
const DEFAULT_DATA_DIR: &str = ".apteka";
const DEFAULT_WHATSAPP_PHONE: &str = "995597006664";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog source: HTTP(S) URL or filesystem path.
    pub catalog_source: String,
    /// Directory holding the persisted cart and local product additions.
    pub data_dir: PathBuf,
    /// Destination phone number for the checkout hand-off.
    pub whatsapp_phone: String,
    /// Remote assistant endpoint; `None` disables the remote fallback.
    pub assistant_url: Option<Url>,
    /// Products per page in the catalog view.
    pub page_size: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_source: DEFAULT_CATALOG_SOURCE.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            whatsapp_phone: DEFAULT_WHATSAPP_PHONE.to_string(),
            assistant_url: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] for a malformed assistant URL,
    /// a non-numeric phone number, or an unparseable page size.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source. The env read is injected
    /// so every validation path is testable without mutating process state.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(source) = set_and_nonempty(get("APTEKA_CATALOG_SOURCE")) {
            config.catalog_source = source;
        }

        if let Some(dir) = set_and_nonempty(get("APTEKA_DATA_DIR")) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(phone) = set_and_nonempty(get("APTEKA_WHATSAPP_PHONE")) {
            config.whatsapp_phone = parse_phone(&phone)?;
        }

        if let Some(url) = set_and_nonempty(get("APTEKA_ASSISTANT_URL")) {
            config.assistant_url = Some(parse_assistant_url(&url)?);
        }

        if let Some(size) = set_and_nonempty(get("APTEKA_PAGE_SIZE")) {
            config.page_size = parse_page_size(&size)?;
        }

        Ok(config)
    }
}

/// A set-but-empty variable counts as unset; the same rule for every field.
fn set_and_nonempty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_phone(raw: &str) -> Result<String, ConfigError> {
    if raw.chars().all(|c| c.is_ascii_digit()) {
        Ok(raw.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "APTEKA_WHATSAPP_PHONE",
            "expected digits only".to_string(),
        ))
    }
}

fn parse_assistant_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("APTEKA_ASSISTANT_URL", e.to_string()))
}

fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    let parsed: usize = raw.parse().map_err(|_| {
        ConfigError::InvalidEnvVar("APTEKA_PAGE_SIZE", format!("not a number: {raw}"))
    })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "APTEKA_PAGE_SIZE",
            "must be positive".to_string(),
        ));
    }
    Ok(parsed)
}
