//! Rule-based assistant over local product data with a remote fallback.
//!
//! `ask` first runs the query through an ordered table of local rules (see
//! [`rules`]); only when no rule produces an answer does it delegate to the
//! configured remote endpoint, passing the raw prompt plus a flattened text
//! summary of the catalog. Any remote failure degrades to a canned message -
//! the assistant never fails to the caller.

mod rules;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};
use url::Url;

use crate::catalog::CatalogStore;

/// Canned answer when neither local rules nor the remote service produced
/// anything.
pub const FALLBACK_MESSAGE: &str =
    "I recommend consulting a healthcare professional for medical advice.";

/// Timeout for remote assistant calls.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(20);

/// Remote assistant failures; callers degrade to [`FALLBACK_MESSAGE`], so
/// these only ever reach logs.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant endpoint returned a blank response")]
    BlankResponse,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
    context: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: Option<String>,
}

/// Client for the remote assistant endpoint (a server-side proxy that holds
/// the actual model credentials).
#[derive(Debug, Clone)]
pub struct RemoteAssistant {
    client: reqwest::Client,
    endpoint: Url,
}

impl RemoteAssistant {
    /// Create a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: Url) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder().timeout(REMOTE_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }

    /// Send the prompt and catalog context; returns the trimmed response
    /// text.
    ///
    /// # Errors
    ///
    /// Returns an error for HTTP failures, non-success statuses, unparseable
    /// bodies, or a blank response field.
    pub async fn ask(&self, prompt: &str, context: &str) -> Result<String, AssistantError> {
        let body = ChatRequest { prompt, context };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let parsed: ChatResponse = response.json().await?;
        parsed
            .response
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or(AssistantError::BlankResponse)
    }
}

/// The assistant: local rules first, then the optional remote endpoint.
#[derive(Debug, Clone, Default)]
pub struct Assistant {
    remote: Option<RemoteAssistant>,
}

impl Assistant {
    #[must_use]
    pub const fn new(remote: Option<RemoteAssistant>) -> Self {
        Self { remote }
    }

    /// Answer a free-text question. Never fails: local rules, then the
    /// remote endpoint, then the canned fallback.
    #[instrument(skip(self, catalog))]
    pub async fn ask(&self, prompt: &str, catalog: &CatalogStore) -> String {
        if let Some(answer) = rules::answer_from_local(prompt, catalog) {
            return answer;
        }

        match &self.remote {
            Some(remote) => match remote.ask(prompt, &build_context(catalog)).await {
                Ok(answer) => answer,
                Err(e) => {
                    warn!(error = %e, "remote assistant failed, using canned fallback");
                    FALLBACK_MESSAGE.to_string()
                }
            },
            None => FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Flatten the catalog to one `name | category | ingredient | price | stock`
/// line per product for the remote prompt context.
#[must_use]
pub fn build_context(catalog: &CatalogStore) -> String {
    catalog
        .all()
        .iter()
        .map(|p| {
            format!(
                "{} | {} | {} | ₽{} | Stock: {}",
                p.name, p.category, p.active_ingredient, p.price, p.stock
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LoadStatus, test_support::fallback_products};

    fn catalog() -> CatalogStore {
        CatalogStore::new(fallback_products(), LoadStatus::Primary)
    }

    #[tokio::test]
    async fn test_local_rule_answers_without_remote() {
        let assistant = Assistant::new(None);
        let answer = assistant
            .ask("Do you have aspirin in stock?", &catalog())
            .await;
        assert!(answer.contains("Aspirin Plus"));
    }

    #[tokio::test]
    async fn test_no_rule_and_no_remote_gives_canned_fallback() {
        let assistant = Assistant::new(None);
        let answer = assistant
            .ask("What is the meaning of life?", &catalog())
            .await;
        assert_eq!(answer, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_unreachable_remote_gives_canned_fallback() {
        let endpoint = Url::parse("http://127.0.0.1:9/api/chat").unwrap();
        let assistant = Assistant::new(Some(RemoteAssistant::new(endpoint).unwrap()));
        let answer = assistant
            .ask("What is the meaning of life?", &catalog())
            .await;
        assert_eq!(answer, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_context_has_one_line_per_product() {
        let catalog = catalog();
        let context = build_context(&catalog);
        assert_eq!(context.lines().count(), catalog.all().len());
        assert!(context.contains("Aspirin Plus | Pain Relief | Acetylsalicylic Acid"));
    }
}
