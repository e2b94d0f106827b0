use crate::error::Result;
use crate::models::PetRecord;
use crate::services::PetCatalog;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the pet backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Pet backend API client
///
/// Reads the pet population from the external pet CRUD service. The list
/// endpoint returns either a bare JSON array or a paginated envelope with
/// `results` and `next`; both are accepted.
pub struct PetBackendClient {
    base_url: String,
    api_token: Option<String>,
    max_pages: usize,
    client: Client,
}

impl PetBackendClient {
    /// Create a new pet backend client
    pub fn new(
        base_url: String,
        api_token: Option<String>,
        timeout: Duration,
        max_pages: usize,
    ) -> std::result::Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_token: api_token.filter(|t| !t.is_empty()),
            max_pages: max_pages.max(1),
            client,
        })
    }

    fn pets_url(&self) -> String {
        format!("{}/api/pets/", self.base_url.trim_end_matches('/'))
    }

    /// Fetch every pet, following pagination links
    ///
    /// More than `max_pages` pages is an error rather than a truncated list.
    pub async fn fetch_pets(&self) -> std::result::Result<Vec<PetRecord>, BackendError> {
        let mut pets = Vec::new();
        let mut next = Some(self.pets_url());
        let mut pages = 0;

        while let Some(url) = next.take() {
            // ranking a partial population would silently hide pets
            if pages == self.max_pages {
                tracing::error!("Pet list exceeds {} pages, next: {}", self.max_pages, url);
                return Err(BackendError::InvalidResponse(format!(
                    "Pet list exceeds {} pages",
                    self.max_pages
                )));
            }
            pages += 1;

            let json = self.get_json(&url).await?;
            let (documents, next_url) = split_page(json)?;

            pets.extend(documents.into_iter().filter_map(|doc| {
                match serde_json::from_value::<PetRecord>(doc) {
                    Ok(pet) => Some(pet),
                    Err(e) => {
                        tracing::warn!("Skipping malformed pet record: {}", e);
                        None
                    }
                }
            }));
            next = next_url;
        }

        tracing::debug!("Fetched {} pets in {} page(s)", pets.len(), pages);

        Ok(pets)
    }

    async fn get_json(&self, url: &str) -> std::result::Result<Value, BackendError> {
        tracing::debug!("Fetching pets from: {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Pet backend returned {}: {}", status, body);
            return Err(BackendError::ApiError(format!("Failed to fetch pets: {}", status)));
        }

        Ok(response.json().await?)
    }
}

/// Split one list response into its documents and the next page link
fn split_page(json: Value) -> std::result::Result<(Vec<Value>, Option<String>), BackendError> {
    match json {
        Value::Array(documents) => Ok((documents, None)),
        Value::Object(mut envelope) => {
            let documents = match envelope.remove("results") {
                Some(Value::Array(documents)) => documents,
                _ => {
                    return Err(BackendError::InvalidResponse(
                        "Missing results array".into(),
                    ))
                }
            };
            let next = envelope
                .remove("next")
                .and_then(|n| n.as_str().map(str::to_string));
            Ok((documents, next))
        }
        other => Err(BackendError::InvalidResponse(format!(
            "Expected array or object, got {}",
            other
        ))),
    }
}

#[async_trait]
impl PetCatalog for PetBackendClient {
    async fn list_pets(&self) -> Result<Vec<PetRecord>> {
        Ok(self.fetch_pets().await?)
    }
}
