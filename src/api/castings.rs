//! Casting backend client
//!
//! Thin wrapper over the casting REST API: list/create/update/delete
//! castings and submit applications. No retries, no caching.

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ApplicationFields, Casting, CastingFields, CastingId};

/// Default API root for a locally running backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

const LIST_FAILED: &str = "Failed to fetch opportunities";
const SAVE_FAILED: &str = "Failed to save casting";
const DELETE_FAILED: &str = "Failed to delete casting";
const APPLY_FAILED: &str = "Failed to submit application";

/// Casting API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// HTTP status for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body convention: `{"error": "<message>"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Casting API client
#[derive(Debug, Clone)]
pub struct CastingClient {
    base_url: String,
    client: reqwest::Client,
}

impl CastingClient {
    /// Create a client against the given API root (e.g. `http://host/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all castings in server order
    pub async fn list_castings(&self) -> Result<Vec<Casting>, ApiError> {
        let response = self
            .send::<()>(Method::GET, "/castings/", None, LIST_FAILED)
            .await?;
        Self::decode(response).await
    }

    /// Create a casting; the server assigns the id
    pub async fn create_casting(&self, fields: &CastingFields) -> Result<Casting, ApiError> {
        let response = self
            .send(Method::POST, "/castings/", Some(fields), SAVE_FAILED)
            .await?;
        let casting: Casting = Self::decode(response).await?;
        tracing::info!(id = %casting.id, title = %casting.title, "created casting");
        Ok(casting)
    }

    /// Replace every field of an existing casting
    pub async fn update_casting(
        &self,
        id: &CastingId,
        fields: &CastingFields,
    ) -> Result<Casting, ApiError> {
        let path = format!("/castings/{}/", id.as_path_segment());
        let response = self
            .send(Method::PUT, &path, Some(fields), SAVE_FAILED)
            .await?;
        let casting: Casting = Self::decode(response).await?;
        tracing::info!(id = %casting.id, "updated casting");
        Ok(casting)
    }

    /// Delete a casting. Irreversible.
    pub async fn delete_casting(&self, id: &CastingId) -> Result<(), ApiError> {
        let path = format!("/castings/{}/", id.as_path_segment());
        self.send::<()>(Method::DELETE, &path, None, DELETE_FAILED)
            .await?;
        tracing::info!(%id, "deleted casting");
        Ok(())
    }

    /// Submit an application; any success body is ignored
    pub async fn create_application(&self, fields: &ApplicationFields) -> Result<(), ApiError> {
        self.send(Method::POST, "/applications/", Some(fields), APPLY_FAILED)
            .await?;
        tracing::info!(casting = %fields.casting, "submitted application");
        Ok(())
    }

    /// Send a request and map non-success statuses to `ApiError::Api`
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed");
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::error_message(response, fallback).await;
        tracing::warn!(%method, %url, status = status.as_u16(), %message, "api error");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Pull `error` out of the body, or fall back to the generic message
    async fn error_message(response: Response, fallback: &str) -> String {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::InvalidResponse("empty response body".into()));
        }
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("failed to read body: {}", e)))?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

impl Default for CastingClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
