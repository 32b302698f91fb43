//! # REST Client
//!
//! Thin wrapper over `reqwest` for a generic CRUD API: list a collection
//! filtered by query parameters, create a record, remove a record.

use anyhow::Result;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Any failed backend call
///
/// The variants only exist for logging. Callers treat every variant the same
/// way: the flow that issued the call shows its error state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            NetworkError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            NetworkError::Status(status.as_u16())
        } else {
            NetworkError::Transport(error.to_string())
        }
    }
}

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        tracing::debug!("RestClient created for {base_url} (timeout {timeout:?})");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn check_status(response: Response) -> std::result::Result<Response, NetworkError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(NetworkError::Status(status.as_u16()))
        }
    }

    /// `GET path?query` decoded as a JSON array. An empty array is a success.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<Vec<T>, NetworkError> {
        let url = self.endpoint(path);
        tracing::debug!("GET {url} {query:?}");

        let response = self.client.get(&url).query(query).send().await?;
        let items = Self::check_status(response)?.json::<Vec<T>>().await?;

        tracing::debug!("GET {url} returned {} item(s)", items.len());
        Ok(items)
    }

    /// `POST path` with a JSON body, decoding the created record
    pub async fn create<B, T>(&self, path: &str, body: &B) -> std::result::Result<T, NetworkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("POST {url}");

        let response = self.client.post(&url).json(body).send().await?;
        Ok(Self::check_status(response)?.json::<T>().await?)
    }

    /// `DELETE path`; the response body is ignored
    pub async fn remove(&self, path: &str) -> std::result::Result<(), NetworkError> {
        let url = self.endpoint(path);
        tracing::debug!("DELETE {url}");

        let response = self.client.delete(&url).send().await?;
        Self::check_status(response)?;
        Ok(())
    }
}
