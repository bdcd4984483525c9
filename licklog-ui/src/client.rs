//! licklog-api client
//!
//! [`LickClient`] is the seam between the view controller and the network;
//! [`HttpLickClient`] implements it over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use licklog_common::api::types::{DeleteOutcome, IndexOptions, LickQuery};
use licklog_common::db::{Lick, Note};
use licklog_common::SortedLicks;
use serde::de::DeserializeOwned;
use thiserror::Error;

const USER_AGENT: &str = concat!("licklog-ui/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Data operations the view controller consumes
#[async_trait]
pub trait LickClient: Send + Sync {
    /// Filtered and sorted licks of one user
    async fn fetch_licks(&self, user_id: i64, query: &LickQuery) -> Result<SortedLicks, ClientError>;

    /// One lick with tonalities, backing tracks and notes
    async fn fetch_lick(&self, user_id: i64, lick_id: i64) -> Result<Lick, ClientError>;

    async fn fetch_notes(&self, user_id: i64) -> Result<Vec<Note>, ClientError>;

    /// Deleting a lick that is already gone reports [`DeleteOutcome::NotFound`]
    async fn delete_lick(&self, user_id: i64, lick_id: i64) -> Result<DeleteOutcome, ClientError>;

    /// Filter and sort choices for the index form
    async fn fetch_index_options(&self, user_id: i64) -> Result<IndexOptions, ClientError>;
}

/// HTTP client for licklog-api
pub struct HttpLickClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpLickClient {
    /// `base_url` without trailing slash, e.g. `http://127.0.0.1:5790`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&LickQuery>,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let mut request = self.http_client.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LickClient for HttpLickClient {
    async fn fetch_licks(&self, user_id: i64, query: &LickQuery) -> Result<SortedLicks, ClientError> {
        self.get_json(&format!("/users/{user_id}/licks"), Some(query))
            .await
    }

    async fn fetch_lick(&self, user_id: i64, lick_id: i64) -> Result<Lick, ClientError> {
        self.get_json(&format!("/users/{user_id}/licks/{lick_id}"), None)
            .await
    }

    async fn fetch_notes(&self, user_id: i64) -> Result<Vec<Note>, ClientError> {
        self.get_json(&format!("/users/{user_id}/notes"), None).await
    }

    async fn delete_lick(&self, user_id: i64, lick_id: i64) -> Result<DeleteOutcome, ClientError> {
        let url = self.url(&format!("/users/{user_id}/licks/{lick_id}"));
        tracing::debug!(url = %url, "DELETE");

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(DeleteOutcome::NotFound);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(status.as_u16(), error_text));
        }

        tracing::info!(user_id, lick_id, "Lick deleted");
        Ok(DeleteOutcome::Deleted)
    }

    async fn fetch_index_options(&self, user_id: i64) -> Result<IndexOptions, ClientError> {
        self.get_json(&format!("/users/{user_id}/options"), None)
            .await
    }
}
