//! HTTP client for the memo API.
//!
//! The binary fills in the base URL and API key from `--url` / `--api-key`
//! (or `MEMO_API_URL` / `MEMO_API_KEY`).

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::*;

/// Default URL for local development.
pub const DEFAULT_URL: &str = "http://127.0.0.1:3000/api";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: API key required or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct MemoClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl MemoClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ClientError::BadRequest(body))
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => Err(ClientError::Server(format!("{}: {}", status, body))),
        }
    }

    pub async fn list_memos(&self) -> Result<Vec<MemoResponse>, ClientError> {
        let response = self.request(Method::GET, "/memos").send().await?;
        self.handle_response(response).await
    }

    pub async fn get_memo(&self, id: i64) -> Result<MemoResponse, ClientError> {
        let response = self
            .request(Method::GET, &format!("/memos/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn create_memo(&self, input: &MemoRequest) -> Result<MemoResponse, ClientError> {
        let response = self
            .request(Method::POST, "/memos")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Returns the id of the updated memo.
    pub async fn update_memo(&self, id: i64, input: &MemoRequest) -> Result<i64, ClientError> {
        let response = self
            .request(Method::PUT, &format!("/memos/{}", id))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Returns the id of the deleted memo.
    pub async fn delete_memo(&self, id: i64) -> Result<i64, ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/memos/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.request(Method::GET, "/health").send().await?;
        self.handle_response(response).await
    }
}
