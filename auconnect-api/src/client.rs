//! HTTP plumbing shared by every endpoint group.
//!
//! [`ApiClient`] is a thin typed wrapper over one `reqwest::Client`
//! against a fixed backend origin. It carries no retry or cancellation
//! machinery: a request that has been issued runs to completion, and the
//! caller decides what a failure means.

use auconnect_common::media::MediaUrlResolver;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("Server replied with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The request never completed (connect, send or read failure).
    #[error("Error reaching the server: {0}")]
    Transport(#[source] reqwest::Error),
    /// The reply arrived but its body did not match the expected shape.
    #[error("Error decoding the response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// The HTTP status for server-side rejections, `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value)
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolver for media paths served relative to this backend.
    #[must_use]
    pub fn media_resolver(&self) -> MediaUrlResolver {
        MediaUrlResolver::new(&self.base_url)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        Self::parse(response).await
    }

    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::check(response).await.map(|_| ())
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        debug!(path, "POST");
        let response = self.http.post(self.url(path)).send().await?;
        Self::check(response).await.map(|_| ())
    }

    pub(crate) async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(path, "PUT");
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    pub(crate) async fn put_unit<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        debug!(path, "PUT");
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::check(response).await.map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        Self::check(response).await.map(|_| ())
    }

    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    pub(crate) async fn parse<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let response = Self::check(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::ApiClient;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/posts"), "http://localhost:8080/api/posts");
    }
}
