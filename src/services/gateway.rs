use std::sync::{Arc, RwLock};
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::dto::api_dto::ErrorBody;
use crate::error::{Error, Result, DEFAULT_REQUEST_ERROR_MESSAGE};

/// Source of the bearer token, read once per outgoing request.
pub trait CredentialProvider: Send + Sync {
    fn current_token(&self) -> Option<String>;
}

/// Fixed token, typically taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }
}

impl CredentialProvider for StaticCredential {
    fn current_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Token owned by a login flow outside this crate; it may be replaced or
/// cleared at any time and the next request sees the change.
#[derive(Debug, Clone, Default)]
pub struct SessionCredential {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionCredential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

impl CredentialProvider for SessionCredential {
    fn current_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }
}

/// The only component that talks to the external API.
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl Gateway {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url, credentials)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL {} cannot hold a path",
                base_url
            )));
        }
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Appends `segments` to the base URL. Each segment is percent-encoded,
    /// so ids containing `/` or `?` stay a single path segment.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// JSON request with the bearer header attached when a token is available.
    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.raw_request(method, segments)
            .header(ACCEPT, "application/json")
    }

    fn raw_request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        let builder = self.client.request(method, url.clone());
        match self.credentials.current_token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => {
                debug!(path = url.path(), "no session token available, sending request without credentials");
                builder
            }
        }
    }

    /// Sends the request and decodes the JSON body, turning non-2xx answers
    /// into `Error::Request` with the server's message.
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(request_error(status.as_u16(), &body));
        }

        if body.is_empty() {
            return Ok(serde_json::from_slice(b"{}")?);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches a binary resource such as an export file.
    pub async fn download(&self, segments: &[&str]) -> Result<Bytes> {
        let response = self.raw_request(Method::GET, segments).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(request_error(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn request_error(status: u16, body: &[u8]) -> Error {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REQUEST_ERROR_MESSAGE.to_string());
    warn!(status, %message, "API request failed");
    Error::Request { status, message }
}
