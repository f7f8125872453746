use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::debug;

use crate::models::{CredentialToken, TokenError};

/// Holder of the default `Authorization` header for outbound calls.
pub trait CredentialHeader: Send + Sync {
    fn set_bearer(&self, token: &CredentialToken) -> Result<(), TokenError>;
    fn clear_bearer(&self);
    fn bearer(&self) -> Option<String>;
}

/// Shared HTTP client for the fleet API.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    authorization: Mutex<Option<HeaderValue>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API url '{}'", base_url))?;
        // `Url::join` drops the last segment unless the base ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url,
            authorization: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Starts a request against the API, carrying the credential header if one is set.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid API path '{}'", path))?;
        let mut builder = self.client.request(method, url);
        let authorization = self
            .authorization
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        Ok(builder)
    }
}

impl CredentialHeader for ApiClient {
    fn set_bearer(&self, token: &CredentialToken) -> Result<(), TokenError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| TokenError::InvalidHeader)?;
        value.set_sensitive(true);
        *self.authorization.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        debug!("Authorization header set");
        Ok(())
    }

    fn clear_bearer(&self) {
        *self.authorization.lock().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("Authorization header removed");
    }

    fn bearer(&self) -> Option<String> {
        self.authorization
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }
}
