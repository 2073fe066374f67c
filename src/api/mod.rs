//! HTTP access to the portal API. Every call goes through [`ApiClient::send`],
//! which attaches the JSON and bearer headers, parses the body and hands it to
//! [`normalize`]. Transport failures never escape as Rust errors; they come
//! back as a `NETWORK_ERROR` [`ApiError`] like any other failed result.
//!
//! The client does not store tokens. Callers pass the bearer token per call
//! and must avoid logging it.

mod endpoints;
pub mod normalize;
pub mod types;

pub use self::normalize::normalize;
pub use self::types::{
    ApiError, ApiResult, ChangePasswordRequest, ErrorCode, ForgotPasswordRequest, LoginRequest,
    LoginResponse, MessageResponse, ResetPasswordRequest, User, VerifyOtpRequest,
};

use crate::{config::AppConfig, error::Result};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

const JSON: &str = "application/json";

/// Thin wrapper over a `reqwest` client bound to the configured API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds the HTTP client with the configured timeout and user agent.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a `GET` request and returns the normalized body.
    pub async fn get(&self, path: &str, token: Option<&SecretString>) -> ApiResult {
        let url = self.url(path);
        let builder = self.http.get(&url);
        self.send(Method::GET, &url, builder, token).await
    }

    /// Issues a `POST` request with a JSON body and returns the normalized body.
    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&SecretString>,
    ) -> ApiResult {
        let url = self.url(path);
        let builder = self.http.post(&url).json(body);
        self.send(Method::POST, &url, builder, token).await
    }

    /// Builds a URL from the configured base URL and the provided path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        builder: RequestBuilder,
        token: Option<&SecretString>,
    ) -> ApiResult {
        let mut builder = builder.header(CONTENT_TYPE, JSON).header(ACCEPT, JSON);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }

        let span = info_span!(
            "api.request",
            http.method = %method,
            url = %url,
            authenticated = token.is_some()
        );

        let response = match builder.send().instrument(span).await {
            Ok(response) => response,
            Err(err) => {
                warn!("request to {} failed: {}", url, err);
                return Err(ApiError::network());
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to read response body from {}: {}", url, err);
                return Err(ApiError::network());
            }
        };

        let body: Value = match serde_json::from_slice(&body) {
            Ok(body) => body,
            Err(err) => {
                warn!("malformed JSON from {} ({}): {}", url, status, err);
                return Err(ApiError::network());
            }
        };

        debug!("{} {} -> {}", method, url, status);

        match normalize(body) {
            Ok(payload) if !status.is_success() => {
                Err(ApiError::http_status(status.as_u16(), payload))
            }
            result => result,
        }
    }
}

/// Decodes a normalized payload into a typed response.
///
/// A payload that does not match the expected type is reported as
/// `UNEXPECTED_RESPONSE` with the payload kept in `details`.
pub(crate) fn decode<T: DeserializeOwned>(payload: Value) -> ApiResult<T> {
    T::deserialize(&payload).map_err(|err| {
        debug!("failed to decode response payload: {}", err);
        ApiError::unexpected(payload)
    })
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
