//! HTTP client for the seller backend.
//!
//! Provides a small client that carries the seller's session token explicitly
//! (sent as `x-auth-token`), generic JSON/multipart helpers, and domain methods
//! for auth, profile, products and support tickets. Failures come back as
//! [`PortalError`] so callers can tell an expired session from other errors.

pub mod api;

use portal_core::{PortalConfig, PortalError};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Header the backend reads the session token from.
pub const AUTH_HEADER: &str = "x-auth-token";

const LOGIN_REQUIRED: &str = "Authentication required. Please log in.";

/// Session token returned by login. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// HTTP client for the seller backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<SessionToken>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PortalError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortalError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// Client for the configured backend, with the configured session token if any.
    pub fn from_config(config: &PortalConfig) -> Result<Self, PortalError> {
        let client = Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )?;
        Ok(match &config.auth_token {
            Some(token) => client.with_session(SessionToken::new(token.clone())),
            None => client,
        })
    }

    pub fn with_session(mut self, token: SessionToken) -> Self {
        self.session = Some(token);
        self
    }

    /// Replace or drop the session, e.g. after a login or an expired session.
    pub fn set_session(&mut self, token: Option<SessionToken>) {
        self.session = token;
    }

    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn apply_auth(&self, request: RequestBuilder) -> Result<RequestBuilder, PortalError> {
        match &self.session {
            Some(token) => Ok(request.header(AUTH_HEADER, token.expose())),
            None => Err(PortalError::Unauthorized(LOGIN_REQUIRED.to_string())),
        }
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        authenticated: bool,
    ) -> Result<RequestBuilder, PortalError> {
        let url = self.build_url(path);
        tracing::debug!(method = method.as_str(), url = %url, "Sending request");
        let request = self.client.request(method, &url);
        if authenticated {
            self.apply_auth(request)
        } else {
            Ok(request)
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, PortalError> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let err = error_for_status(status, &error_text);
            tracing::warn!(status = status.as_u16(), error = %err, "API request failed");
            return Err(err);
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PortalError> {
        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            PortalError::InvalidResponse(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        authenticated: bool,
    ) -> Result<T, PortalError> {
        let request = self.request(Method::GET, path, authenticated)?;
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        authenticated: bool,
    ) -> Result<T, PortalError> {
        let request = self.request(Method::POST, path, authenticated)?.json(body);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// PUT JSON body and deserialize response.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PortalError> {
        let request = self.request(Method::PUT, path, true)?.json(body);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, PortalError> {
        let request = self.request(Method::POST, path, true)?.multipart(form);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// DELETE request and deserialize response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortalError> {
        let request = self.request(Method::DELETE, path, true)?;
        let response = self.send(request).await?;
        Self::read_json(response).await
    }
}

fn transport_error(err: reqwest::Error) -> PortalError {
    if err.is_timeout() {
        PortalError::Transport(format!("Request timed out: {}", err))
    } else {
        PortalError::Transport(format!("Failed to send request: {}", err))
    }
}

/// The backend reports errors as `{ "message": ... }` or `{ "msg": ... }`.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str().map(str::to_string))
}

/// Map a non-2xx response to an error.
pub fn error_for_status(status: StatusCode, body: &str) -> PortalError {
    let message = backend_message(body).unwrap_or_else(|| {
        let text = body.trim();
        if text.is_empty() || text.starts_with('<') {
            format!("HTTP error! status: {}", status.as_u16())
        } else {
            text.to_string()
        }
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortalError::Unauthorized(message),
        StatusCode::BAD_REQUEST => PortalError::BadRequest(message),
        StatusCode::NOT_FOUND => PortalError::NotFound(message),
        StatusCode::PAYLOAD_TOO_LARGE => PortalError::PayloadTooLarge(message),
        _ => PortalError::Backend {
            status: status.as_u16(),
            message,
        },
    }
}

// Re-export domain types for convenience.
pub use api::{MessageResponse, TicketAttachment};
pub use portal_core::models::{
    Category, LoginRequest, LoginResponse, Product, ProductDraft, SellerProfile, SignupRequest,
    SupportTicket,
};
