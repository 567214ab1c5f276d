//! REST client for the customer backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request goes through [`ApiClient::execute`], which attaches the
//! stored bearer token and maps non-2xx responses to [`ApiError::Http`].
//! The wire itself is behind [`HttpTransport`] so the browser (`gloo-net`),
//! the CLI (`reqwest`) and tests (scripted mock) share one client.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned, never swallowed; callers turn them into
//! notifications and keep their forms editable.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::PortalConfig;
use crate::customer::{AuthenticationRequest, AuthenticationResponse, Customer, CustomerRegistrationRequest, CustomerUpdateRequest};
use crate::store::TokenStore;

const API_PREFIX: &str = "/api/v1";

/// HTTP verbs used by the customer API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully resolved request handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Token to send as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// JSON body, already serialized.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Value for the `Authorization` header, if a token is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|t| format!("Bearer {t}"))
    }
}

/// Raw response returned by the transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Authorization` response header; signup returns the new token here.
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error returned by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },
    /// A body could not be encoded or decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Login or signup succeeded but no token came back.
    #[error("response carried no token")]
    MissingToken,
}

impl ApiError {
    /// HTTP status, when the server responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable code used as notification title.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "ERR_NETWORK",
            Self::Http { status, .. } if *status < 500 => "ERR_BAD_REQUEST",
            Self::Http { .. } | Self::Json(_) | Self::MissingToken => "ERR_BAD_RESPONSE",
        }
    }

    /// Human-readable detail used as notification description.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Sends one request and yields exactly one outcome.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Perform `request`. Non-2xx statuses are returned as `Ok`; only
    /// failures to get any response are `Err`.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Token and customer issued by a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub customer: Option<Customer>,
}

/// Customer API client.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    store: Rc<dyn TokenStore>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: &PortalConfig, transport: Rc<dyn HttpTransport>, store: Rc<dyn TokenStore>) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            transport,
            store,
        }
    }

    /// Token store whose value is attached to every request.
    #[must_use]
    pub fn store(&self) -> &Rc<dyn TokenStore> {
        &self.store
    }

    /// `POST /api/v1/auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, an
    /// undecodable body, or a response without a token.
    pub async fn login(&self, credentials: &AuthenticationRequest) -> Result<IssuedToken, ApiError> {
        let response = self.send_json(Method::Post, "/auth/login", Some(credentials)).await?;
        let body: AuthenticationResponse = if response.body.is_empty() {
            AuthenticationResponse {
                token: None,
                customer: None,
            }
        } else {
            serde_json::from_slice(&response.body)?
        };
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .or_else(|| header_token(&response))
            .ok_or(ApiError::MissingToken)?;
        Ok(IssuedToken {
            token,
            customer: body.customer,
        })
    }

    /// `GET /api/v1/customers`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_json("/customers").await
    }

    /// `GET /api/v1/customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn get_customer(&self, id: i64) -> Result<Customer, ApiError> {
        self.get_json(&customer_path(id)).await
    }

    /// `POST /api/v1/customers`, returning the token issued for the new customer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or when the
    /// response has no `Authorization` header.
    pub async fn register_customer(&self, registration: &CustomerRegistrationRequest) -> Result<String, ApiError> {
        let response = self.send_json(Method::Post, "/customers", Some(registration)).await?;
        header_token(&response).ok_or(ApiError::MissingToken)
    }

    /// `PUT /api/v1/customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    pub async fn update_customer(&self, id: i64, update: &CustomerUpdateRequest) -> Result<(), ApiError> {
        self.send_json(Method::Put, &customer_path(id), Some(update)).await?;
        Ok(())
    }

    /// `DELETE /api/v1/customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    pub async fn delete_customer(&self, id: i64) -> Result<(), ApiError> {
        self.send_json::<()>(Method::Delete, &customer_path(id), None).await?;
        Ok(())
    }

    /// `GET /api/v1/customers/{id}/profile-image`, returning the raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    pub async fn fetch_profile_image(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        let response = self.send_json::<()>(Method::Get, &profile_image_path(id), None).await?;
        Ok(response.body)
    }

    /// Absolute URL of a customer's profile image, for `<img src>`.
    #[must_use]
    pub fn profile_image_url(&self, id: i64) -> String {
        self.url(&profile_image_path(id))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_json::<()>(Method::Get, path, None).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, ApiError> {
        let body = body.map(serde_json::to_string).transpose()?;
        let request = ApiRequest {
            method,
            url: self.url(path),
            bearer: self.store.read(),
            body,
        };
        self.execute(request).await
    }

    /// Send `request` and map non-2xx statuses to [`ApiError::Http`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        log::debug!("api request: {} {url}", method.as_str());
        let response = self.transport.send(request).await.inspect_err(|e| {
            log::warn!("api request failed: {} {url}: {e}", method.as_str());
        })?;
        if !response.is_success() {
            let err = ApiError::Http {
                status: response.status,
                message: error_message(&response),
            };
            log::warn!("api request rejected: {} {url}: {err}", method.as_str());
            return Err(err);
        }
        Ok(response)
    }
}

fn customer_path(id: i64) -> String {
    format!("/customers/{id}")
}

fn profile_image_path(id: i64) -> String {
    format!("/customers/{id}/profile-image")
}

fn header_token(response: &ApiResponse) -> Option<String> {
    let raw = response.authorization.as_deref()?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then(|| token.to_owned())
}

/// Prefer the backend's `message` field, then a plain-text body, then the status.
fn error_message(response: &ApiResponse) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.body) {
        if let Some(message) = value.get("message").and_then(serde_json::Value::as_str) {
            if !message.is_empty() {
                return message.to_owned();
            }
        }
    }
    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();
    if !text.is_empty() && !text.starts_with('{') {
        return text.to_owned();
    }
    format!("HTTP {}", response.status)
}
