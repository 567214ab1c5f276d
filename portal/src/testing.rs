//! Test doubles shared by the unit tests in this crate.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::api::{ApiClient, ApiError, ApiRequest, ApiResponse, HttpTransport, Method};
use crate::auth::Clock;
use crate::config::PortalConfig;
use crate::store::{MemoryTokenStore, StoreError, TokenStore};

pub(crate) const NOW: i64 = 1_700_000_000;
pub(crate) const BASE_URL: &str = "http://api.test";

/// Unsigned JWT-shaped token carrying `sub` and `exp`.
pub(crate) fn make_token(sub: &str, exp: i64) -> String {
    make_token_from(&serde_json::json!({ "sub": sub, "scopes": ["ROLE_USER"], "iat": NOW - 60, "exp": exp }))
}

pub(crate) fn make_token_from(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

pub(crate) fn fixed_clock(now: i64) -> Clock {
    Rc::new(move || now)
}

/// Transport that records requests and replays scripted responses in order.
#[derive(Default)]
pub(crate) struct MockTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push(Ok(ApiResponse {
            status,
            authorization: None,
            body: body.to_string().into_bytes(),
        }));
    }

    pub(crate) fn push_empty(&self, status: u16) {
        self.push(Ok(ApiResponse {
            status,
            ..ApiResponse::default()
        }));
    }

    pub(crate) fn push(&self, response: Result<ApiResponse, ApiError>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// `(method, url)` pairs in send order.
    pub(crate) fn calls(&self) -> Vec<(Method, String)> {
        self.requests.borrow().iter().map(|r| (r.method, r.url.clone())).collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_owned())))
    }
}

/// Client wired to a fresh mock transport and memory store.
pub(crate) fn mock_client() -> (ApiClient, Rc<MockTransport>, Rc<MemoryTokenStore>) {
    let transport = MockTransport::new();
    let store = Rc::new(MemoryTokenStore::new());
    let api = ApiClient::new(&PortalConfig::new(BASE_URL), transport.clone(), store.clone());
    (api, transport, store)
}

/// Store whose writes always fail; reads report nothing stored.
#[derive(Default)]
pub(crate) struct FailingTokenStore {
    pub(crate) clears: std::cell::Cell<u32>,
}

impl TokenStore for FailingTokenStore {
    fn save(&self, _token: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn read(&self) -> Option<String> {
        None
    }

    fn clear(&self) {
        self.clears.set(self.clears.get() + 1);
    }
}

/// Client wired to a fresh mock transport and a store that rejects writes.
pub(crate) fn failing_client() -> (ApiClient, Rc<MockTransport>, Rc<FailingTokenStore>) {
    let transport = MockTransport::new();
    let store = Rc::new(FailingTokenStore::default());
    let api = ApiClient::new(&PortalConfig::new(BASE_URL), transport.clone(), store.clone());
    (api, transport, store)
}
