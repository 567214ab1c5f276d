//! Transient user notifications.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use crate::api::ApiError;
use crate::auth::AuthError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast-style message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Error toast titled with the error code and described by the server message.
    #[must_use]
    pub fn from_api_error(err: &ApiError) -> Self {
        Self::error(err.code(), err.message())
    }

    #[must_use]
    pub fn from_auth_error(err: &AuthError) -> Self {
        match err {
            AuthError::Api(api) => Self::from_api_error(api),
            AuthError::Store(store) => Self::error("ERR_TOKEN_STORAGE", store.to_string()),
            other => Self::error("ERR_INVALID_TOKEN", other.to_string()),
        }
    }

    #[must_use]
    pub fn customer_saved(name: &str) -> Self {
        Self::success("Customer saved", format!("{name} was successfully saved"))
    }

    #[must_use]
    pub fn customer_updated(name: &str) -> Self {
        Self::success("Customer updated", format!("{name} was successfully updated"))
    }

    #[must_use]
    pub fn customer_deleted(name: &str) -> Self {
        Self::success("Customer deleted", format!("{name} was successfully deleted"))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}
