//! Multi-step flows triggered by the customer views.
//!
//! Each flow issues its requests strictly in sequence and stops at the first
//! failure, so a rejected mutation never triggers a list refresh.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use crate::api::{ApiClient, ApiError};
use crate::auth::{AuthContext, AuthError, Session};
use crate::claims::Claims;
use crate::customer::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};

/// Delete a customer, then reload the list.
///
/// # Errors
///
/// Returns the first [`ApiError`]; the list is not reloaded when the delete fails.
pub async fn delete_customer_and_refresh(api: &ApiClient, id: i64) -> Result<Vec<Customer>, ApiError> {
    api.delete_customer(id).await?;
    api.list_customers().await
}

/// Update a customer, then reload the list.
///
/// # Errors
///
/// Returns the first [`ApiError`]; the list is not reloaded when the update fails.
pub async fn update_customer_and_refresh(
    api: &ApiClient,
    id: i64,
    update: &CustomerUpdateRequest,
) -> Result<Vec<Customer>, ApiError> {
    api.update_customer(id, update).await?;
    api.list_customers().await
}

/// Create a customer from the dashboard, then reload the list.
///
/// The token issued for the new customer is discarded; the current session
/// is kept.
///
/// # Errors
///
/// Returns the first [`ApiError`]; the list is not reloaded when creation fails.
pub async fn create_customer_and_refresh(
    api: &ApiClient,
    registration: &CustomerRegistrationRequest,
) -> Result<Vec<Customer>, ApiError> {
    api.register_customer(registration).await?;
    api.list_customers().await
}

/// Register a new customer and sign in with the token the backend issues.
///
/// # Errors
///
/// Returns [`AuthError::Api`] when registration fails, [`AuthError::Store`]
/// when the issued token cannot be persisted, or [`AuthError::NotSignedIn`]
/// when the issued token does not yield a session.
pub async fn sign_up(
    api: &ApiClient,
    auth: &AuthContext,
    registration: &CustomerRegistrationRequest,
) -> Result<Claims, AuthError> {
    let token = api.register_customer(registration).await?;
    auth.store().save(&token)?;
    match auth.set_customer_from_token() {
        Session::Authenticated(claims) => Ok(claims),
        Session::Unauthenticated => Err(AuthError::NotSignedIn),
    }
}
