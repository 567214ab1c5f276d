//! Session lifecycle and REST glue shared by the browser client and the CLI.
//!
//! This crate owns everything that is not rendering: where the bearer token
//! lives, how its claims are read, the authenticated/unauthenticated state
//! machine, route gating, and the customer API client. It has no browser or
//! runtime dependency; callers plug in a [`store::TokenStore`] and an
//! [`api::HttpTransport`] for their environment.

pub mod actions;
pub mod api;
pub mod auth;
pub mod claims;
pub mod config;
pub mod customer;
pub mod guard;
pub mod notify;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
