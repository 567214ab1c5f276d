//! Browser bindings for the portal core.
//!
//! `storage` keeps the access token in `localStorage`. `clock` feeds expiry
//! checks from the browser's wall clock. `auth` re-runs the route guard
//! whenever the session changes.

pub mod auth;
pub mod clock;
pub mod storage;
