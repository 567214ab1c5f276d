//! Route-level page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page installs the route guard for its own route before rendering, so
//! redirects behave the same on first load and after session changes.

pub mod customers;
pub mod dashboard;
pub mod login;
pub mod signup;
