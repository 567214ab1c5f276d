//! Networking for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! The REST client itself is `portal::api::ApiClient`; this module only
//! supplies the browser transport it sends through.

pub mod transport;
