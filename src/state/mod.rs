//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `customers`, `toasts`) so individual
//! components can depend on small focused models.

pub mod auth;
pub mod customers;
pub mod toasts;
