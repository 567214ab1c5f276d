//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render customer views and form chrome while reading/writing
//! shared state from Leptos context providers.

pub mod confirm_dialog;
pub mod customer_card;
pub mod customer_drawer;
pub mod customer_editor;
pub mod form_field;
pub mod sidebar;
pub mod toast_stack;
