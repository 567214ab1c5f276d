//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior, so every page
//! routes its guard decision through `portal::guard::resolve`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use portal::guard::{self, Navigation, Route};

use crate::state::auth::{AuthState, ServicesHandle};

/// Path to navigate to when `state` may not render `route`.
pub fn redirect_target(state: &AuthState, route: Route) -> Option<&'static str> {
    match guard::resolve(&state.session, route) {
        Navigation::Render(_) => None,
        Navigation::Redirect(target) => Some(target.path()),
    }
}

/// Re-check the session on mount, then redirect whenever the guard says so.
pub fn install_route_guard<F>(services: ServicesHandle, auth: RwSignal<AuthState>, route: Route, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    services.with_value(|s| {
        s.auth.check();
    });
    Effect::new(move || {
        let state = auth.get();
        if let Some(target) = redirect_target(&state, route) {
            navigate(target, NavigateOptions::default());
        }
    });
}
