//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `portal` auth context owns the session; this module mirrors it into a
//! reactive signal so route guards and user-aware components re-render on
//! every transition, and exposes the non-`Send` services through a
//! thread-local stored value.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use portal::api::ApiClient;
use portal::auth::{AuthContext, Session};

/// Reactive mirror of the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Session,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Signed-in subject, or a dash placeholder.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.session.subject().unwrap_or("-").to_owned()
    }

    /// Comma-separated roles, without the `ROLE_` prefix.
    #[must_use]
    pub fn display_roles(&self) -> String {
        self.session
            .claims()
            .map(|c| {
                c.roles
                    .iter()
                    .map(|r| r.strip_prefix("ROLE_").unwrap_or(r))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}

/// Auth context and API client shared by every page.
#[derive(Clone)]
pub struct Services {
    pub auth: Rc<AuthContext>,
    pub api: ApiClient,
}

/// Context handle for [`Services`]; copyable and usable from view closures.
pub type ServicesHandle = StoredValue<Services, LocalStorage>;

/// Store `services` for this thread, mirror its session into a signal, and
/// provide both as context.
pub fn provide_services(services: Services) -> (ServicesHandle, RwSignal<AuthState>) {
    let auth = RwSignal::new(AuthState {
        session: services.auth.session(),
    });
    services.auth.subscribe(move |session| {
        auth.set(AuthState {
            session: session.clone(),
        });
    });
    let handle = StoredValue::new_local(services);
    provide_context(handle);
    provide_context(auth);
    (handle, auth)
}

/// Fetch the services provided by the root component.
pub fn use_services() -> ServicesHandle {
    expect_context::<ServicesHandle>()
}

/// Fetch the reactive session mirror provided by the root component.
pub fn use_auth() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}
