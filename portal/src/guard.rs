//! Route table and navigation gating.
//!
//! The guard is a pure function of the current [`Session`] and the requested
//! [`Route`]; routers consult it on every navigation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::auth::Session;

/// Client routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Login,
    /// `/signup`
    Signup,
    /// `/dashboard`
    Dashboard,
    /// `/dashboard/customers`
    Customers,
}

impl Route {
    pub const ALL: [Self; 4] = [Self::Login, Self::Signup, Self::Dashboard, Self::Customers];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::Customers => "/dashboard/customers",
        }
    }

    /// Routes that require an authenticated session.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard | Self::Customers)
    }

    /// Routes that only make sense while signed out.
    #[must_use]
    pub fn is_guest_only(self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }
}

/// Where a signed-out visitor is sent.
pub const LOGIN_ENTRY: Route = Route::Login;
/// Where a signed-in customer lands after login or signup.
pub const HOME: Route = Route::Customers;

/// Outcome of a navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Redirect unauthenticated navigation of protected routes to the login entry.
#[must_use]
pub fn guard(session: &Session, route: Route) -> Navigation {
    if route.is_protected() && !session.is_authenticated() {
        Navigation::Redirect(LOGIN_ENTRY)
    } else {
        Navigation::Render(route)
    }
}

/// Send an already signed-in customer away from login and signup.
#[must_use]
pub fn guest_guard(session: &Session, route: Route) -> Navigation {
    if route.is_guest_only() && session.is_authenticated() {
        Navigation::Redirect(HOME)
    } else {
        Navigation::Render(route)
    }
}

/// Apply both guards.
#[must_use]
pub fn resolve(session: &Session, route: Route) -> Navigation {
    match guard(session, route) {
        Navigation::Render(route) => guest_guard(session, route),
        redirect @ Navigation::Redirect(_) => redirect,
    }
}
