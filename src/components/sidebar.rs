//! Dashboard navigation sidebar with the signed-in customer and logout.
//!
//! Logout only clears the session; the page's route guard sees the change and
//! redirects to the login entry.

use leptos::prelude::*;
use portal::guard::Route;

use crate::state::auth::{use_auth, use_services};

const NAV_ITEMS: [(Route, &str); 2] = [(Route::Dashboard, "Dashboard"), (Route::Customers, "Customers")];

#[component]
pub fn Sidebar(active: Route) -> impl IntoView {
    let services = use_services();
    let auth = use_auth();

    let on_logout = move |_| {
        services.with_value(|s| s.auth.logout());
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar__brand">"Customer Portal"</div>
            <nav class="sidebar__nav">
                {NAV_ITEMS
                    .iter()
                    .map(|(route, label)| {
                        let is_active = *route == active;
                        view! {
                            <a class="sidebar__link" class:sidebar__link--active=is_active href=route.path()>
                                {*label}
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </nav>
            <div class="sidebar__profile">
                <span class="sidebar__user">{move || auth.get().display_name()}</span>
                <span class="sidebar__roles">{move || auth.get().display_roles()}</span>
            </div>
            <button class="btn sidebar__logout" on:click=on_logout>
                "Sign out"
            </button>
        </aside>
    }
}
