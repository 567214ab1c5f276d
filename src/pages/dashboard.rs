//! Dashboard landing page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use portal::guard::Route;

use crate::components::sidebar::Sidebar;
use crate::state::auth::{use_auth, use_services};
use crate::util::auth::install_route_guard;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    install_route_guard(services, auth, Route::Dashboard, use_navigate());

    view! {
        <Show when=move || auth.get().is_authenticated() fallback=|| view! { <p>"Redirecting..."</p> }>
            <div class="dashboard-page">
                <Sidebar active=Route::Dashboard />
                <main class="dashboard-page__main">
                    <h1>{move || format!("Welcome, {}", auth.get().display_name())}</h1>
                    <p class="dashboard-page__roles">{move || auth.get().display_roles()}</p>
                    <a class="btn btn--primary" href=Route::Customers.path()>
                        "View customers"
                    </a>
                </main>
            </div>
        </Show>
    }
}
