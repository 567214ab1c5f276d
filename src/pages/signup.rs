//! Signup page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use portal::guard::Route;

use crate::components::customer_editor::{CustomerEditor, FormMode, FormOutcome};
use crate::state::auth::{use_auth, use_services};
use crate::util::auth::install_route_guard;

#[component]
pub fn SignupPage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    install_route_guard(services, auth, Route::Signup, use_navigate());

    // The guest guard redirects once the new session lands.
    let on_success = Callback::new(|outcome: FormOutcome| {
        if outcome == FormOutcome::SignedUp {
            log::info!("signup complete");
        }
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1 class="login-card__title">"Register for an account"</h1>
                <CustomerEditor mode=FormMode::Signup on_success=on_success />
                <a class="login-card__link" href=Route::Login.path()>
                    "Have an account? Login now."
                </a>
            </div>
        </div>
    }
}
