//! Login page.
//!
//! A successful login updates the session; the guest guard installed here
//! then moves the user to the customers page.

use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use portal::guard::Route;
use portal::validation::{self, Field, FieldErrors};

use crate::components::form_field::{FormField, mark_touched, touch_all};
use crate::state::auth::{use_auth, use_services};
#[cfg(feature = "csr")]
use crate::state::toasts::{notify, use_toasts};
use crate::util::auth::install_route_guard;

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    install_route_guard(services, auth, Route::Login, use_navigate());

    #[cfg(feature = "csr")]
    let toasts = use_toasts();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let touched = RwSignal::new(BTreeSet::<Field>::new());
    let busy = RwSignal::new(false);
    let errors = Memo::new(move |_| {
        validation::validate_login(&username.get(), &password.get())
            .err()
            .unwrap_or_default()
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validation::validate_login(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(field_errors) => {
                touch_all(touched, &field_errors);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let services = services.get_value();
            match services.auth.login(&services.api, &credentials).await {
                Ok(claims) => log::info!("signed in as {}", claims.subject),
                Err(e) => {
                    notify(toasts, portal::notify::Notification::from_auth_error(&e));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1 class="login-card__title">"Sign in to your account"</h1>
                <form class="login-card__form" on:submit=on_submit>
                    <FormField label="Email" field=Field::Username errors=errors touched=touched>
                        <input
                            class="form-input"
                            type="email"
                            placeholder="hello@example.com"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            on:blur=move |_| mark_touched(touched, Field::Username)
                        />
                    </FormField>
                    <FormField label="Password" field=Field::Password errors=errors touched=touched>
                        <input
                            class="form-input"
                            type="password"
                            placeholder="Type your password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            on:blur=move |_| mark_touched(touched, Field::Password)
                        />
                    </FormField>
                    <button
                        class="btn btn--primary login-card__submit"
                        type="submit"
                        disabled=move || busy.get() || !errors.with(FieldErrors::is_empty)
                    >
                        {move || if busy.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                <a class="login-card__link" href=Route::Signup.path()>
                    "Don't have an account? Signup now."
                </a>
            </div>
        </div>
    }
}
