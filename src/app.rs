//! Root application component and route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the session services once, provides shared state through
//! Leptos context, and maps URL paths to page components.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Route, Router, Routes};
use portal::api::ApiClient;
use portal::auth::AuthContext;
use portal::config::PortalConfig;
use portal::store::TokenStore;

use crate::components::toast_stack::ToastStack;
use crate::net::transport::GlooTransport;
use crate::pages::customers::CustomersPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::signup::SignupPage;
use crate::state::auth::{Services, provide_services};
use crate::state::toasts::ToastState;
use crate::util::clock::browser_clock;
use crate::util::storage::BrowserTokenStore;

/// Client configuration, baked in at build time.
pub fn client_config() -> PortalConfig {
    PortalConfig::from_values(option_env!("CUSTOMER_API_BASE_URL"), option_env!("CUSTOMER_TOKEN_KEY"))
}

/// Root component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = client_config();
    log::info!("customer portal using api at {}", config.api_base_url);
    let store: Rc<dyn TokenStore> = Rc::new(BrowserTokenStore::new(&config.token_key));
    let auth = Rc::new(AuthContext::new(Rc::clone(&store), browser_clock()));
    let api = ApiClient::new(&config, Rc::new(GlooTransport), store);
    provide_services(Services { auth, api });
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Title text="Customer Portal" />
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage />
                <Route path=StaticSegment("signup") view=SignupPage />
                <Route path=StaticSegment("dashboard") view=DashboardPage />
                <Route path=(StaticSegment("dashboard"), StaticSegment("customers")) view=CustomersPage />
            </Routes>
            <ToastStack />
        </Router>
    }
}
