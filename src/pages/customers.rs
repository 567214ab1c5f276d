//! Customers page: list, create, update and delete.
//!
//! DESIGN
//! ======
//! Every mutation reloads the list from the backend and replaces the local
//! copy, so the cards always reflect server state. Deletes go through the
//! `DeleteConfirm` state machine so a double click issues one request.

#[cfg(test)]
#[path = "customers_test.rs"]
mod customers_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use portal::customer::Customer;
use portal::guard::Route;

use crate::components::confirm_dialog::ConfirmDeleteDialog;
use crate::components::customer_card::CustomerCard;
use crate::components::customer_drawer::CreateCustomerDrawer;
use crate::components::sidebar::Sidebar;
use crate::state::auth::{ServicesHandle, use_auth, use_services};
use crate::state::customers::{CustomersState, DeleteConfirm};
use crate::state::toasts::{ToastState, use_toasts};
use crate::util::auth::install_route_guard;

/// Heading text for the list.
#[must_use]
pub fn list_heading(state: &CustomersState) -> String {
    match state.items.len() {
        1 => "1 customer".to_owned(),
        n => format!("{n} customers"),
    }
}

fn load_customers(services: ServicesHandle, customers: RwSignal<CustomersState>, toasts: RwSignal<ToastState>) {
    customers.update(CustomersState::start_loading);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let api = services.get_value().api;
        match api.list_customers().await {
            Ok(items) => customers.update(|s| s.loaded(items)),
            Err(e) => {
                customers.update(|s| s.failed(e.message()));
                crate::state::toasts::notify(toasts, portal::notify::Notification::from_api_error(&e));
            }
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (services, toasts);
        customers.update(|s| s.loaded(Vec::new()));
    }
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let toasts = use_toasts();
    install_route_guard(services, auth, Route::Customers, use_navigate());

    let customers = RwSignal::new(CustomersState::default());
    let delete_confirm = RwSignal::new(DeleteConfirm::default());

    if auth.get_untracked().is_authenticated() {
        load_customers(services, customers, toasts);
    }

    let on_saved = Callback::new(move |items: Vec<Customer>| customers.update(|s| s.loaded(items)));
    let on_delete_request = Callback::new(move |id: i64| {
        let name = customers.with_untracked(|s| s.find(id).map(|c| c.name.clone()));
        if let Some(name) = name {
            delete_confirm.update(|d| d.open(id, &name));
        }
    });
    let on_delete_cancel = Callback::new(move |()| delete_confirm.update(DeleteConfirm::cancel));
    let on_delete_confirm = Callback::new(move |()| {
        let mut target = None;
        delete_confirm.update(|d| target = d.confirm());
        let Some((id, name)) = target else {
            return;
        };

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            use portal::notify::Notification;

            let api = services.get_value().api;
            match portal::actions::delete_customer_and_refresh(&api, id).await {
                Ok(items) => {
                    customers.update(|s| s.loaded(items));
                    crate::state::toasts::notify(toasts, Notification::customer_deleted(&name));
                }
                Err(e) => crate::state::toasts::notify(toasts, Notification::from_api_error(&e)),
            }
            delete_confirm.update(DeleteConfirm::finish);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (id, name);
            delete_confirm.update(DeleteConfirm::finish);
        }
    });

    let cards = move || {
        customers
            .get()
            .items
            .into_iter()
            .map(|customer| {
                let image_url = services.with_value(|s| s.api.profile_image_url(customer.id));
                view! {
                    <CustomerCard
                        customer=customer
                        profile_image_url=image_url
                        on_delete=on_delete_request
                        on_saved=on_saved
                    />
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <Show when=move || auth.get().is_authenticated() fallback=|| view! { <p>"Redirecting..."</p> }>
            <div class="dashboard-page">
                <Sidebar active=Route::Customers />
                <main class="dashboard-page__main">
                    <header class="dashboard-page__header">
                        <h1>{move || list_heading(&customers.get())}</h1>
                        <CreateCustomerDrawer on_saved=on_saved />
                    </header>
                    <Show when=move || customers.with(|s| s.error.is_some())>
                        <p class="dashboard-page__error">
                            {move || customers.with(|s| s.error.clone().unwrap_or_default())}
                        </p>
                    </Show>
                    <Show
                        when=move || !customers.with(|s| s.loading)
                        fallback=|| view! { <p class="dashboard-page__loading">"Loading customers..."</p> }
                    >
                        <Show
                            when=move || customers.with(|s| !s.items.is_empty())
                            fallback=|| view! { <p class="dashboard-page__empty">"No customers available"</p> }
                        >
                            <div class="customer-grid">{cards}</div>
                        </Show>
                    </Show>
                    <ConfirmDeleteDialog
                        confirm=delete_confirm
                        on_cancel=on_delete_cancel
                        on_confirm=on_delete_confirm
                    />
                </main>
            </div>
        </Show>
    }
}
