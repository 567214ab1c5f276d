//! Slide-in drawers wrapping the customer editor.

use leptos::prelude::*;
use portal::customer::Customer;

use crate::components::customer_editor::{CustomerEditor, FormMode, FormOutcome};

#[component]
fn Drawer(title: &'static str, open: RwSignal<bool>, children: ChildrenFn) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="drawer-backdrop" on:click=move |_| open.set(false)>
                <aside
                    class="drawer"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=move |ev| {
                        if ev.key() == "Escape" {
                            open.set(false);
                        }
                    }
                >
                    <header class="drawer__header">
                        <h2>{title}</h2>
                        <button class="drawer__close" on:click=move |_| open.set(false)>
                            "x"
                        </button>
                    </header>
                    <div class="drawer__body">{children()}</div>
                    <footer class="drawer__footer">
                        <button class="btn" on:click=move |_| open.set(false)>
                            "Close"
                        </button>
                    </footer>
                </aside>
            </div>
        </Show>
    }
}

/// Close the drawer and forward a saved list; signup outcomes are ignored.
fn forward_saved(open: RwSignal<bool>, on_saved: Callback<Vec<Customer>>) -> Callback<FormOutcome> {
    Callback::new(move |outcome: FormOutcome| {
        if let FormOutcome::Saved(items) = outcome {
            open.set(false);
            on_saved.run(items);
        }
    })
}

#[component]
pub fn CreateCustomerDrawer(on_saved: Callback<Vec<Customer>>) -> impl IntoView {
    let open = RwSignal::new(false);
    let on_success = forward_saved(open, on_saved);

    view! {
        <button class="btn btn--primary" on:click=move |_| open.set(true)>
            "+ Create customer"
        </button>
        <Drawer title="Create new customer" open=open>
            <CustomerEditor mode=FormMode::Create on_success=on_success />
        </Drawer>
    }
}

#[component]
pub fn UpdateCustomerDrawer(customer: Customer, on_saved: Callback<Vec<Customer>>) -> impl IntoView {
    let open = RwSignal::new(false);
    let on_success = forward_saved(open, on_saved);
    let id = customer.id;
    let customer = StoredValue::new(customer);

    view! {
        <button class="btn" on:click=move |_| open.set(true)>
            "Update"
        </button>
        <Drawer title="Update customer" open=open>
            <CustomerEditor mode=FormMode::Update(id) initial=customer.get_value() on_success=on_success />
        </Drawer>
    }
}
