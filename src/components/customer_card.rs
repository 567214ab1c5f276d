//! Card for a single customer on the customers page.

#[cfg(test)]
#[path = "customer_card_test.rs"]
mod customer_card_test;

use leptos::prelude::*;
use portal::customer::{Customer, Gender};

use crate::components::customer_drawer::UpdateCustomerDrawer;

/// Stock portraits used until a customer uploads a profile image.
const PORTRAIT_BASE: &str = "https://randomuser.me/api/portraits";

/// `Age 36 | FEMALE`
#[must_use]
pub fn age_gender_line(customer: &Customer) -> String {
    format!("Age {} | {}", customer.age, customer.gender)
}

/// Uploaded profile image when there is one, otherwise a stock portrait.
#[must_use]
pub fn avatar_url(customer: &Customer, profile_image_url: &str) -> String {
    if customer.profile_image_id.is_some() {
        return profile_image_url.to_owned();
    }
    let folder = match customer.gender {
        Gender::Male => "men",
        Gender::Female => "women",
    };
    format!("{PORTRAIT_BASE}/{folder}/{}.jpg", customer.id.rem_euclid(100))
}

#[component]
pub fn CustomerCard(
    customer: Customer,
    profile_image_url: String,
    on_delete: Callback<i64>,
    on_saved: Callback<Vec<Customer>>,
) -> impl IntoView {
    let id = customer.id;
    let avatar = avatar_url(&customer, &profile_image_url);
    let summary = age_gender_line(&customer);
    let alt = format!("{} profile image", customer.name);
    let roles = customer.roles.join(", ");

    view! {
        <div class="customer-card">
            <img class="customer-card__avatar" src=avatar alt=alt />
            <span class="customer-card__id">{id}</span>
            <h3 class="customer-card__name">{customer.name.clone()}</h3>
            <span class="customer-card__email">{customer.email.clone()}</span>
            <span class="customer-card__meta">{summary}</span>
            <span class="customer-card__roles">{roles}</span>
            <div class="customer-card__actions">
                <UpdateCustomerDrawer customer=customer on_saved=on_saved />
                <button class="btn btn--danger" on:click=move |_| on_delete.run(id)>
                    "Delete"
                </button>
            </div>
        </div>
    }
}
