//! Customer form shared by signup, create and update.
//!
//! DESIGN
//! ======
//! Validation and request building are pure (`prepare_submission`) so the
//! component only wires signals to inputs and runs the resulting request.
//! The submit button is disabled while the form is invalid or a request is
//! in flight.

#[cfg(test)]
#[path = "customer_editor_test.rs"]
mod customer_editor_test;

use std::collections::BTreeSet;

use leptos::prelude::*;
use portal::customer::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest, Gender};
use portal::validation::{self, CustomerForm, Field, FieldErrors};

use crate::components::form_field::{FormField, mark_touched, touch_all};
#[cfg(feature = "csr")]
use crate::state::auth::use_services;
#[cfg(feature = "csr")]
use crate::state::toasts::{notify, use_toasts};

/// What the form is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    /// Public signup; signs the new customer in.
    Signup,
    /// Dashboard create; keeps the current session.
    Create,
    /// Dashboard edit of an existing customer.
    Update(i64),
}

impl FormMode {
    #[must_use]
    pub fn shows_password(self) -> bool {
        !matches!(self, Self::Update(_))
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Signup => "Sign up",
            Self::Create | Self::Update(_) => "Submit",
        }
    }
}

/// Validated request ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Register(CustomerRegistrationRequest),
    Update(i64, CustomerUpdateRequest),
}

/// Result handed to the parent after a successful submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    SignedUp,
    Saved(Vec<Customer>),
}

/// Prefill the form from an existing customer. The password stays empty.
#[must_use]
pub fn form_from_customer(customer: &Customer) -> CustomerForm {
    CustomerForm {
        name: customer.name.clone(),
        email: customer.email.clone(),
        age: customer.age.to_string(),
        gender: customer.gender.as_str().to_owned(),
        password: String::new(),
    }
}

/// Validate `form` for `mode` and build the request to send.
///
/// # Errors
///
/// Returns the per-field errors when the form is invalid.
pub fn prepare_submission(mode: FormMode, form: &CustomerForm) -> Result<Submission, FieldErrors> {
    match mode {
        FormMode::Signup | FormMode::Create => validation::validate_registration(form).map(Submission::Register),
        FormMode::Update(id) => validation::validate_update(form).map(|update| Submission::Update(id, update)),
    }
}

#[cfg(feature = "csr")]
async fn run_submission(
    services: &crate::state::auth::Services,
    submission: Submission,
    mode: FormMode,
    name: &str,
) -> Result<(FormOutcome, portal::notify::Notification), portal::notify::Notification> {
    use portal::actions;
    use portal::notify::Notification;

    match (mode, submission) {
        (FormMode::Signup, Submission::Register(registration)) => {
            actions::sign_up(&services.api, &services.auth, &registration)
                .await
                .map(|_| (FormOutcome::SignedUp, Notification::customer_saved(name)))
                .map_err(|e| Notification::from_auth_error(&e))
        }
        (_, Submission::Register(registration)) => actions::create_customer_and_refresh(&services.api, &registration)
            .await
            .map(|items| (FormOutcome::Saved(items), Notification::customer_saved(name)))
            .map_err(|e| Notification::from_api_error(&e)),
        (_, Submission::Update(id, update)) => actions::update_customer_and_refresh(&services.api, id, &update)
            .await
            .map(|items| (FormOutcome::Saved(items), Notification::customer_updated(name)))
            .map_err(|e| Notification::from_api_error(&e)),
    }
}

#[component]
pub fn CustomerEditor(
    mode: FormMode,
    #[prop(optional)] initial: Option<Customer>,
    on_success: Callback<FormOutcome>,
) -> impl IntoView {
    let form = RwSignal::new(initial.as_ref().map(form_from_customer).unwrap_or_default());
    let touched = RwSignal::new(BTreeSet::<Field>::new());
    let busy = RwSignal::new(false);
    let errors = Memo::new(move |_| form.with(|f| prepare_submission(mode, f).err().unwrap_or_default()));

    #[cfg(feature = "csr")]
    let services = use_services();
    #[cfg(feature = "csr")]
    let toasts = use_toasts();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let values = form.get_untracked();
        let submission = match prepare_submission(mode, &values) {
            Ok(submission) => submission,
            Err(field_errors) => {
                touch_all(touched, &field_errors);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let services = services.get_value();
            match run_submission(&services, submission, mode, &values.name).await {
                Ok((outcome, notification)) => {
                    notify(toasts, notification);
                    if matches!(mode, FormMode::Create) {
                        form.set(CustomerForm::default());
                        touched.set(BTreeSet::new());
                    }
                    busy.set(false);
                    on_success.run(outcome);
                }
                Err(notification) => {
                    notify(toasts, notification);
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (submission, values, on_success);
            busy.set(false);
        }
    };

    let blur = move |field: Field| move |_: leptos::ev::FocusEvent| mark_touched(touched, field);

    view! {
        <form class="customer-form" on:submit=on_submit>
            <FormField label="Name" field=Field::Name errors=errors touched=touched>
                <input
                    class="form-input"
                    type="text"
                    placeholder="Jane"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    on:blur=blur(Field::Name)
                />
            </FormField>
            <FormField label="Email Address" field=Field::Email errors=errors touched=touched>
                <input
                    class="form-input"
                    type="email"
                    placeholder="jane@example.com"
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    on:blur=blur(Field::Email)
                />
            </FormField>
            <FormField label="Age" field=Field::Age errors=errors touched=touched>
                <input
                    class="form-input"
                    type="number"
                    placeholder="20"
                    prop:value=move || form.with(|f| f.age.clone())
                    on:input=move |ev| form.update(|f| f.age = event_target_value(&ev))
                    on:blur=blur(Field::Age)
                />
            </FormField>
            <Show when=move || mode.shows_password()>
                <FormField label="Password" field=Field::Password errors=errors touched=touched>
                    <input
                        class="form-input"
                        type="password"
                        placeholder="Pick a secure password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        on:blur=blur(Field::Password)
                    />
                </FormField>
            </Show>
            <FormField label="Gender" field=Field::Gender errors=errors touched=touched>
                <select
                    class="form-input"
                    prop:value=move || form.with(|f| f.gender.clone())
                    on:change=move |ev| form.update(|f| f.gender = event_target_value(&ev))
                    on:blur=blur(Field::Gender)
                >
                    <option value="">"Select a gender"</option>
                    {Gender::ALL
                        .into_iter()
                        .map(|g| view! { <option value=g.as_str()>{gender_label(g)}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </FormField>
            <button
                class="btn btn--primary"
                type="submit"
                disabled=move || busy.get() || !errors.with(FieldErrors::is_empty)
            >
                {move || if busy.get() { "Saving..." } else { mode.submit_label() }}
            </button>
        </form>
    }
}

/// Human label for a gender option.
#[must_use]
pub fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
    }
}
