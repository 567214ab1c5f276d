//! Labelled form row with an inline validation message.
//!
//! Errors only show once the field has been visited, so a pristine form is
//! not covered in red.

use std::collections::BTreeSet;

use leptos::prelude::*;
use portal::validation::{Field, FieldErrors};

/// Fields the user has left at least once.
pub type Touched = RwSignal<BTreeSet<Field>>;

/// Record that `field` was visited.
pub fn mark_touched(touched: Touched, field: Field) {
    touched.update(|t| {
        t.insert(field);
    });
}

/// Record every field as visited, e.g. on a rejected submit.
pub fn touch_all(touched: Touched, errors: &FieldErrors) {
    touched.update(|t| t.extend(errors.iter().map(|(f, _)| f)));
}

#[component]
pub fn FormField(
    label: &'static str,
    field: Field,
    errors: Memo<FieldErrors>,
    touched: Touched,
    children: Children,
) -> impl IntoView {
    let message = move || {
        if touched.get().contains(&field) {
            errors.get().get(field)
        } else {
            None
        }
    };

    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            {children()}
            <Show when=move || message().is_some()>
                <span class="form-field__error" role="alert">
                    {move || message().unwrap_or_default()}
                </span>
            </Show>
        </label>
    }
}
