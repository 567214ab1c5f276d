//! Bottom-corner toast list.

use leptos::prelude::*;
use portal::notify::NotificationKind;

use crate::state::toasts::use_toasts;

#[must_use]
pub fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "toast toast--success",
        NotificationKind::Error => "toast toast--error",
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-stack" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast_class(toast.notification.kind) role="status">
                                <strong class="toast__title">{toast.notification.title}</strong>
                                <span class="toast__description">{toast.notification.description}</span>
                                <button
                                    class="toast__close"
                                    on:click=move |_| {
                                        toasts.update(|t| {
                                            t.dismiss(id);
                                        });
                                    }
                                >
                                    "x"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
