//! Delete confirmation dialog.

#[cfg(test)]
#[path = "confirm_dialog_test.rs"]
mod confirm_dialog_test;

use leptos::prelude::*;

use crate::state::customers::DeleteConfirm;

#[must_use]
pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete {name}? You can't undo this action afterwards.")
}

#[component]
pub fn ConfirmDeleteDialog(
    confirm: RwSignal<DeleteConfirm>,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    let pending = move || confirm.with(DeleteConfirm::is_pending);

    view! {
        <Show when=move || confirm.with(DeleteConfirm::is_visible)>
            <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
                <div
                    class="dialog"
                    role="alertdialog"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=move |ev| {
                        if ev.key() == "Escape" {
                            on_cancel.run(());
                        }
                    }
                >
                    <h2 class="dialog__title">"Delete Customer"</h2>
                    <p class="dialog__body">
                        {move || confirm.with(|c| delete_prompt(c.name().unwrap_or_default()))}
                    </p>
                    <div class="dialog__actions">
                        <button class="btn" disabled=pending on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button class="btn btn--danger" disabled=pending on:click=move |_| on_confirm.run(())>
                            {move || if pending() { "Deleting..." } else { "Delete" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
