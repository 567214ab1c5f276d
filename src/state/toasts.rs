//! Transient notification queue.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use leptos::prelude::*;
use portal::notify::Notification;

/// How long a toast stays on screen.
pub const TOAST_TTL_MS: u32 = 5_000;
/// Oldest toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue `notification`, returning its id.
    pub fn push(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, notification });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }
}

/// Show `notification` and schedule its dismissal.
pub fn notify(toasts: RwSignal<ToastState>, notification: Notification) {
    if notification.is_error() {
        log::warn!("{}: {}", notification.title, notification.description);
    }
    let mut id = 0;
    toasts.update(|t| id = t.push(notification));
    #[cfg(feature = "csr")]
    {
        let timeout = gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
            toasts.update(|t| {
                t.dismiss(id);
            });
        });
        let _ = timeout.forget();
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}

/// Fetch the toast queue provided by the root component.
pub fn use_toasts() -> RwSignal<ToastState> {
    expect_context::<RwSignal<ToastState>>()
}
