//! Customer list and delete-confirmation state.
//!
//! DESIGN
//! ======
//! The delete dialog is a small state machine so a confirm click can hand out
//! the target id exactly once; a second click while the request is pending
//! yields nothing and therefore issues no second delete.

#[cfg(test)]
#[path = "customers_test.rs"]
mod customers_test;

use portal::customer::Customer;

/// Customers shown on the customers page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomersState {
    pub items: Vec<Customer>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CustomersState {
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, items: Vec<Customer>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    /// Keep the previous items visible and record the failure.
    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Customer> {
        self.items.iter().find(|c| c.id == id)
    }
}

/// Delete confirmation dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeleteConfirm {
    #[default]
    Closed,
    Open {
        id: i64,
        name: String,
    },
    Pending {
        id: i64,
        name: String,
    },
}

impl DeleteConfirm {
    pub fn open(&mut self, id: i64, name: &str) {
        if matches!(self, Self::Pending { .. }) {
            return;
        }
        *self = Self::Open {
            id,
            name: name.to_owned(),
        };
    }

    /// Move to pending and return the id to delete. `None` unless open.
    pub fn confirm(&mut self) -> Option<(i64, String)> {
        match std::mem::take(self) {
            Self::Open { id, name } => {
                *self = Self::Pending { id, name: name.clone() };
                Some((id, name))
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Cancel an open dialog. A pending delete cannot be cancelled.
    pub fn cancel(&mut self) {
        if matches!(self, Self::Open { .. }) {
            *self = Self::Closed;
        }
    }

    /// Close after the pending delete resolved, whatever the outcome.
    pub fn finish(&mut self) {
        *self = Self::Closed;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Open { name, .. } | Self::Pending { name, .. } => Some(name),
            Self::Closed => None,
        }
    }
}
