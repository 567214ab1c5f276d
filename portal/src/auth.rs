//! Auth-session state machine for the current client.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`AuthContext`] exists per client. Pages read the current [`Session`],
//! the route guard gates on it, and the UI subscribes to re-render on every
//! transition. The context is the only writer of the token store besides the
//! signup flow, which writes a token and then asks the context to re-read it.
//!
//! DESIGN
//! ======
//! Two states: `Unauthenticated` and `Authenticated(claims)`. The
//! authenticated state is only entered from a token whose expiry is strictly
//! after the clock at decode time; any token that fails that check is cleared.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::{ApiClient, ApiError};
use crate::claims::{self, Claims, DecodeError};
use crate::customer::AuthenticationRequest;
use crate::store::{StoreError, TokenStore};

/// Source of the current time in Unix seconds.
pub type Clock = Rc<dyn Fn() -> i64>;

/// Authentication state of the current client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(Claims),
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Self::Authenticated(claims) => Some(claims),
            Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.claims().map(|c| c.subject.as_str())
    }
}

/// Error returned by [`AuthContext::login`] and the signup flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("issued token could not be decoded: {0}")]
    InvalidToken(#[from] DecodeError),
    #[error("issued token is already expired")]
    Expired,
    #[error("stored token did not produce a session")]
    NotSignedIn,
    #[error("issued token could not be stored: {0}")]
    Store(#[from] StoreError),
}

/// Handle returned by [`AuthContext::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&Session)>;

/// Session state plus its controlled mutators.
pub struct AuthContext {
    store: Rc<dyn TokenStore>,
    clock: Clock,
    session: RefCell<Session>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl AuthContext {
    /// Build the context and run the initial transition from the stored token.
    #[must_use]
    pub fn new(store: Rc<dyn TokenStore>, clock: Clock) -> Self {
        let ctx = Self {
            store,
            clock,
            session: RefCell::new(Session::Unauthenticated),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        };
        let initial = ctx.resolve_stored();
        *ctx.session.borrow_mut() = initial;
        ctx
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Claims of the signed-in customer, if any.
    #[must_use]
    pub fn customer(&self) -> Option<Claims> {
        self.session.borrow().claims().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Token store this context reads from and writes to.
    #[must_use]
    pub fn store(&self) -> &Rc<dyn TokenStore> {
        &self.store
    }

    /// Call `listener` with the new session after every transition.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a subscription. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Exchange credentials for a token and enter the authenticated state.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Api`] when the backend rejects the login or
    /// [`AuthError::Store`] when the issued token cannot be persisted (session
    /// unchanged in both cases), or [`AuthError::InvalidToken`]/[`AuthError::Expired`]
    /// when the issued token is unusable (token cleared, session unauthenticated).
    pub async fn login(&self, api: &ApiClient, credentials: &AuthenticationRequest) -> Result<Claims, AuthError> {
        let issued = api.login(credentials).await?;
        if let Err(err) = self.store.save(&issued.token) {
            log::warn!("could not persist token issued at login: {err}");
            return Err(err.into());
        }
        match self.validate(&issued.token) {
            Ok(claims) => {
                log::info!("signed in as {}", claims.subject);
                self.transition(Session::Authenticated(claims.clone()));
                Ok(claims)
            }
            Err(err) => {
                log::warn!("discarding token issued at login: {err}");
                self.store.clear();
                self.transition(Session::Unauthenticated);
                Err(err)
            }
        }
    }

    /// Clear the token and drop to unauthenticated, whatever the prior state.
    pub fn logout(&self) {
        self.store.clear();
        self.transition(Session::Unauthenticated);
    }

    /// Re-read and re-decode the stored token, as on startup.
    pub fn set_customer_from_token(&self) -> Session {
        let next = self.resolve_stored();
        self.transition(next.clone());
        next
    }

    /// Re-validate the current session against the clock, logging out when expired.
    pub fn check(&self) -> Session {
        let expired = self
            .session
            .borrow()
            .claims()
            .is_some_and(|c| claims::is_expired(c, (self.clock)()));
        if expired {
            log::info!("session expired");
            self.logout();
        }
        self.session()
    }

    fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = claims::decode(token)?;
        if claims::is_expired(&claims, (self.clock)()) {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }

    fn resolve_stored(&self) -> Session {
        let Some(token) = self.store.read() else {
            return Session::Unauthenticated;
        };
        match self.validate(&token) {
            Ok(claims) => Session::Authenticated(claims),
            Err(err) => {
                log::debug!("clearing stored token: {err}");
                self.store.clear();
                Session::Unauthenticated
            }
        }
    }

    fn transition(&self, next: Session) {
        *self.session.borrow_mut() = next.clone();
        let listeners: Vec<Listener> = self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(&next);
        }
    }
}
