use super::*;
use crate::api::ApiResponse;
use crate::store::{MemoryTokenStore, StoreError};
use crate::testing::{NOW, failing_client, fixed_clock, make_token, mock_client};

fn context_with(store: &Rc<MemoryTokenStore>) -> AuthContext {
    AuthContext::new(store.clone(), fixed_clock(NOW))
}

fn credentials() -> AuthenticationRequest {
    AuthenticationRequest {
        username: "a@b.com".to_owned(),
        password: "x".to_owned(),
    }
}

// =============================================================================
// Initial transition
// =============================================================================

#[test]
fn no_stored_token_starts_unauthenticated() {
    let store = Rc::new(MemoryTokenStore::new());
    let ctx = context_with(&store);
    assert_eq!(ctx.session(), Session::Unauthenticated);
}

#[test]
fn valid_stored_token_starts_authenticated() {
    let store = Rc::new(MemoryTokenStore::with_token(&make_token("a@b.com", NOW + 3600)));
    let ctx = context_with(&store);
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.session().subject(), Some("a@b.com"));
    assert!(store.read().is_some());
}

#[test]
fn expired_stored_token_is_cleared_at_startup() {
    let store = Rc::new(MemoryTokenStore::with_token(&make_token("a@b.com", NOW - 1)));
    let ctx = context_with(&store);
    assert_eq!(ctx.session(), Session::Unauthenticated);
    assert_eq!(store.read(), None);
}

#[test]
fn token_expiring_exactly_now_is_cleared() {
    let store = Rc::new(MemoryTokenStore::with_token(&make_token("a@b.com", NOW)));
    let ctx = context_with(&store);
    assert!(!ctx.is_authenticated());
    assert_eq!(store.read(), None);
}

#[test]
fn corrupt_stored_token_is_cleared_at_startup() {
    let store = Rc::new(MemoryTokenStore::with_token("garbage"));
    let ctx = context_with(&store);
    assert!(!ctx.is_authenticated());
    assert_eq!(store.read(), None);
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_round_trips_subject() {
    let (api, transport, store) = mock_client();
    let token = make_token("a@b.com", NOW + 3600);
    transport.push_json(200, &serde_json::json!({ "token": token }));
    let ctx = context_with(&store);

    let claims = ctx.login(&api, &credentials()).await.unwrap();

    assert_eq!(claims.subject, "a@b.com");
    assert_eq!(ctx.customer().map(|c| c.subject), Some("a@b.com".to_owned()));
    assert_eq!(store.read(), Some(token));
}

#[tokio::test]
async fn failed_login_leaves_session_unchanged() {
    let (api, transport, store) = mock_client();
    let existing = make_token("old@b.com", NOW + 3600);
    store.save(&existing).unwrap();
    transport.push_json(401, &serde_json::json!({ "message": "Bad credentials" }));
    let ctx = context_with(&store);

    let err = ctx.login(&api, &credentials()).await.unwrap_err();

    assert!(matches!(err, AuthError::Api(ApiError::Http { status: 401, .. })));
    assert_eq!(ctx.session().subject(), Some("old@b.com"));
    assert_eq!(store.read(), Some(existing));
}

#[tokio::test]
async fn login_with_expired_issued_token_is_rejected() {
    let (api, transport, store) = mock_client();
    transport.push_json(200, &serde_json::json!({ "token": make_token("a@b.com", NOW - 10) }));
    let ctx = context_with(&store);

    let err = ctx.login(&api, &credentials()).await.unwrap_err();

    assert!(matches!(err, AuthError::Expired));
    assert!(!ctx.is_authenticated());
    assert_eq!(store.read(), None);
}

#[tokio::test]
async fn login_with_undecodable_header_token_is_rejected() {
    let (api, transport, store) = mock_client();
    transport.push(Ok(ApiResponse {
        status: 200,
        authorization: Some("not-a-jwt".to_owned()),
        body: Vec::new(),
    }));
    let ctx = context_with(&store);

    let err = ctx.login(&api, &credentials()).await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken(_)));
    assert_eq!(store.read(), None);
}

#[tokio::test]
async fn login_with_unwritable_store_keeps_session_unchanged() {
    let (api, transport, store) = failing_client();
    transport.push_json(200, &serde_json::json!({ "token": make_token("a@b.com", NOW + 3600) }));
    let ctx = AuthContext::new(store.clone(), fixed_clock(NOW));
    let transitions = Rc::new(Cell::new(0));
    let counter = transitions.clone();
    ctx.subscribe(move |_| counter.set(counter.get() + 1));

    let err = ctx.login(&api, &credentials()).await.unwrap_err();

    assert!(matches!(err, AuthError::Store(StoreError::Unavailable)));
    assert!(!ctx.is_authenticated());
    assert_eq!(transitions.get(), 0);

    let next_run = AuthContext::new(store, fixed_clock(NOW));
    assert!(!next_run.is_authenticated());
}

// =============================================================================
// logout / set_customer_from_token / check
// =============================================================================

#[test]
fn logout_from_authenticated_clears_token() {
    let store = Rc::new(MemoryTokenStore::with_token(&make_token("a@b.com", NOW + 60)));
    let ctx = context_with(&store);
    ctx.logout();
    assert_eq!(ctx.session(), Session::Unauthenticated);
    assert_eq!(store.read(), None);
}

#[test]
fn logout_from_unauthenticated_is_idempotent() {
    let store = Rc::new(MemoryTokenStore::new());
    let ctx = context_with(&store);
    ctx.logout();
    ctx.logout();
    assert_eq!(ctx.session(), Session::Unauthenticated);
    assert_eq!(store.read(), None);
}

#[test]
fn set_customer_from_token_picks_up_external_write() {
    let store = Rc::new(MemoryTokenStore::new());
    let ctx = context_with(&store);
    store.save(&make_token("new@b.com", NOW + 60)).unwrap();

    let session = ctx.set_customer_from_token();

    assert_eq!(session.subject(), Some("new@b.com"));
    assert_eq!(ctx.session(), session);
}

#[test]
fn set_customer_from_token_clears_corrupt_write() {
    let store = Rc::new(MemoryTokenStore::with_token(&make_token("a@b.com", NOW + 60)));
    let ctx = context_with(&store);
    store.save("x.%%%.y").unwrap();

    assert_eq!(ctx.set_customer_from_token(), Session::Unauthenticated);
    assert_eq!(store.read(), None);
}

#[test]
fn check_logs_out_once_clock_passes_expiry() {
    let store = Rc::new(MemoryTokenStore::with_token(&make_token("a@b.com", NOW + 10)));
    let now = Rc::new(Cell::new(NOW));
    let clock_now = now.clone();
    let ctx = AuthContext::new(store.clone(), Rc::new(move || clock_now.get()));

    assert!(ctx.check().is_authenticated());
    now.set(NOW + 10);
    assert_eq!(ctx.check(), Session::Unauthenticated);
    assert_eq!(store.read(), None);
}

// =============================================================================
// Subscriptions
// =============================================================================

#[test]
fn subscribers_see_every_transition() {
    let store = Rc::new(MemoryTokenStore::new());
    let ctx = context_with(&store);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    ctx.subscribe(move |s| sink.borrow_mut().push(s.is_authenticated()));

    store.save(&make_token("a@b.com", NOW + 60)).unwrap();
    ctx.set_customer_from_token();
    ctx.logout();

    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let store = Rc::new(MemoryTokenStore::new());
    let ctx = context_with(&store);
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let id = ctx.subscribe(move |_| counter.set(counter.get() + 1));

    ctx.logout();
    assert!(ctx.unsubscribe(id));
    ctx.logout();

    assert_eq!(calls.get(), 1);
    assert!(!ctx.unsubscribe(id));
}
