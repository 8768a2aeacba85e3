use super::*;
use crate::error::PersistError;
use crate::forms::{LoginForm, RegisterForm};
use crate::gateway::{AuthPayload, AuthRequest, perform};
use crate::persist::{MemoryStorage, STORAGE_KEY};
use crate::testing::MockGateway;
use futures::executor::block_on;
use serde_json::json;

fn payload(token: &str) -> AuthPayload {
    AuthPayload { token: token.to_owned(), profile: serde_json::from_value(json!({ "id": 1 })).unwrap() }
}

fn login_form() -> LoginForm {
    LoginForm { email: "ada@example.com".to_owned(), password: "password1".to_owned() }
}

/// Backend whose writes always fail, for write-through error paths.
#[derive(Clone, Debug, Default)]
struct ReadOnlyStorage;

impl StorageBackend for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Write("quota exceeded".to_owned()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), PersistError> {
        Err(PersistError::Unavailable)
    }
}

// =============================================================
// Rehydration
// =============================================================

#[test]
fn rehydrate_empty_storage_is_anonymous() {
    let store = SessionStore::rehydrate(MemoryStorage::default());
    assert_eq!(store.session(), &Session::Anonymous);
}

#[test]
fn rehydrate_garbage_storage_is_anonymous() {
    let storage = MemoryStorage::default();
    storage.set_item(STORAGE_KEY, "][").unwrap();
    assert!(!SessionStore::rehydrate(storage).is_authenticated());
}

#[test]
fn reload_restores_authenticated_session() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::rehydrate(storage.clone());
    store.dispatch(AuthEvent::LoggedIn(payload("t1")));

    let reloaded = SessionStore::rehydrate(storage);
    assert_eq!(reloaded.session(), store.session());
    assert_eq!(reloaded.slice(), store.slice());
}

#[test]
fn reload_preserves_reserved_slots_across_writes() {
    let storage = MemoryStorage::default();
    let seeded = json!({
        "Token": null,
        "UserData": null,
        "isAuthenticated": false,
        "Role": "admin",
        "TrialFlag": true,
        "_persist": { "version": crate::persist::PERSIST_VERSION, "rehydrated": true }
    });
    storage.set_item(STORAGE_KEY, &seeded.to_string()).unwrap();

    let mut store = SessionStore::rehydrate(storage.clone());
    store.dispatch(AuthEvent::LoggedIn(payload("t1")));

    let reloaded = SessionStore::rehydrate(storage);
    assert_eq!(reloaded.slice().reserved.role, Some(json!("admin")));
    assert_eq!(reloaded.slice().reserved.trial_flag, Some(json!(true)));
    assert!(reloaded.is_authenticated());
}

// =============================================================
// Write-through
// =============================================================

#[test]
fn dispatch_writes_through_on_change() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::rehydrate(storage.clone());
    assert!(store.dispatch(AuthEvent::LoggedIn(payload("t1"))));
    assert!(storage.raw(STORAGE_KEY).unwrap().contains("\"t1\""));
}

#[test]
fn dispatch_without_change_skips_write() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::rehydrate(storage.clone());
    assert!(!store.dispatch(AuthEvent::Failed(AuthOp::Login)));
    assert!(storage.raw(STORAGE_KEY).is_none());
}

#[test]
fn logout_writes_empty_slice() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::rehydrate(storage.clone());
    store.dispatch(AuthEvent::LoggedIn(payload("t1")));
    store.dispatch(AuthEvent::LoggedOut);

    let reloaded = SessionStore::rehydrate(storage);
    assert_eq!(reloaded.session(), &Session::Anonymous);
}

#[test]
fn failed_write_keeps_in_memory_transition() {
    let mut store = SessionStore::rehydrate(ReadOnlyStorage);
    assert!(store.dispatch(AuthEvent::LoggedIn(payload("t1"))));
    assert!(store.is_authenticated());
}

// =============================================================
// Settlement
// =============================================================

#[test]
fn settle_success_applies_event() {
    let mut store = SessionStore::rehydrate(MemoryStorage::default());
    assert_eq!(store.settle(AuthOp::Login, Ok(AuthEvent::LoggedIn(payload("t1")))), Ok(()));
    assert_eq!(store.session().token(), Some("t1"));
}

#[test]
fn settle_login_failure_leaves_session_and_returns_error() {
    let mut store = SessionStore::rehydrate(MemoryStorage::default());
    store.dispatch(AuthEvent::LoggedIn(payload("t1")));
    let before = store.session().clone();

    let err = AuthError::Rejected { status: 401, message: "nope".to_owned() };
    assert_eq!(store.settle(AuthOp::Login, Err(err.clone())), Err(err));
    assert_eq!(store.session(), &before);
}

#[test]
fn settle_refresh_failure_resets_and_persists_reset() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::rehydrate(storage.clone());
    store.dispatch(AuthEvent::LoggedIn(payload("t1")));

    let result = store.settle(AuthOp::Refresh, Err(AuthError::Rejected { status: 401, message: "expired".to_owned() }));
    assert!(result.is_err());
    assert_eq!(store.session(), &Session::Anonymous);
    assert_eq!(SessionStore::rehydrate(storage).session(), &Session::Anonymous);
}

// =============================================================
// End-to-end flows against the gateway double
// =============================================================

#[test]
fn login_flow_authenticates_with_payload() {
    let gateway = MockGateway::default();
    let mut store = SessionStore::rehydrate(MemoryStorage::default());

    let request = AuthRequest::Login(login_form());
    let op = request.op();
    store.settle(op, block_on(perform(&gateway, request))).unwrap();

    assert_eq!(
        store.session(),
        &Session::authenticated("t1", serde_json::from_value(json!({ "id": 1 })).unwrap())
    );
}

#[test]
fn login_then_logout_flow_returns_to_empty_state() {
    let gateway = MockGateway::default();
    let storage = MemoryStorage::default();
    let mut store = SessionStore::rehydrate(storage.clone());

    for request in [AuthRequest::Login(login_form()), AuthRequest::Logout] {
        let op = request.op();
        store.settle(op, block_on(perform(&gateway, request))).unwrap();
    }

    assert_eq!(store.session(), &Session::default());
    assert_eq!(SessionStore::rehydrate(storage).session(), &Session::default());
}

#[test]
fn register_mismatch_flow_never_calls_gateway_or_changes_session() {
    let gateway = MockGateway::default();
    let mut store = SessionStore::rehydrate(MemoryStorage::default());
    let request = AuthRequest::Register(RegisterForm {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "password1".to_owned(),
        confirm_password: "password9".to_owned(),
    });

    let op = request.op();
    let result = store.settle(op, block_on(perform(&gateway, request)));

    assert!(result.is_err());
    assert!(gateway.calls().is_empty());
    assert_eq!(store.session(), &Session::Anonymous);
}

#[test]
fn refresh_flow_replaces_token_and_keeps_profile() {
    let gateway = MockGateway::default();
    let mut store = SessionStore::rehydrate(MemoryStorage::default());
    store.dispatch(AuthEvent::LoggedIn(payload("t1")));
    let profile = store.session().profile().cloned();

    store.settle(AuthOp::Refresh, block_on(perform(&gateway, AuthRequest::Refresh))).unwrap();

    assert_eq!(store.session().token(), Some("t2"));
    assert_eq!(store.session().profile().cloned(), profile);
}

#[test]
fn overlapping_operations_apply_in_settlement_order() {
    let mut store = SessionStore::rehydrate(MemoryStorage::default());
    // Two logins issued together; the second response to arrive wins.
    let first = Ok(AuthEvent::LoggedIn(payload("first")));
    let second = Ok(AuthEvent::LoggedIn(payload("second")));
    store.settle(AuthOp::Login, second).unwrap();
    store.settle(AuthOp::Login, first).unwrap();
    assert_eq!(store.session().token(), Some("first"));
}
