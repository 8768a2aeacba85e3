use super::*;
use serde_json::json;
use session::gateway::AuthPayload;
use session::persist::MemoryStorage;

fn payload() -> AuthPayload {
    AuthPayload { token: "t1".to_owned(), profile: serde_json::from_value(json!({ "id": 1 })).unwrap() }
}

// =============================================================
// Loading gate
// =============================================================

#[test]
fn auth_state_default_is_loading() {
    let state = AuthState::<MemoryStorage>::default();
    assert!(state.loading());
    assert!(state.session().is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn guards_defer_while_loading() {
    let state = AuthState::<MemoryStorage>::default();
    assert_eq!(state.protected_outcome("/Dashboard"), None);
    assert_eq!(state.redirect_outcome("/"), None);
}

#[test]
fn rehydrated_empty_storage_is_anonymous() {
    let state = AuthState::rehydrated_from(MemoryStorage::default());
    assert!(!state.loading());
    assert_eq!(state.session(), Some(&Session::Anonymous));
}

// =============================================================
// Guards through the context object
// =============================================================

#[test]
fn anonymous_state_routes_to_landing() {
    let state = AuthState::rehydrated_from(MemoryStorage::default());
    assert_eq!(state.protected_outcome("/Dashboard"), Some(GuardOutcome::Redirect("/Home")));
    assert_eq!(state.redirect_outcome("/"), Some(GuardOutcome::Redirect("/Home")));
}

#[test]
fn authenticated_state_routes_to_dashboard() {
    let mut state = AuthState::rehydrated_from(MemoryStorage::default());
    state.settle(AuthOp::Login, Ok(AuthEvent::LoggedIn(payload()))).unwrap();
    assert!(state.is_authenticated());
    assert_eq!(state.protected_outcome("/Dashboard"), Some(GuardOutcome::Render));
    assert_eq!(state.redirect_outcome("/"), Some(GuardOutcome::Redirect("/Dashboard")));
}

// =============================================================
// Settlement
// =============================================================

#[test]
fn settle_before_rehydration_passes_result_through() {
    let mut state = AuthState::<MemoryStorage>::default();
    assert_eq!(state.settle(AuthOp::Logout, Ok(AuthEvent::LoggedOut)), Ok(()));
    let err = AuthError::Transport("offline".to_owned());
    assert_eq!(state.settle(AuthOp::Login, Err(err.clone())), Err(err));
    assert!(state.loading());
}

#[test]
fn refresh_failure_signs_out() {
    let mut state = AuthState::rehydrated_from(MemoryStorage::default());
    state.settle(AuthOp::Login, Ok(AuthEvent::LoggedIn(payload()))).unwrap();
    let result = state.settle(AuthOp::Refresh, Err(AuthError::Rejected { status: 401, message: "expired".to_owned() }));
    assert!(result.is_err());
    assert!(!state.is_authenticated());
}

#[test]
fn settled_login_survives_reload() {
    let storage = MemoryStorage::default();
    let mut state = AuthState::rehydrated_from(storage.clone());
    state.settle(AuthOp::Login, Ok(AuthEvent::LoggedIn(payload()))).unwrap();
    assert!(AuthState::rehydrated_from(storage).is_authenticated());
}
