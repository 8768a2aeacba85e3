use super::*;
use crate::error::ValidationError;
use crate::testing::MockGateway;
use futures::executor::block_on;
use serde_json::json;

// =============================================================
// Envelope transform
// =============================================================

#[test]
fn extract_data_unwraps_login_payload() {
    let body = r#"{"Data":{"Token":"t1","UserData":{"id":1}},"message":"ok"}"#;
    let payload: AuthPayload = extract_data(body).unwrap();
    assert_eq!(payload.token, "t1");
    assert_eq!(payload.profile.get("id"), Some(&json!(1)));
}

#[test]
fn extract_data_treats_null_profile_as_empty() {
    let payload: AuthPayload = extract_data(r#"{"Data":{"Token":"t1","UserData":null}}"#).unwrap();
    assert_eq!(payload.token, "t1");
    assert_eq!(payload.profile, UserProfile::default());
}

#[test]
fn extract_data_login_ignores_register_user_field() {
    let body = r#"{"Data":{"Token":"t1","UserData":{"id":1},"user":{"id":2}}}"#;
    let payload: AuthPayload = extract_data(body).unwrap();
    assert_eq!(payload.profile.get("id"), Some(&json!(1)));
}

#[test]
fn extract_registered_reads_user_field() {
    let payload = extract_registered(r#"{"Data":{"Token":"t1","user":{"name":"Ada"}}}"#).unwrap();
    assert_eq!(payload.token, "t1");
    assert_eq!(payload.profile.get("name"), Some(&json!("Ada")));
}

#[test]
fn extract_registered_with_both_profile_keys_prefers_user() {
    let body = r#"{"Data":{"Token":"t1","UserData":{"id":1},"user":{"id":2}}}"#;
    let payload = extract_registered(body).unwrap();
    assert_eq!(payload.profile.get("id"), Some(&json!(2)));
}

#[test]
fn extract_registered_treats_null_user_as_empty() {
    let payload = extract_registered(r#"{"Data":{"Token":"t1","user":null}}"#).unwrap();
    assert_eq!(payload.profile, UserProfile::default());
}

#[test]
fn extract_data_defaults_missing_profile_to_empty() {
    let payload: AuthPayload = extract_data(r#"{"Data":{"Token":"t1"}}"#).unwrap();
    assert_eq!(payload.profile, UserProfile::default());
}

#[test]
fn extract_data_without_envelope_is_decode_error() {
    let err = extract_data::<AuthPayload>(r#"{"Token":"t1"}"#).unwrap_err();
    assert!(matches!(err, AuthError::Decode(_)));
}

#[test]
fn extract_refreshed_token_accepts_bare_and_wrapped_forms() {
    assert_eq!(extract_refreshed_token(r#"{"Data":"t2"}"#).unwrap(), "t2");
    assert_eq!(extract_refreshed_token(r#"{"Data":{"Token":"t3"}}"#).unwrap(), "t3");
    assert!(extract_refreshed_token(r#"{"Data":42}"#).is_err());
}

// =============================================================
// Error bodies
// =============================================================

#[test]
fn rejection_prefers_service_message() {
    let err = rejection(AuthOp::Login, 401, r#"{"message":"Invalid credentials"}"#);
    assert_eq!(err, AuthError::Rejected { status: 401, message: "Invalid credentials".to_owned() });
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.status(), Some(401));
}

#[test]
fn rejection_falls_back_for_empty_or_unparsable_body() {
    assert_eq!(rejection(AuthOp::Login, 500, "").to_string(), "Login failed. Please try again.");
    assert_eq!(
        rejection(AuthOp::Register, 502, "<html>bad gateway</html>").to_string(),
        "Registration failed. Please try again."
    );
    assert_eq!(
        rejection(AuthOp::FederatedLogin, 400, r#"{"message":"  "}"#).to_string(),
        "Google login failed. Please try again."
    );
}

#[test]
fn google_sign_up_has_its_own_fallback_text() {
    assert_eq!(
        rejection(AuthOp::FederatedSignUp, 400, "").to_string(),
        "Google sign up failed. Please try again."
    );
    assert_eq!(success_message(AuthOp::FederatedSignUp), success_message(AuthOp::FederatedLogin));
}

// =============================================================
// Endpoint table and request bodies
// =============================================================

#[test]
fn endpoint_table_matches_service_routes() {
    let table = [
        (AuthOp::Register, Method::Post, "/auth/register"),
        (AuthOp::Login, Method::Post, "/auth/login"),
        (AuthOp::FederatedLogin, Method::Post, "/auth/google-login"),
        (AuthOp::FederatedSignUp, Method::Post, "/auth/google-login"),
        (AuthOp::SendOtp, Method::Post, "/auth/send-otp"),
        (AuthOp::VerifyOtp, Method::Post, "/auth/verify-otp"),
        (AuthOp::Logout, Method::Post, "/auth/logout"),
        (AuthOp::Refresh, Method::Put, "/auth/refresh-token"),
        (AuthOp::DeleteAccount, Method::Put, "/user-profile/delete"),
    ];
    for (op, method, path) in table {
        assert_eq!(Endpoint::for_op(op), Endpoint { method, path }, "{}", op.as_str());
    }
}

#[test]
fn endpoint_url_joins_without_double_slash() {
    let endpoint = Endpoint::for_op(AuthOp::Login);
    assert_eq!(endpoint.url("http://localhost:8000/api/"), "http://localhost:8000/api/auth/login");
    assert_eq!(endpoint.url("http://localhost:8000/api"), "http://localhost:8000/api/auth/login");
}

#[test]
fn request_bodies_use_service_field_names() {
    let otp = serde_json::to_value(VerifyOtpRequest { otp: "123456".to_owned() }).unwrap();
    assert_eq!(otp, json!({ "OTP": "123456" }));
    let google = serde_json::to_value(GoogleLoginRequest { access_token: "ya29".to_owned() }).unwrap();
    assert_eq!(google, json!({ "access_token": "ya29" }));
}

// =============================================================
// perform
// =============================================================

#[test]
fn perform_login_maps_to_logged_in_event() {
    let gateway = MockGateway::default();
    let form = LoginForm { email: "a@b.com".to_owned(), password: "secret".to_owned() };
    let event = block_on(perform(&gateway, AuthRequest::Login(form))).unwrap();
    assert_eq!(event, AuthEvent::LoggedIn(gateway.payload.clone()));
    assert_eq!(gateway.calls(), vec![AuthOp::Login]);
}

#[test]
fn perform_register_with_mismatched_confirmation_never_calls_gateway() {
    let gateway = MockGateway::default();
    let form = RegisterForm {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "password1".to_owned(),
        confirm_password: "password2".to_owned(),
    };
    let err = block_on(perform(&gateway, AuthRequest::Register(form))).unwrap_err();
    assert_eq!(err, AuthError::Validation(ValidationError::PasswordMismatch));
    assert!(gateway.calls().is_empty());
}

#[test]
fn perform_register_with_short_password_never_calls_gateway() {
    let gateway = MockGateway::default();
    let form = RegisterForm {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "short".to_owned(),
        confirm_password: "short".to_owned(),
    };
    assert!(block_on(perform(&gateway, AuthRequest::Register(form))).is_err());
    assert!(gateway.calls().is_empty());
}

#[test]
fn perform_blank_otp_code_never_calls_gateway() {
    let gateway = MockGateway::default();
    let err = block_on(perform(&gateway, AuthRequest::VerifyOtp { code: "  ".to_owned() })).unwrap_err();
    assert!(matches!(err, AuthError::Validation(ValidationError::MissingField(_))));
    assert!(gateway.calls().is_empty());
}

#[test]
fn perform_surfaces_single_failure_without_retry() {
    let gateway = MockGateway::failing(AuthError::Transport("offline".to_owned()));
    let err = block_on(perform(&gateway, AuthRequest::Refresh)).unwrap_err();
    assert_eq!(err, AuthError::Transport("offline".to_owned()));
    assert_eq!(gateway.calls(), vec![AuthOp::Refresh]);
}

#[test]
fn perform_maps_each_request_to_its_op() {
    let gateway = MockGateway::default();
    let requests = [
        AuthRequest::FederatedLogin { access_token: "ya29".to_owned() },
        AuthRequest::FederatedSignUp { access_token: "ya29".to_owned() },
        AuthRequest::Refresh,
        AuthRequest::Logout,
        AuthRequest::DeleteAccount,
        AuthRequest::SendOtp,
        AuthRequest::VerifyOtp { code: "123456".to_owned() },
    ];
    for request in requests {
        let op = request.op();
        let event = block_on(perform(&gateway, request)).unwrap();
        assert_eq!(event.op(), op);
    }
    assert_eq!(gateway.calls().len(), 7);
}
