//! Auth service contract: wire types, endpoint table, and the gateway trait.
//!
//! SYSTEM CONTEXT
//! ==============
//! The concrete HTTP gateway lives in the web crate (`net::api`). This module
//! owns everything about the exchange that does not need a browser: request
//! bodies, the `{"Data": ...}` envelope transform, error-body parsing, and the
//! mapping from a UI request to the reducer event it produces.
//!
//! ERROR HANDLING
//! ==============
//! The gateway never retries. A single failed attempt surfaces immediately as
//! an [`AuthError`]; retrying is a fresh user action.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AuthError;
use crate::forms::{LoginForm, RegisterForm};
use crate::reducer::{AuthEvent, AuthOp};
use crate::state::UserProfile;

/// Token plus profile returned by register, login, and federated login.
///
/// This is the login shape (`UserData`); register answers with `user` and is
/// read through [`extract_registered`]. A null or missing profile is empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "UserData", default, deserialize_with = "null_as_empty")]
    pub profile: UserProfile,
}

/// Register response body. Only `user` is read; a `UserData` sibling is ignored.
#[derive(Debug, Deserialize)]
struct RegisteredPayload {
    #[serde(rename = "Token")]
    token: String,
    #[serde(rename = "user", default, deserialize_with = "null_as_empty")]
    profile: UserProfile,
}

impl From<RegisteredPayload> for AuthPayload {
    fn from(payload: RegisteredPayload) -> Self {
        Self { token: payload.token, profile: payload.profile }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UserProfile, D::Error> {
    Option::<UserProfile>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Refresh answers with a bare token string; an object form is also accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RefreshData {
    Bare(String),
    Wrapped {
        #[serde(rename = "Token")]
        token: String,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "Data")]
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GoogleLoginRequest {
    pub access_token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyOtpRequest {
    #[serde(rename = "OTP")]
    pub otp: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
}

/// Method and path (relative to the API base URL) of one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    #[must_use]
    pub fn for_op(op: AuthOp) -> Self {
        let (method, path) = match op {
            AuthOp::Register => (Method::Post, "/auth/register"),
            AuthOp::Login => (Method::Post, "/auth/login"),
            AuthOp::FederatedLogin | AuthOp::FederatedSignUp => (Method::Post, "/auth/google-login"),
            AuthOp::SendOtp => (Method::Post, "/auth/send-otp"),
            AuthOp::VerifyOtp => (Method::Post, "/auth/verify-otp"),
            AuthOp::Logout => (Method::Post, "/auth/logout"),
            AuthOp::Refresh => (Method::Put, "/auth/refresh-token"),
            AuthOp::DeleteAccount => (Method::Put, "/user-profile/delete"),
        };
        Self { method, path }
    }

    /// Absolute URL under `base_url`; a trailing `/` on the base is ignored.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// Unwrap the `Data` field every successful response carries.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] when the body is not an envelope of `T`.
pub fn extract_data<T: DeserializeOwned>(body: &str) -> Result<T, AuthError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| AuthError::Decode(e.to_string()))
}

/// Unwrap a register response into the common payload.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] when the body is not a register envelope.
pub fn extract_registered(body: &str) -> Result<AuthPayload, AuthError> {
    extract_data::<RegisteredPayload>(body).map(AuthPayload::from)
}

/// Pull the new token out of a refresh response body.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] when no token can be found.
pub fn extract_refreshed_token(body: &str) -> Result<String, AuthError> {
    match extract_data::<RefreshData>(body)? {
        RefreshData::Bare(token) | RefreshData::Wrapped { token } => Ok(token),
    }
}

/// Build the error for a non-success response, preferring the service's
/// `message` and falling back to the operation's generic text.
#[must_use]
pub fn rejection(op: AuthOp, status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .unwrap_or_default()
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback_message(op).to_owned());
    AuthError::Rejected { status, message }
}

/// Notification text shown when `op` succeeds.
#[must_use]
pub fn success_message(op: AuthOp) -> &'static str {
    match op {
        AuthOp::Register => "Account created successfully! Welcome to Edwardo!",
        AuthOp::Login => "Welcome back to Edwardo!",
        AuthOp::FederatedLogin | AuthOp::FederatedSignUp => "Welcome to Edwardo!",
        AuthOp::Refresh => "Session refreshed.",
        AuthOp::Logout => "You have been signed out.",
        AuthOp::DeleteAccount => "Your account has been deleted.",
        AuthOp::SendOtp => "Verification code sent.",
        AuthOp::VerifyOtp => "Account verified.",
    }
}

/// Generic failure text used when the service gives no message.
#[must_use]
pub fn fallback_message(op: AuthOp) -> &'static str {
    match op {
        AuthOp::Register => "Registration failed. Please try again.",
        AuthOp::Login => "Login failed. Please try again.",
        AuthOp::FederatedLogin => "Google login failed. Please try again.",
        AuthOp::FederatedSignUp => "Google sign up failed. Please try again.",
        AuthOp::Refresh => "Your session has expired. Please sign in again.",
        AuthOp::Logout => "Logout failed. Please try again.",
        AuthOp::DeleteAccount => "Account deletion failed. Please try again.",
        AuthOp::SendOtp => "Could not send the verification code. Please try again.",
        AuthOp::VerifyOtp => "Verification failed. Please try again.",
    }
}

/// Remote authentication service.
///
/// `?Send` because browser futures are single-threaded.
#[async_trait(?Send)]
pub trait AuthGateway {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, AuthError>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, AuthError>;
    async fn login_with_federated_credential(&self, access_token: &str) -> Result<AuthPayload, AuthError>;
    /// Same exchange as [`Self::login_with_federated_credential`], started
    /// from the registration page.
    async fn sign_up_with_federated_credential(&self, access_token: &str) -> Result<AuthPayload, AuthError>;
    /// Uses the ambient cookie credential, not the stored bearer token.
    async fn refresh(&self) -> Result<String, AuthError>;
    async fn logout(&self) -> Result<(), AuthError>;
    async fn delete_account(&self) -> Result<(), AuthError>;
    async fn send_otp(&self) -> Result<(), AuthError>;
    async fn verify_otp(&self, code: &str) -> Result<(), AuthError>;
}

/// A UI-initiated auth operation with its raw inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    Register(RegisterForm),
    Login(LoginForm),
    FederatedLogin { access_token: String },
    FederatedSignUp { access_token: String },
    Refresh,
    Logout,
    DeleteAccount,
    SendOtp,
    VerifyOtp { code: String },
}

impl AuthRequest {
    #[must_use]
    pub fn op(&self) -> AuthOp {
        match self {
            Self::Register(_) => AuthOp::Register,
            Self::Login(_) => AuthOp::Login,
            Self::FederatedLogin { .. } => AuthOp::FederatedLogin,
            Self::FederatedSignUp { .. } => AuthOp::FederatedSignUp,
            Self::Refresh => AuthOp::Refresh,
            Self::Logout => AuthOp::Logout,
            Self::DeleteAccount => AuthOp::DeleteAccount,
            Self::SendOtp => AuthOp::SendOtp,
            Self::VerifyOtp { .. } => AuthOp::VerifyOtp,
        }
    }
}

/// Validate `request`, run it against `gateway`, and map success to the
/// reducer event. Validation failures return before the gateway is touched.
///
/// # Errors
///
/// Returns the validation error or whatever the gateway reported.
pub async fn perform<G: AuthGateway + ?Sized>(gateway: &G, request: AuthRequest) -> Result<AuthEvent, AuthError> {
    match request {
        AuthRequest::Register(form) => {
            let body = form.validate()?;
            gateway.register(&body).await.map(AuthEvent::Registered)
        }
        AuthRequest::Login(form) => {
            let body = form.validate()?;
            gateway.login(&body).await.map(AuthEvent::LoggedIn)
        }
        AuthRequest::FederatedLogin { access_token } => gateway
            .login_with_federated_credential(&access_token)
            .await
            .map(AuthEvent::FederatedLoggedIn),
        AuthRequest::FederatedSignUp { access_token } => gateway
            .sign_up_with_federated_credential(&access_token)
            .await
            .map(AuthEvent::FederatedSignedUp),
        AuthRequest::Refresh => gateway.refresh().await.map(AuthEvent::Refreshed),
        AuthRequest::Logout => gateway.logout().await.map(|()| AuthEvent::LoggedOut),
        AuthRequest::DeleteAccount => gateway.delete_account().await.map(|()| AuthEvent::AccountDeleted),
        AuthRequest::SendOtp => gateway.send_otp().await.map(|()| AuthEvent::OtpSent),
        AuthRequest::VerifyOtp { code } => {
            let code = code.trim();
            if code.is_empty() {
                return Err(crate::error::ValidationError::MissingField("verification code").into());
            }
            gateway.verify_otp(code).await.map(|()| AuthEvent::OtpVerified)
        }
    }
}
