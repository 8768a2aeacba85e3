//! Pure session transitions driven by settled gateway operations.
//!
//! Two macro-states, Anonymous and Authenticated. The table in
//! [`reduce`] lists every edge; anything not listed leaves the session as is.

#[cfg(test)]
#[path = "reducer_test.rs"]
mod reducer_test;

use crate::gateway::AuthPayload;
use crate::state::Session;

/// Operations the UI can issue against the auth service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthOp {
    Register,
    Login,
    FederatedLogin,
    FederatedSignUp,
    Refresh,
    Logout,
    DeleteAccount,
    SendOtp,
    VerifyOtp,
}

impl AuthOp {
    /// Short name used in log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::FederatedLogin => "google-login",
            Self::FederatedSignUp => "google-signup",
            Self::Refresh => "refresh-token",
            Self::Logout => "logout",
            Self::DeleteAccount => "delete-account",
            Self::SendOtp => "send-otp",
            Self::VerifyOtp => "verify-otp",
        }
    }
}

/// Settled outcome of one operation, as seen by the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthEvent {
    Registered(AuthPayload),
    LoggedIn(AuthPayload),
    FederatedLoggedIn(AuthPayload),
    FederatedSignedUp(AuthPayload),
    /// New bearer token from the ambient refresh credential.
    Refreshed(String),
    LoggedOut,
    AccountDeleted,
    OtpSent,
    OtpVerified,
    /// The operation failed; the error itself is reported to the UI separately.
    Failed(AuthOp),
}

impl AuthEvent {
    #[must_use]
    pub fn op(&self) -> AuthOp {
        match self {
            Self::Registered(_) => AuthOp::Register,
            Self::LoggedIn(_) => AuthOp::Login,
            Self::FederatedLoggedIn(_) => AuthOp::FederatedLogin,
            Self::FederatedSignedUp(_) => AuthOp::FederatedSignUp,
            Self::Refreshed(_) => AuthOp::Refresh,
            Self::LoggedOut => AuthOp::Logout,
            Self::AccountDeleted => AuthOp::DeleteAccount,
            Self::OtpSent => AuthOp::SendOtp,
            Self::OtpVerified => AuthOp::VerifyOtp,
            Self::Failed(op) => *op,
        }
    }
}

/// Apply `event` to `session`, returning the next session.
///
/// | event                                   | next                          |
/// |-----------------------------------------|-------------------------------|
/// | register / login / federated success    | `Authenticated` from payload  |
/// | refresh success                         | token replaced, rest kept     |
/// | logout / delete-account success         | `Anonymous`                   |
/// | refresh failure                         | `Anonymous`                   |
/// | otp success, any other failure          | unchanged                     |
#[must_use]
pub fn reduce(session: &Session, event: AuthEvent) -> Session {
    match event {
        AuthEvent::Registered(payload)
        | AuthEvent::LoggedIn(payload)
        | AuthEvent::FederatedLoggedIn(payload)
        | AuthEvent::FederatedSignedUp(payload) => Session::authenticated(payload.token, payload.profile),
        AuthEvent::Refreshed(token) => match session {
            Session::Authenticated { profile, .. } => Session::authenticated(token, profile.clone()),
            // A refreshed token is not a login: the session stays anonymous.
            Session::Anonymous => Session::Anonymous,
        },
        AuthEvent::LoggedOut | AuthEvent::AccountDeleted | AuthEvent::Failed(AuthOp::Refresh) => Session::Anonymous,
        AuthEvent::OtpSent | AuthEvent::OtpVerified | AuthEvent::Failed(_) => session.clone(),
    }
}
