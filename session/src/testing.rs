//! In-memory gateway double shared by unit tests.

use std::cell::RefCell;

use async_trait::async_trait;
use serde_json::json;

use crate::error::AuthError;
use crate::gateway::{AuthGateway, AuthPayload, LoginRequest, RegisterRequest};
use crate::reducer::AuthOp;

/// Records every call and answers with canned results.
pub(crate) struct MockGateway {
    pub calls: RefCell<Vec<AuthOp>>,
    pub failure: Option<AuthError>,
    pub payload: AuthPayload,
    pub refreshed_token: String,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failure: None,
            payload: AuthPayload {
                token: "t1".to_owned(),
                profile: serde_json::from_value(json!({ "id": 1 })).unwrap(),
            },
            refreshed_token: "t2".to_owned(),
        }
    }
}

impl MockGateway {
    pub fn failing(error: AuthError) -> Self {
        Self { failure: Some(error), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<AuthOp> {
        self.calls.borrow().clone()
    }

    fn answer<T>(&self, op: AuthOp, ok: T) -> Result<T, AuthError> {
        self.calls.borrow_mut().push(op);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(ok),
        }
    }
}

#[async_trait(?Send)]
impl AuthGateway for MockGateway {
    async fn register(&self, _request: &RegisterRequest) -> Result<AuthPayload, AuthError> {
        self.answer(AuthOp::Register, self.payload.clone())
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthPayload, AuthError> {
        self.answer(AuthOp::Login, self.payload.clone())
    }

    async fn login_with_federated_credential(&self, _access_token: &str) -> Result<AuthPayload, AuthError> {
        self.answer(AuthOp::FederatedLogin, self.payload.clone())
    }

    async fn sign_up_with_federated_credential(&self, _access_token: &str) -> Result<AuthPayload, AuthError> {
        self.answer(AuthOp::FederatedSignUp, self.payload.clone())
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        self.answer(AuthOp::Refresh, self.refreshed_token.clone())
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.answer(AuthOp::Logout, ())
    }

    async fn delete_account(&self) -> Result<(), AuthError> {
        self.answer(AuthOp::DeleteAccount, ())
    }

    async fn send_otp(&self) -> Result<(), AuthError> {
        self.answer(AuthOp::SendOtp, ())
    }

    async fn verify_otp(&self, _code: &str) -> Result<(), AuthError> {
        self.answer(AuthOp::VerifyOtp, ())
    }
}
