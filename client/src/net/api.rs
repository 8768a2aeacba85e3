//! HTTP implementation of the auth gateway.
//!
//! Client-side (csr): real requests via `gloo-net`, JSON bodies, cross-origin
//! cookies included so the refresh endpoint sees its ambient credential.
//! Elsewhere: every call fails with a transport error, since these endpoints
//! only mean something in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses become [`AuthError::Rejected`] with the service's
//! message (or the operation's fallback text); failures to reach the service
//! become [`AuthError::Transport`]. Nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
use session::authenticator::request_headers;
use session::gateway::{
    AuthGateway, AuthPayload, GoogleLoginRequest, LoginRequest, RegisterRequest, VerifyOtpRequest, extract_data,
    extract_refreshed_token, extract_registered,
};
use session::reducer::AuthOp;
use session::{AuthError, Session};

use crate::config::ClientConfig;

#[cfg(not(feature = "csr"))]
const NOT_IN_BROWSER: &str = "not available outside the browser";

/// Gateway bound to one base URL and one snapshot of the session's headers.
///
/// Build a fresh one per operation so the bearer credential always reflects
/// the session at the moment the request is issued.
#[derive(Clone, Debug)]
pub struct HttpAuthGateway {
    base_url: String,
    headers: Vec<(&'static str, String)>,
}

impl HttpAuthGateway {
    #[must_use]
    pub fn new(config: &ClientConfig, session: &Session) -> Self {
        Self { base_url: config.api_base_url.clone(), headers: request_headers(session) }
    }

    #[must_use]
    pub fn url_for(&self, op: AuthOp) -> String {
        session::gateway::Endpoint::for_op(op).url(&self.base_url)
    }

    #[must_use]
    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }

    /// Issue the request for `op` and return the raw success body.
    async fn exchange<T: Serialize>(&self, op: AuthOp, body: Option<&T>) -> Result<String, AuthError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;
            use session::gateway::Method;

            let url = self.url_for(op);
            let mut builder = match session::gateway::Endpoint::for_op(op).method {
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
            }
            .credentials(web_sys::RequestCredentials::Include);
            for (name, value) in self.headers() {
                builder = builder.header(name, value);
            }
            let request = match body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| AuthError::Transport(e.to_string()))?;

            let resp = request.send().await.map_err(|e| {
                log::warn!("auth request failed: op={} error={e}", op.as_str());
                AuthError::Transport(e.to_string())
            })?;
            let status = resp.status();
            if !resp.ok() {
                log::warn!("auth request rejected: op={} status={status}", op.as_str());
                let text = resp.text().await.unwrap_or_default();
                return Err(session::gateway::rejection(op, status, &text));
            }
            success_body(op, resp.text().await)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (op, body);
            Err(AuthError::Transport(NOT_IN_BROWSER.to_owned()))
        }
    }

    async fn exchange_empty(&self, op: AuthOp) -> Result<String, AuthError> {
        self.exchange::<()>(op, None).await
    }

    /// Google access-token exchange; `op` only picks the failure text.
    async fn federated(&self, op: AuthOp, access_token: &str) -> Result<AuthPayload, AuthError> {
        let request = GoogleLoginRequest { access_token: access_token.to_owned() };
        let body = self.exchange(op, Some(&request)).await?;
        extract_data(&body)
    }
}

/// Body of a 2xx response. A body that cannot be read is a transport
/// failure, not a decode failure.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
fn success_body<E: std::fmt::Display>(op: AuthOp, body: Result<String, E>) -> Result<String, AuthError> {
    body.map_err(|e| {
        log::warn!("auth response unreadable: op={} error={e}", op.as_str());
        AuthError::Transport(e.to_string())
    })
}

#[async_trait(?Send)]
impl AuthGateway for HttpAuthGateway {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, AuthError> {
        let body = self.exchange(AuthOp::Register, Some(request)).await?;
        extract_registered(&body)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, AuthError> {
        let body = self.exchange(AuthOp::Login, Some(request)).await?;
        extract_data(&body)
    }

    async fn login_with_federated_credential(&self, access_token: &str) -> Result<AuthPayload, AuthError> {
        self.federated(AuthOp::FederatedLogin, access_token).await
    }

    async fn sign_up_with_federated_credential(&self, access_token: &str) -> Result<AuthPayload, AuthError> {
        self.federated(AuthOp::FederatedSignUp, access_token).await
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        let body = self.exchange_empty(AuthOp::Refresh).await?;
        extract_refreshed_token(&body)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.exchange_empty(AuthOp::Logout).await.map(|_| ())
    }

    async fn delete_account(&self) -> Result<(), AuthError> {
        self.exchange_empty(AuthOp::DeleteAccount).await.map(|_| ())
    }

    async fn send_otp(&self) -> Result<(), AuthError> {
        self.exchange_empty(AuthOp::SendOtp).await.map(|_| ())
    }

    async fn verify_otp(&self, code: &str) -> Result<(), AuthError> {
        let request = VerifyOtpRequest { otp: code.to_owned() };
        self.exchange(AuthOp::VerifyOtp, Some(&request)).await.map(|_| ())
    }
}
