//! Request authenticator: bearer credential for outgoing requests.
//!
//! Pure. It never triggers a refresh; an expired token is only replaced when
//! the caller explicitly runs the refresh operation.

#[cfg(test)]
#[path = "authenticator_test.rs"]
mod authenticator_test;

use crate::state::Session;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// `Authorization` header value for `session`, if it holds a token.
#[must_use]
pub fn bearer_value(session: &Session) -> Option<String> {
    session.token().map(|token| format!("Bearer {token}"))
}

/// Headers every auth request carries: JSON content type, plus the bearer
/// credential when one is present.
#[must_use]
pub fn request_headers(session: &Session) -> Vec<(&'static str, String)> {
    let mut headers = vec![(CONTENT_TYPE, JSON_CONTENT_TYPE.to_owned())];
    if let Some(value) = bearer_value(session) {
        headers.push((AUTHORIZATION, value));
    }
    headers
}
