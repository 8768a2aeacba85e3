//! Google sign-in via the OAuth 2 implicit flow.
//!
//! The browser is sent to Google's consent page and comes back to the page it
//! left with `#access_token=...&state=...` in the URL fragment. That access
//! token is what the auth service's federated login expects. A random `state`
//! value is kept in `sessionStorage` and must match on return.

#[cfg(test)]
#[path = "google_test.rs"]
mod google_test;

use url::Url;

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_SCOPES: &str = "openid email profile";
const STATE_KEY: &str = "edwardo:google-oauth-state";

/// What the returning URL fragment carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GoogleCallback {
    Token { access_token: String, state: Option<String> },
    Denied { error: String },
}

/// Consent page URL for `client_id`, returning to `redirect_uri`.
///
/// # Errors
///
/// Returns the parse error when `redirect_uri` produces an invalid URL.
pub fn authorize_url(client_id: &str, redirect_uri: &str, state: &str) -> Result<String, url::ParseError> {
    let url = Url::parse_with_params(
        GOOGLE_AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "token"),
            ("scope", GOOGLE_SCOPES),
            ("include_granted_scopes", "true"),
            ("state", state),
        ],
    )?;
    Ok(url.into())
}

/// Parse the URL fragment Google redirects back with. Fragments that carry
/// neither a token nor an error are not OAuth callbacks.
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<GoogleCallback> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut access_token = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }
    if let Some(error) = error {
        return Some(GoogleCallback::Denied { error });
    }
    access_token
        .filter(|t| !t.is_empty())
        .map(|access_token| GoogleCallback::Token { access_token, state })
}

/// Accept a callback only when its `state` matches the one we issued.
#[must_use]
pub fn verify_state(callback: GoogleCallback, expected: Option<&str>) -> Option<GoogleCallback> {
    match &callback {
        GoogleCallback::Token { state, .. } if state.as_deref() == expected && expected.is_some() => Some(callback),
        GoogleCallback::Token { .. } => {
            log::warn!("discarding google callback with mismatched state");
            None
        }
        GoogleCallback::Denied { .. } => Some(callback),
    }
}

/// Send the browser to Google's consent page, returning to `return_path`.
pub fn begin_sign_in(client_id: &str, return_path: &str) {
    let state = uuid::Uuid::new_v4().to_string();
    super::storage::set_session_item(STATE_KEY, &state);
    #[cfg(feature = "csr")]
    {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return;
        };
        let Ok(origin) = location.origin() else {
            return;
        };
        match authorize_url(client_id, &format!("{origin}{return_path}"), &state) {
            Ok(url) => {
                let _ = location.set_href(&url);
            }
            Err(e) => log::warn!("could not build google authorize url: {e}"),
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (client_id, return_path);
    }
}

/// Consume an OAuth callback from the current URL, if there is one, and strip
/// the fragment so a reload does not replay it.
pub fn take_callback() -> Option<GoogleCallback> {
    #[cfg(feature = "csr")]
    {
        let window = web_sys::window()?;
        let hash = window.location().hash().ok()?;
        let callback = parse_fragment(&hash)?;
        if let Ok(history) = window.history() {
            let path = window.location().pathname().unwrap_or_default();
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
        }
        verify_state(callback, super::storage::take_session_item(STATE_KEY).as_deref())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
