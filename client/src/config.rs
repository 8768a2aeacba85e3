//! Build-time client configuration.
//!
//! Values come from the environment of the build (`option_env!`), since a
//! static WASM bundle has no runtime environment to read.
//!
//! - `EDWARDO_API_BASE_URL`: auth service base URL, default
//!   [`DEFAULT_API_BASE_URL`]
//! - `EDWARDO_GOOGLE_CLIENT_ID`: OAuth client id; Google sign-in is hidden
//!   when unset

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub google_client_id: Option<String>,
}

impl ClientConfig {
    /// Configuration baked into this build.
    #[must_use]
    pub fn current() -> Self {
        Self::from_values(option_env!("EDWARDO_API_BASE_URL"), option_env!("EDWARDO_GOOGLE_CLIENT_ID"))
    }

    /// Build from raw values. Blank values count as unset; a trailing `/` on
    /// the base URL is dropped.
    #[must_use]
    pub fn from_values(api_base_url: Option<&str>, google_client_id: Option<&str>) -> Self {
        let api_base_url = non_blank(api_base_url)
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let google_client_id = non_blank(google_client_id).map(str::to_owned);
        Self { api_base_url, google_client_id }
    }

    #[must_use]
    pub fn google_enabled(&self) -> bool {
        self.google_client_id.is_some()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
