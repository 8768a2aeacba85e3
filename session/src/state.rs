//! In-memory session state.
//!
//! DESIGN
//! ======
//! The session is a sum type rather than a token plus an independent
//! `isAuthenticated` flag, so the two can never disagree. The legacy three
//! field view (`token`, `profile`, `is_authenticated`) is still available
//! through accessors for guards and the persisted slice.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque profile record returned by the service. Never validated here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(pub Map<String, Value>);

impl UserProfile {
    /// Look up a single profile attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Best-effort display name for the navbar and dashboard header.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        ["name", "Name", "username", "email", "Email"]
            .iter()
            .find_map(|key| {
                self.get(key)
                    .and_then(Value::as_str)
                    .filter(|name| !name.trim().is_empty())
            })
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Authentication state of the current tab.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    /// No credential held. Initial state.
    #[default]
    Anonymous,
    /// A successful register/login/federated-login has happened and nothing
    /// has invalidated it since.
    Authenticated { token: String, profile: UserProfile },
}

impl Session {
    #[must_use]
    pub fn authenticated(token: impl Into<String>, profile: UserProfile) -> Self {
        Self::Authenticated { token: token.into(), profile }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Current bearer credential, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { token, .. } => Some(token),
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { profile, .. } => Some(profile),
        }
    }
}
