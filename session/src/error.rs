//! Error types shared by the gateway, form validation, and persistence.
//!
//! DESIGN
//! ======
//! Every failure a user can trigger resolves to an [`AuthError`] whose
//! `Display` output is the text shown in the notification toast. Nothing in
//! here is fatal; callers recover at the UI boundary.

/// Client-side validation failures caught before any network call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    /// A required form field was blank after trimming.
    #[error("Please fill in your {0}")]
    MissingField(&'static str),
}

/// Failure of an authentication operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Rejected locally; the gateway was never called.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The request never produced a response (offline, CORS, DNS, ...).
    #[error("{0}")]
    Transport(String),
    /// The response arrived but its body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl AuthError {
    /// HTTP status for remote rejections, `None` for everything else.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error returned by a [`crate::persist::StorageBackend`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    /// No storage area is reachable (no `window`, storage disabled).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the write (quota exceeded, private mode).
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("failed to encode persisted session: {0}")]
    Encode(String),
}
