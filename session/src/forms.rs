//! Form input validation run before any gateway call.
//!
//! Register checks the confirmation before the length, so a mismatched pair of
//! short passwords reports the mismatch.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::error::ValidationError;
use crate::gateway::{LoginRequest, RegisterRequest};

/// Minimum password length accepted at registration, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Raw register form contents as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Validate and strip the confirmation field.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: blank name/email/password, password
    /// mismatch, then password shorter than [`MIN_PASSWORD_LEN`].
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let name = required(&self.name, "name")?;
        let email = required(&self.email, "email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
        }
        Ok(RegisterRequest { name, email, password: self.password.clone() })
    }
}

/// Raw login form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank email or password.
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let email = required(&self.email, "email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        Ok(LoginRequest { email, password: self.password.clone() })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}
