//! Password type with the account form's validation rules.
//!
//! The raw credential is held in a [`SecretString`] so it never shows up in
//! `Debug` output or log lines. It is only exposed at the wire boundary.

use secrecy::{ExposeSecret, SecretString};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors that can occur when validating a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The input string is empty.
    #[error("password cannot be empty")]
    Empty,
    /// The input string is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum required length.
        min: usize,
    },
}

/// A validated raw password.
///
/// ```
/// use our_shop_core::Password;
///
/// assert!(Password::parse("admin123").is_ok());
/// assert!(Password::parse("").is_err());
/// assert!(Password::parse("short").is_err());
/// ```
#[derive(Clone)]
pub struct Password(SecretString);

impl Password {
    /// Parse a `Password` from a string, enforcing the minimum length.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Empty`] for an empty input and
    /// [`PasswordError::TooShort`] below [`MIN_PASSWORD_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.is_empty() {
            return Err(PasswordError::Empty);
        }

        if s.len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok(Self(SecretString::from(s.to_owned())))
    }

    /// Accept the credential of an already-existing account.
    ///
    /// Only new passwords get the length rule; accounts registered
    /// elsewhere may carry shorter ones, and login must still send them.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Empty`] for an empty input.
    pub fn existing(s: &str) -> Result<Self, PasswordError> {
        if s.is_empty() {
            return Err(PasswordError::Empty);
        }

        Ok(Self(SecretString::from(s.to_owned())))
    }

    /// Expose the raw credential for transmission to the account service.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let password = Password::parse("admin123").unwrap();
        assert_eq!(password.expose(), "admin123");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Password::parse(""), Err(PasswordError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Password::parse("ab1"),
            Err(PasswordError::TooShort { min: 6 })
        ));
    }

    #[test]
    fn test_exactly_minimum_length() {
        assert!(Password::parse("abcdef").is_ok());
    }

    #[test]
    fn test_existing_accepts_short_credentials() {
        let password = Password::existing("admin").unwrap();
        assert_eq!(password.expose(), "admin");
    }

    #[test]
    fn test_existing_rejects_empty() {
        assert!(matches!(Password::existing(""), Err(PasswordError::Empty)));
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::parse("admin123").unwrap();
        let debug = format!("{password:?}");
        assert!(!debug.contains("admin123"));
        assert!(debug.contains("REDACTED"));
    }
}
