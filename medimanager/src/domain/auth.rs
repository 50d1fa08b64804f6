//! Operator identity and the credentials the `login` command posts.
//!
//! The CLI reads the password from its input stream rather than argv, so
//! the secret lives in a zeroized buffer from the moment it is read until
//! the login request has been sent.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

const GUEST_OPERATOR: &str = "Guest";
const REDACTED: &str = "<redacted>";

/// Login input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("Username is required")]
    EmptyUsername,
    /// No password was typed.
    #[error("Password is required")]
    EmptyPassword,
}

/// Username and password for the clinic backend's `/login` endpoint.
///
/// The username is trimmed; the password keeps inner and surrounding
/// spaces but never a line terminator. `Debug` output hides the password.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate a username and an already captured password.
    ///
    /// # Examples
    /// ```
    /// use medimanager::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::new(" subhajit ", "secret".to_owned()).unwrap();
    /// assert_eq!(creds.username(), "subhajit");
    /// ```
    pub fn new(
        username: &str,
        password: impl Into<Zeroizing<String>>,
    ) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        let password = password.into();
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password,
        })
    }

    /// Build from a line read at the password prompt, dropping its `\n` or
    /// `\r\n` terminator in place.
    pub fn from_password_line(
        username: &str,
        mut line: Zeroizing<String>,
    ) -> Result<Self, LoginValidationError> {
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Self::new(username, line)
    }

    /// Trimmed username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Only the login adapters read this.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Name shown in the directory header for the current operator.
///
/// Passed in from configuration; blank or missing input becomes `Guest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorName(String);

impl OperatorName {
    /// Build from optional configured input.
    pub fn from_setting(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(Self::guest, |name| Self(name.to_owned()))
    }

    /// The fallback identity.
    pub fn guest() -> Self {
        Self(GUEST_OPERATOR.to_owned())
    }
}

impl AsRef<str> for OperatorName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
