//! Driven port for the backend login endpoint.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::LoginCredentials;

/// Session details returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Username the backend accepted.
    pub username: String,
    /// Free-text acknowledgement from the backend.
    pub message: String,
}

define_port_error! {
    /// Failures reported by the login collaborator.
    pub enum LoginError {
        /// The backend refused the credentials.
        Rejected { message: String } =>
            "login rejected: {message}",
        /// The request never produced a response.
        Transport { message: String } =>
            "login endpoint unreachable: {message}",
        /// The backend did not answer within the client timeout.
        Timeout { message: String } =>
            "login endpoint timed out: {message}",
        /// The backend answered with an unexpected status.
        Status { status: u16, message: String } =>
            "login failed with status {status}: {message}",
    }
}

/// Port for opening a backend session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Submit credentials and return the accepted session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, LoginError>;
}
