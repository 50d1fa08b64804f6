//! Reqwest-backed login adapter.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::client::{ApiClient, HttpFailure, save_failure_message, text_preview};
use super::dto::LoginRequestDto;
use crate::domain::LoginCredentials;
use crate::domain::ports::{LoginError, LoginService, LoginSession};

const LOGIN_SEGMENT: &str = "login";
const DEFAULT_REJECTION: &str = "Invalid credentials";

/// Login against the clinic REST API's `/login` endpoint.
#[derive(Debug, Clone)]
pub struct HttpLoginService {
    api: ApiClient,
}

impl HttpLoginService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl LoginService for HttpLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, LoginError> {
        let url = self.api.base_url().join([LOGIN_SEGMENT]);
        let payload = LoginRequestDto {
            username: credentials.username(),
            password: credentials.password(),
        };
        let body = self
            .api
            .send(self.api.http().post(url).json(&payload))
            .await
            .map_err(map_failure)?;
        Ok(LoginSession {
            username: credentials.username().to_owned(),
            message: text_preview(&body),
        })
    }
}

fn map_failure(failure: HttpFailure) -> LoginError {
    match failure {
        HttpFailure::Transport(message) => LoginError::transport(message),
        HttpFailure::Timeout(message) => LoginError::timeout(message),
        HttpFailure::Status { status, .. } if status == StatusCode::UNAUTHORIZED => {
            LoginError::rejected(DEFAULT_REJECTION)
        }
        HttpFailure::Status { status, body } => {
            LoginError::status(status.as_u16(), save_failure_message(status, &body))
        }
    }
}
