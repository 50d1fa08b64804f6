//! Reqwest-backed doctor directory adapter.
//!
//! This adapter owns transport details only: URL layout, JSON encoding,
//! and mapping HTTP failures onto [`DoctorDirectoryError`].

use async_trait::async_trait;

use super::client::{ApiClient, HttpFailure, http_failure_message, save_failure_message};
use super::dto::{DoctorPayloadDto, decode_doctor, decode_doctors};
use crate::domain::ports::{DoctorDirectory, DoctorDirectoryError};
use crate::domain::{DoctorDraft, DoctorId, DoctorRecord};

const DOCTORS_SEGMENT: &str = "doctors";

/// Which call failed; saves surface the backend's message, the rest do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Fetch,
    Save,
    Delete,
}

/// Doctor directory served by the clinic REST API under `/doctors`.
#[derive(Debug, Clone)]
pub struct DoctorHttpDirectory {
    api: ApiClient,
}

impl DoctorHttpDirectory {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn save(
        &self,
        request: reqwest::RequestBuilder,
        draft: &DoctorDraft,
    ) -> Result<DoctorRecord, DoctorDirectoryError> {
        let body = self
            .api
            .send(request.json(&DoctorPayloadDto::from(draft)))
            .await
            .map_err(|failure| map_failure(failure, Call::Save))?;
        decode_doctor(&body).map_err(DoctorDirectoryError::decode)
    }
}

#[async_trait]
impl DoctorDirectory for DoctorHttpDirectory {
    async fn list(&self) -> Result<Vec<DoctorRecord>, DoctorDirectoryError> {
        let url = self.api.base_url().join([DOCTORS_SEGMENT]);
        let body = self
            .api
            .send(self.api.http().get(url))
            .await
            .map_err(|failure| map_failure(failure, Call::Fetch))?;
        decode_doctors(&body).map_err(DoctorDirectoryError::decode)
    }

    async fn create(&self, draft: &DoctorDraft) -> Result<DoctorRecord, DoctorDirectoryError> {
        let url = self.api.base_url().join([DOCTORS_SEGMENT]);
        self.save(self.api.http().post(url), draft).await
    }

    async fn update(
        &self,
        id: &DoctorId,
        draft: &DoctorDraft,
    ) -> Result<DoctorRecord, DoctorDirectoryError> {
        let url = self.api.base_url().join([DOCTORS_SEGMENT, id.as_ref()]);
        self.save(self.api.http().put(url), draft).await
    }

    async fn delete(&self, id: &DoctorId) -> Result<(), DoctorDirectoryError> {
        let url = self.api.base_url().join([DOCTORS_SEGMENT, id.as_ref()]);
        self.api
            .send(self.api.http().delete(url))
            .await
            .map(drop)
            .map_err(|failure| map_failure(failure, Call::Delete))
    }
}

fn map_failure(failure: HttpFailure, call: Call) -> DoctorDirectoryError {
    match failure {
        HttpFailure::Transport(message) => DoctorDirectoryError::transport(message),
        HttpFailure::Timeout(message) => DoctorDirectoryError::timeout(message),
        HttpFailure::Status { status, body } => {
            let message = match call {
                Call::Save => save_failure_message(status, &body),
                Call::Fetch | Call::Delete => http_failure_message(status),
            };
            DoctorDirectoryError::status(status.as_u16(), message)
        }
    }
}
