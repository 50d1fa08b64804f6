//! Driven port for the collaborator that owns doctor persistence.
//!
//! The domain owns the request and response shapes; adapters only translate
//! them to and from a transport.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{DoctorDraft, DoctorId, DoctorRecord};

define_port_error! {
    /// Failures reported by the doctor directory collaborator.
    pub enum DoctorDirectoryError {
        /// The request never produced a response.
        Transport { message: String } =>
            "doctor directory unreachable: {message}",
        /// The collaborator did not answer within the client timeout.
        Timeout { message: String } =>
            "doctor directory timed out: {message}",
        /// The collaborator answered with a non-success status.
        Status { status: u16, message: String } =>
            "{message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "doctor directory response malformed: {message}",
    }
}

/// Port for listing and mutating doctor records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// Fetch every stored record.
    async fn list(&self) -> Result<Vec<DoctorRecord>, DoctorDirectoryError>;

    /// Store a new record; the collaborator assigns its id.
    async fn create(&self, draft: &DoctorDraft) -> Result<DoctorRecord, DoctorDirectoryError>;

    /// Overwrite the record with `id`.
    async fn update(
        &self,
        id: &DoctorId,
        draft: &DoctorDraft,
    ) -> Result<DoctorRecord, DoctorDirectoryError>;

    /// Delete the record with `id`.
    async fn delete(&self, id: &DoctorId) -> Result<(), DoctorDirectoryError>;
}
