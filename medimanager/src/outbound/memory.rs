//! In-process adapters for offline runs and tests.
//!
//! [`InMemoryDoctorDirectory`] behaves like the REST collaborator: it assigns
//! sequential ids on create and answers 404 for unknown ids. The offline
//! file store wraps it.
//! [`FixtureLoginService`] accepts the backend's development account.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    DoctorDirectory, DoctorDirectoryError, LoginError, LoginService, LoginSession,
};
use crate::domain::{DoctorDraft, DoctorId, DoctorRecord, LoginCredentials};

const NOT_FOUND_STATUS: u16 = 404;

#[derive(Debug, Default)]
struct DirectoryState {
    last_id: u64,
    records: Vec<DoctorRecord>,
}

/// Doctor directory held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryDoctorDirectory {
    state: Mutex<DirectoryState>,
}

impl InMemoryDoctorDirectory {
    /// Start with `records` already stored; new ids continue after the
    /// largest numeric id present.
    pub fn with_records(records: Vec<DoctorRecord>) -> Self {
        Self::restore(0, records)
    }

    /// Restore a saved directory whose ids were issued up to `last_id`.
    pub(super) fn restore(last_id: u64, records: Vec<DoctorRecord>) -> Self {
        let highest = records
            .iter()
            .filter_map(|record| record.id().as_ref().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(DirectoryState {
                last_id: last_id.max(highest),
                records,
            }),
        }
    }

    /// Last issued id and the stored records, for writing back to disk.
    pub(super) fn snapshot(&self) -> Result<(u64, Vec<DoctorRecord>), DoctorDirectoryError> {
        let state = self.lock()?;
        Ok((state.last_id, state.records.clone()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, DirectoryState>, DoctorDirectoryError> {
        self.state
            .lock()
            .map_err(|_| DoctorDirectoryError::transport("in-memory directory lock poisoned"))
    }
}

fn not_found(id: &DoctorId) -> DoctorDirectoryError {
    DoctorDirectoryError::status(NOT_FOUND_STATUS, format!("Doctor not found with id {id}"))
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn list(&self) -> Result<Vec<DoctorRecord>, DoctorDirectoryError> {
        Ok(self.lock()?.records.clone())
    }

    async fn create(&self, draft: &DoctorDraft) -> Result<DoctorRecord, DoctorDirectoryError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = DoctorId::new(state.last_id.to_string())
            .map_err(|err| DoctorDirectoryError::decode(err.to_string()))?;
        let record = DoctorRecord::new(id, draft.clone());
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &DoctorId,
        draft: &DoctorDraft,
    ) -> Result<DoctorRecord, DoctorDirectoryError> {
        let mut state = self.lock()?;
        let slot = state
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found(id))?;
        *slot = DoctorRecord::new(id.clone(), draft.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &DoctorId) -> Result<(), DoctorDirectoryError> {
        let mut state = self.lock()?;
        let before = state.records.len();
        state.records.retain(|record| record.id() != id);
        if state.records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Login double accepting only the backend's development account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, LoginError> {
        if credentials.username() == "subhajit" && credentials.password() == "subhajit" {
            Ok(LoginSession {
                username: credentials.username().to_owned(),
                message: "Login successful".to_owned(),
            })
        } else {
            Err(LoginError::rejected("Invalid credentials"))
        }
    }
}
