//! Doctor directory service: the record store proxy behind the form.
//!
//! The service keeps the local doctor list, the form, and the deletion
//! prompt in step with the collaborator. Every mutator takes `&mut self`, so
//! one instance never has two writes in flight. Failed collaborator calls
//! leave local state exactly as it was; nothing is retried.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{DoctorDirectory, DoctorDirectoryError};
use crate::domain::{DeletionFlow, DoctorId, DoctorRecord, FormState, Mode, ValidationErrors};

/// Errors returned by [`DoctorDirectoryService::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The draft failed local validation; nothing was sent.
    #[error("doctor form is invalid: {0}")]
    Validation(ValidationErrors),
    /// The collaborator rejected or never answered the write.
    #[error(transparent)]
    Collaborator(#[from] DoctorDirectoryError),
}

/// The referenced doctor is not in the local list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no doctor with id {id} in the directory")]
pub struct UnknownDoctorError {
    /// Id that failed to resolve.
    pub id: DoctorId,
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was stored.
    Created(DoctorRecord),
    /// An existing record was overwritten.
    Updated(DoctorRecord),
}

impl SubmitOutcome {
    /// Record as returned by the collaborator.
    pub fn record(&self) -> &DoctorRecord {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// Record store proxy owning the local list, form, and deletion prompt.
pub struct DoctorDirectoryService<D> {
    directory: Arc<D>,
    doctors: Vec<DoctorRecord>,
    form: FormState,
    deletion: DeletionFlow,
}

impl<D> DoctorDirectoryService<D> {
    /// Create a service with an empty local list.
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            doctors: Vec::new(),
            form: FormState::default(),
            deletion: DeletionFlow::default(),
        }
    }

    /// Doctors as last reconciled with the collaborator.
    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    /// Look up a doctor in the local list.
    pub fn find(&self, id: &DoctorId) -> Option<&DoctorRecord> {
        self.doctors.iter().find(|doctor| doctor.id() == id)
    }

    /// Current form state.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable form access for field edits, reset, and cancel.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Current deletion prompt.
    pub fn deletion(&self) -> &DeletionFlow {
        &self.deletion
    }

    /// Load the doctor with `id` into the form for editing.
    pub fn begin_edit(&mut self, id: &DoctorId) -> Result<(), UnknownDoctorError> {
        let record = self.lookup(id)?.clone();
        self.form.load_for_edit(&record);
        Ok(())
    }

    /// Open the confirmation prompt for the doctor with `id`.
    pub fn request_delete(&mut self, id: &DoctorId) -> Result<(), UnknownDoctorError> {
        let record = self.lookup(id)?.clone();
        self.deletion.request(record);
        Ok(())
    }

    /// Dismiss the confirmation prompt.
    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }

    fn lookup(&self, id: &DoctorId) -> Result<&DoctorRecord, UnknownDoctorError> {
        self.find(id)
            .ok_or_else(|| UnknownDoctorError { id: id.clone() })
    }

    fn merge(&mut self, record: DoctorRecord) {
        match self
            .doctors
            .iter_mut()
            .find(|doctor| doctor.id() == record.id())
        {
            Some(existing) => *existing = record,
            None => self.doctors.push(record),
        }
    }
}

impl<D> DoctorDirectoryService<D>
where
    D: DoctorDirectory,
{
    /// Replace the local list with the collaborator's.
    ///
    /// On failure the local list is left untouched.
    pub async fn refresh(&mut self) -> Result<(), DoctorDirectoryError> {
        match self.directory.list().await {
            Ok(doctors) => {
                self.doctors = doctors;
                Ok(())
            }
            Err(error) => {
                warn!(error_kind = error.kind(), %error, "failed to fetch doctors");
                Err(error)
            }
        }
    }

    /// Validate the form and store it.
    ///
    /// Creates in [`Mode::Create`] and updates in [`Mode::Edit`]. On success
    /// the list is refreshed, the form resets, and the mode returns to
    /// create. When the write lands but the refresh fails, the returned
    /// record is merged into the local list instead.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        if !self.form.validate() {
            return Err(SubmitError::Validation(self.form.errors().clone()));
        }

        let draft = self.form.draft().clone();
        let outcome = match self.form.mode() {
            Mode::Create => self
                .directory
                .create(&draft)
                .await
                .map(SubmitOutcome::Created),
            Mode::Edit(id) => self
                .directory
                .update(id, &draft)
                .await
                .map(SubmitOutcome::Updated),
        }
        .map_err(|error| {
            warn!(error_kind = error.kind(), %error, "failed to save doctor");
            error
        })?;

        info!(doctor_id = %outcome.record().id(), "doctor saved");
        if self.refresh().await.is_err() {
            self.merge(outcome.record().clone());
        }
        self.form.cancel();
        Ok(outcome)
    }

    /// Delete the doctor with `id`.
    ///
    /// On success the record leaves the local list, and an edit session on
    /// the same record is cancelled.
    pub async fn remove(&mut self, id: &DoctorId) -> Result<(), DoctorDirectoryError> {
        self.directory.delete(id).await.map_err(|error| {
            warn!(doctor_id = %id, error_kind = error.kind(), %error, "failed to delete doctor");
            error
        })?;

        info!(doctor_id = %id, "doctor deleted");
        self.doctors.retain(|doctor| doctor.id() != id);
        if self.form.mode().editing() == Some(id) {
            self.form.cancel();
        }
        Ok(())
    }

    /// Accept the confirmation prompt and delete the pending doctor.
    ///
    /// The prompt closes whether or not the delete succeeds. Returns the
    /// deleted record, or `None` when no prompt was open.
    pub async fn confirm_delete(&mut self) -> Result<Option<DoctorRecord>, DoctorDirectoryError> {
        let Some(record) = self.deletion.confirm() else {
            return Ok(None);
        };
        self.remove(record.id()).await?;
        Ok(Some(record))
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
