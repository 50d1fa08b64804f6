//! Doctor form state: the draft, its field errors, and the edit mode.

use super::doctor::{DoctorDraft, DoctorField, DoctorId, DoctorRecord, ValidationErrors, validate};

/// Whether a submit creates a new record or overwrites an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// Submitting stores a new record.
    #[default]
    Create,
    /// Submitting overwrites the record with this id.
    Edit(DoctorId),
}

impl Mode {
    /// Id of the record being edited, if any.
    pub fn editing(&self) -> Option<&DoctorId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }
}

/// Form state for adding or editing a doctor.
///
/// # Examples
/// ```
/// use medimanager::domain::{DoctorField, FormState, Mode};
///
/// let mut form = FormState::default();
/// form.update_field(DoctorField::DoctorName, "Dr. Lee");
/// assert_eq!(form.draft().doctor_name, "Dr. Lee");
/// assert_eq!(form.mode(), &Mode::Create);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: DoctorDraft,
    errors: ValidationErrors,
    mode: Mode,
}

impl FormState {
    /// Current draft.
    pub fn draft(&self) -> &DoctorDraft {
        &self.draft
    }

    /// Errors from the last validation, minus fields edited since.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Current edit mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Set one field and drop that field's stale error.
    pub fn update_field(&mut self, field: DoctorField, value: impl Into<String>) {
        self.draft.set_field(field, value);
        self.errors.clear_field(field);
    }

    /// Replace the draft with `record`'s details and enter edit mode.
    pub fn load_for_edit(&mut self, record: &DoctorRecord) {
        self.draft = record.details().clone();
        self.errors = ValidationErrors::default();
        self.mode = Mode::Edit(record.id().clone());
    }

    /// Validate the draft, keeping the result for display.
    ///
    /// Returns `true` when the draft is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.draft);
        self.errors.is_empty()
    }

    /// Clear the draft and every error. The mode is left alone.
    pub fn reset(&mut self) {
        self.draft = DoctorDraft::default();
        self.errors = ValidationErrors::default();
    }

    /// Reset and leave edit mode.
    pub fn cancel(&mut self) {
        self.reset();
        self.mode = Mode::Create;
    }
}
