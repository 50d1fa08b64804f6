//! Field validation for doctor drafts.

use std::collections::BTreeMap;
use std::fmt;

use super::{DoctorDraft, DoctorField};

/// Minimum digits a contact number must contain once punctuation is stripped.
pub const MIN_CONTACT_DIGITS: usize = 10;

const INVALID_CONTACT_MESSAGE: &str = "Please enter a valid phone number (at least 10 digits)";

/// Per-field validation messages for a draft.
///
/// An empty set means the draft is valid. Entries iterate in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<DoctorField, String>);

impl ValidationErrors {
    /// Return `true` when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: DoctorField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Iterate `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (DoctorField, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub(crate) fn insert(&mut self, field: DoctorField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub(crate) fn clear_field(&mut self, field: DoctorField) {
        self.0.remove(&field);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate every field of `draft`, collecting all failures.
///
/// The required check and the contact format check are independent: a
/// non-blank contact with too few digits reports only the format message.
///
/// # Examples
/// ```
/// use medimanager::domain::{DoctorDraft, DoctorField, validate};
///
/// let draft = DoctorDraft {
///     contact: "555-1234".to_owned(),
///     ..DoctorDraft::default()
/// };
/// let errors = validate(&draft);
/// assert_eq!(errors.len(), 5);
/// assert_eq!(
///     errors.get(DoctorField::Contact),
///     Some("Please enter a valid phone number (at least 10 digits)"),
/// );
/// ```
pub fn validate(draft: &DoctorDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    for field in DoctorField::ALL {
        if draft.field(field).trim().is_empty() {
            errors.insert(field, field.required_message());
        }
    }

    let contact = draft.contact.trim();
    if !contact.is_empty() && contact_digit_count(contact) < MIN_CONTACT_DIGITS {
        errors.insert(DoctorField::Contact, INVALID_CONTACT_MESSAGE);
    }

    errors
}

fn contact_digit_count(contact: &str) -> usize {
    contact.chars().filter(char::is_ascii_digit).count()
}
