//! Doctor directory records, drafts, and field identifiers.
//!
//! A [`DoctorDraft`] is what the operator types into the form. It becomes a
//! [`DoctorRecord`] only once the collaborator has stored it and assigned a
//! [`DoctorId`]; drafts never carry an id.

use std::fmt;
use std::str::FromStr;

mod validation;


pub use validation::{MIN_CONTACT_DIGITS, ValidationErrors, validate};

/// Opaque identifier assigned by the collaborator when a record is created.
///
/// ## Invariants
/// - The identifier is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use medimanager::domain::DoctorId;
///
/// let id = DoctorId::new(" 42 ").expect("valid id");
/// assert_eq!(id.as_ref(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoctorId(String);

/// Error returned when constructing a [`DoctorId`] from blank input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDoctorIdError;

impl fmt::Display for EmptyDoctorIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("doctor id must not be empty")
    }
}

impl std::error::Error for EmptyDoctorIdError {}

impl DoctorId {
    /// Validate and wrap a collaborator-assigned identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmptyDoctorIdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptyDoctorIdError);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DoctorId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DoctorId {
    type Err = EmptyDoctorIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

/// Editable doctor fields, in form order.
///
/// The string form matches the collaborator's JSON field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DoctorField {
    /// `doctorName`: required.
    DoctorName,
    /// `contact`: at least ten digits once non-digits are removed.
    Contact,
    /// `address`: required.
    Address,
    /// `timing`: required free text such as `9-5`.
    Timing,
    /// `availableDays`: required free text such as `Mon-Fri`.
    AvailableDays,
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDoctorFieldError;

impl DoctorField {
    /// Every editable field, in form order.
    pub const ALL: [Self; 5] = [
        Self::DoctorName,
        Self::Contact,
        Self::Address,
        Self::Timing,
        Self::AvailableDays,
    ];

    /// Wire name used by the collaborator and in error maps.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DoctorName => "doctorName",
            Self::Contact => "contact",
            Self::Address => "address",
            Self::Timing => "timing",
            Self::AvailableDays => "availableDays",
        }
    }

    /// Message reported when the field is left blank.
    pub const fn required_message(self) -> &'static str {
        match self {
            Self::DoctorName => "Doctor name is required",
            Self::Contact => "Contact number is required",
            Self::Address => "Address is required",
            Self::Timing => "Timing is required",
            Self::AvailableDays => "Available days are required",
        }
    }
}

impl fmt::Display for DoctorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseDoctorFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid doctor field")
    }
}

impl std::error::Error for ParseDoctorFieldError {}

impl FromStr for DoctorField {
    type Err = ParseDoctorFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or(ParseDoctorFieldError)
    }
}

/// In-progress doctor details as typed by the operator.
///
/// Drafts may be invalid; run [`validate`] before sending one anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorDraft {
    /// Full display name.
    pub doctor_name: String,
    /// Phone number exactly as typed.
    pub contact: String,
    /// Practice address.
    pub address: String,
    /// Consultation hours.
    pub timing: String,
    /// Days the doctor sees patients.
    pub available_days: String,
}

impl DoctorDraft {
    /// Borrow the value held for `field`.
    pub fn field(&self, field: DoctorField) -> &str {
        match field {
            DoctorField::DoctorName => &self.doctor_name,
            DoctorField::Contact => &self.contact,
            DoctorField::Address => &self.address,
            DoctorField::Timing => &self.timing,
            DoctorField::AvailableDays => &self.available_days,
        }
    }

    /// Replace the value held for `field`.
    pub fn set_field(&mut self, field: DoctorField, value: impl Into<String>) {
        let slot = match field {
            DoctorField::DoctorName => &mut self.doctor_name,
            DoctorField::Contact => &mut self.contact,
            DoctorField::Address => &mut self.address,
            DoctorField::Timing => &mut self.timing,
            DoctorField::AvailableDays => &mut self.available_days,
        };
        *slot = value.into();
    }

    /// Return `true` when every field is empty.
    pub fn is_blank(&self) -> bool {
        DoctorField::ALL
            .into_iter()
            .all(|field| self.field(field).is_empty())
    }
}

/// A doctor persisted by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorRecord {
    id: DoctorId,
    details: DoctorDraft,
}

impl DoctorRecord {
    /// Pair collaborator-assigned identity with stored details.
    pub fn new(id: DoctorId, details: DoctorDraft) -> Self {
        Self { id, details }
    }

    /// Collaborator-assigned identifier.
    pub fn id(&self) -> &DoctorId {
        &self.id
    }

    /// Editable details as last stored.
    pub fn details(&self) -> &DoctorDraft {
        &self.details
    }

    /// Convenience accessor for display and notices.
    pub fn doctor_name(&self) -> &str {
        self.details.doctor_name.as_str()
    }
}
