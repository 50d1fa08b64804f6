//! Domain types, services, and ports for the doctor directory.
//!
//! Public surface:
//! - [`DoctorDraft`], [`DoctorRecord`], [`DoctorId`], [`DoctorField`]: the
//!   record model.
//! - [`validate`] and [`ValidationErrors`]: pure draft validation.
//! - [`FormState`] and [`Mode`]: the add/edit form.
//! - [`DeletionFlow`]: the delete confirmation gate.
//! - [`DoctorDirectoryService`]: the record store proxy.
//! - [`ports`]: traits implemented by outbound adapters.

pub mod auth;
pub mod deletion;
pub mod directory_service;
pub mod doctor;
pub mod form;
pub mod notice;
pub mod ports;

pub use self::auth::{LoginCredentials, LoginValidationError, OperatorName};
pub use self::deletion::DeletionFlow;
pub use self::directory_service::{
    DoctorDirectoryService, SubmitError, SubmitOutcome, UnknownDoctorError,
};
pub use self::doctor::{
    DoctorDraft, DoctorField, DoctorId, DoctorRecord, EmptyDoctorIdError, MIN_CONTACT_DIGITS,
    ParseDoctorFieldError, ValidationErrors, validate,
};
pub use self::form::{FormState, Mode};
pub use self::notice::Notice;
