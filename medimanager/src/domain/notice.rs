//! One-shot operator notifications.

use std::fmt;

use crate::domain::ports::{DoctorDirectoryError, LoginError};

/// A message shown once to the operator after an action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A doctor was stored.
    Saved { doctor_name: String },
    /// A doctor was deleted.
    Deleted { doctor_name: String },
    /// Storing a doctor failed.
    SaveFailed { reason: String },
    /// Deleting a doctor failed.
    DeleteFailed { reason: String },
    /// The backend refused or never answered a login.
    LoginFailed,
}

impl Notice {
    /// Notice for a collaborator failure during submit.
    pub fn save_failed(error: &DoctorDirectoryError) -> Self {
        Self::SaveFailed {
            reason: error.to_string(),
        }
    }

    /// Notice for a collaborator failure during delete.
    pub fn delete_failed(error: &DoctorDirectoryError) -> Self {
        Self::DeleteFailed {
            reason: error.to_string(),
        }
    }

    /// Notice for any login failure; the cause is only logged.
    pub fn login_failed(_error: &LoginError) -> Self {
        Self::LoginFailed
    }

    /// Return `true` for notices reporting a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::SaveFailed { .. } | Self::DeleteFailed { .. } | Self::LoginFailed
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { doctor_name } => write!(f, "Doctor {doctor_name} saved successfully!"),
            Self::Deleted { doctor_name } => {
                write!(f, "Doctor {doctor_name} deleted successfully!")
            }
            Self::SaveFailed { reason } => write!(f, "Failed to save doctor: {reason}"),
            Self::DeleteFailed { reason } => write!(f, "Failed to delete doctor: {reason}"),
            Self::LoginFailed => f.write_str("Login failed. Check username/password."),
        }
    }
}
