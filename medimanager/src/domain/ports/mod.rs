//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod doctor_directory;
mod login_service;

#[cfg(test)]
pub use doctor_directory::MockDoctorDirectory;
pub use doctor_directory::{DoctorDirectory, DoctorDirectoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginError, LoginService, LoginSession};
