//! REST outbound adapters.
//!
//! Thin reqwest implementations of the `DoctorDirectory` and `LoginService`
//! ports sharing one [`ApiClient`].

mod client;
mod doctor_directory;
mod dto;
mod login;
#[cfg(test)]
mod test_utils;

pub use client::{ApiBaseUrl, ApiBaseUrlError, ApiClient};
pub use doctor_directory::DoctorHttpDirectory;
pub use login::HttpLoginService;
