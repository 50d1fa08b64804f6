//! Command-line adapter.
//!
//! ```text
//! medimanager [--api-url URL] [--operator NAME] [--offline] [--offline-store PATH] <command>
//! ```
//!
//! [`Cli`] parses arguments with clap; [`CommandRunner`] drives the
//! [`DoctorDirectoryService`](crate::domain::DoctorDirectoryService) and
//! writes human-readable output.

mod args;
mod runner;
mod table;

pub use args::{Cli, Command, DoctorFieldArgs};
pub use runner::{CliError, CommandRunner, CommandStatus};
