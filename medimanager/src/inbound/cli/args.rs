//! Argument definitions for the `medimanager` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DoctorField, DoctorId};

/// `medimanager` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "medimanager",
    about = "Manage the clinic's doctor directory from the terminal",
    version
)]
pub struct Cli {
    /// Clinic API base URL. Overrides `MEDIMANAGER_API_BASE_URL`.
    #[arg(long = "api-url", value_name = "url", global = true)]
    pub api_url: Option<String>,
    /// Operator name shown in the header. Overrides `MEDIMANAGER_OPERATOR`.
    #[arg(long, value_name = "name", global = true)]
    pub operator: Option<String>,
    /// Keep doctors in a local JSON file instead of calling the API.
    #[arg(long, global = true)]
    pub offline: bool,
    /// File used by `--offline`. Overrides `MEDIMANAGER_OFFLINE_STORE`.
    #[arg(long = "offline-store", value_name = "path", global = true)]
    pub offline_store: Option<PathBuf>,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations on the doctor directory.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every doctor in the directory.
    List,
    /// Add a new doctor.
    Add(DoctorFieldArgs),
    /// Edit an existing doctor; only the given fields change.
    Edit {
        /// Id of the doctor to edit.
        id: DoctorId,
        #[command(flatten)]
        fields: DoctorFieldArgs,
    },
    /// Delete a doctor after confirmation.
    Delete {
        /// Id of the doctor to delete.
        id: DoctorId,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Check operator credentials against the API.
    ///
    /// The password is read from standard input after a prompt.
    Login {
        /// Account to sign in as.
        #[arg(long)]
        username: String,
    },
}

/// Doctor fields accepted by `add` and `edit`.
#[derive(Debug, Clone, Default, Args)]
pub struct DoctorFieldArgs {
    /// Doctor's full name.
    #[arg(long, value_name = "text")]
    pub name: Option<String>,
    /// Contact phone number; at least ten digits.
    #[arg(long, value_name = "phone")]
    pub contact: Option<String>,
    /// Practice address.
    #[arg(long, value_name = "text")]
    pub address: Option<String>,
    /// Consultation hours, e.g. `9-5`.
    #[arg(long, value_name = "text")]
    pub timing: Option<String>,
    /// Available days, e.g. `Mon-Fri`.
    #[arg(long, value_name = "text")]
    pub days: Option<String>,
}

impl DoctorFieldArgs {
    /// Fields given on the command line, paired with their form field.
    pub fn provided(&self) -> impl Iterator<Item = (DoctorField, &str)> {
        [
            (DoctorField::DoctorName, &self.name),
            (DoctorField::Contact, &self.contact),
            (DoctorField::Address, &self.address),
            (DoctorField::Timing, &self.timing),
            (DoctorField::AvailableDays, &self.days),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|text| (field, text)))
    }
}
