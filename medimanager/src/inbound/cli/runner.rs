//! Executes one parsed [`Command`] against the directory service.
//!
//! Operator-facing outcomes (field errors, notices) are written to `out`
//! and reported through [`CommandStatus`]. Only failures that stop the
//! command from running at all surface as [`CliError`].

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::args::{Command, DoctorFieldArgs};
use super::table::write_doctors;
use crate::domain::ports::{DoctorDirectory, DoctorDirectoryError, LoginService};
use crate::domain::{
    DoctorDirectoryService, DoctorId, LoginCredentials, LoginValidationError, Notice, OperatorName,
    SubmitError, UnknownDoctorError,
};

/// Whether the command achieved what the operator asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command did what was asked, including a declined deletion.
    Succeeded,
    /// The operator was shown field errors or a failure notice.
    Failed,
}

/// Failures that prevent a command from running.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing output or reading a prompt answer failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The directory could not be loaded before acting on it.
    #[error("failed to fetch doctors: {0}")]
    Fetch(#[from] DoctorDirectoryError),
    /// The id given on the command line is not in the directory.
    #[error(transparent)]
    UnknownDoctor(#[from] UnknownDoctorError),
    /// Login input was rejected before contacting the backend.
    #[error(transparent)]
    Credentials(#[from] LoginValidationError),
}

/// Drives the doctor directory service from command-line input.
pub struct CommandRunner<D> {
    service: DoctorDirectoryService<D>,
    login: Arc<dyn LoginService>,
    operator: OperatorName,
}

impl<D> CommandRunner<D>
where
    D: DoctorDirectory,
{
    /// Build a runner over `directory` and `login` for `operator`.
    pub fn new(directory: Arc<D>, login: Arc<dyn LoginService>, operator: OperatorName) -> Self {
        Self {
            service: DoctorDirectoryService::new(directory),
            login,
            operator,
        }
    }

    /// The service state after the last command.
    pub fn service(&self) -> &DoctorDirectoryService<D> {
        &self.service
    }

    /// Run `command`, reading any confirmation from `input`.
    pub async fn run<W, R>(
        &mut self,
        command: Command,
        out: &mut W,
        input: &mut R,
    ) -> Result<CommandStatus, CliError>
    where
        W: Write,
        R: BufRead,
    {
        match command {
            Command::List => self.list(out).await,
            Command::Add(fields) => self.add(&fields, out).await,
            Command::Edit { id, fields } => self.edit(&id, &fields, out).await,
            Command::Delete { id, yes } => self.delete(&id, yes, out, input).await,
            Command::Login { username } => self.sign_in(&username, out, input).await,
        }
    }

    async fn list<W: Write>(&mut self, out: &mut W) -> Result<CommandStatus, CliError> {
        self.service.refresh().await?;
        writeln!(out, "MediManager | Operator: {}", self.operator)?;
        writeln!(out)?;
        write_doctors(out, self.service.doctors())?;
        Ok(CommandStatus::Succeeded)
    }

    async fn add<W: Write>(
        &mut self,
        fields: &DoctorFieldArgs,
        out: &mut W,
    ) -> Result<CommandStatus, CliError> {
        self.service.form_mut().cancel();
        self.apply(fields);
        self.submit(out).await
    }

    async fn edit<W: Write>(
        &mut self,
        id: &DoctorId,
        fields: &DoctorFieldArgs,
        out: &mut W,
    ) -> Result<CommandStatus, CliError> {
        self.service.refresh().await?;
        self.service.begin_edit(id)?;
        self.apply(fields);
        self.submit(out).await
    }

    async fn delete<W, R>(
        &mut self,
        id: &DoctorId,
        skip_prompt: bool,
        out: &mut W,
        input: &mut R,
    ) -> Result<CommandStatus, CliError>
    where
        W: Write,
        R: BufRead,
    {
        self.service.refresh().await?;
        self.service.request_delete(id)?;

        if !skip_prompt && !confirmed(self.pending_name(), out, input)? {
            self.service.cancel_delete();
            writeln!(out, "Deletion cancelled.")?;
            return Ok(CommandStatus::Succeeded);
        }

        match self.service.confirm_delete().await {
            Ok(Some(record)) => {
                let notice = Notice::Deleted {
                    doctor_name: record.doctor_name().to_owned(),
                };
                writeln!(out, "{notice}")?;
                Ok(CommandStatus::Succeeded)
            }
            Ok(None) => Ok(CommandStatus::Succeeded),
            Err(error) => {
                writeln!(out, "{}", Notice::delete_failed(&error))?;
                Ok(CommandStatus::Failed)
            }
        }
    }

    async fn sign_in<W, R>(
        &self,
        username: &str,
        out: &mut W,
        input: &mut R,
    ) -> Result<CommandStatus, CliError>
    where
        W: Write,
        R: BufRead,
    {
        write!(out, "Password: ")?;
        out.flush()?;
        let mut line = Zeroizing::new(String::with_capacity(128));
        input.read_line(&mut line)?;
        writeln!(out)?;
        let credentials = LoginCredentials::from_password_line(username, line)?;
        match self.login.login(&credentials).await {
            Ok(session) => {
                info!(username = %session.username, "operator signed in");
                writeln!(
                    out,
                    "Signed in as {}: {}",
                    session.username, session.message
                )?;
                Ok(CommandStatus::Succeeded)
            }
            Err(error) => {
                warn!(error_kind = error.kind(), %error, "login failed");
                writeln!(out, "{}", Notice::login_failed(&error))?;
                Ok(CommandStatus::Failed)
            }
        }
    }

    fn apply(&mut self, fields: &DoctorFieldArgs) {
        let form = self.service.form_mut();
        for (field, value) in fields.provided() {
            form.update_field(field, value);
        }
    }

    fn pending_name(&self) -> &str {
        self.service
            .deletion()
            .pending()
            .map_or("", |record| record.doctor_name())
    }

    async fn submit<W: Write>(&mut self, out: &mut W) -> Result<CommandStatus, CliError> {
        match self.service.submit().await {
            Ok(outcome) => {
                let notice = Notice::Saved {
                    doctor_name: outcome.record().doctor_name().to_owned(),
                };
                writeln!(out, "{notice}")?;
                Ok(CommandStatus::Succeeded)
            }
            Err(SubmitError::Validation(errors)) => {
                for (field, message) in errors.iter() {
                    writeln!(out, "{field}: {message}")?;
                }
                Ok(CommandStatus::Failed)
            }
            Err(SubmitError::Collaborator(error)) => {
                writeln!(out, "{}", Notice::save_failed(&error))?;
                Ok(CommandStatus::Failed)
            }
        }
    }
}

fn confirmed<W, R>(doctor_name: &str, out: &mut W, input: &mut R) -> io::Result<bool>
where
    W: Write,
    R: BufRead,
{
    write!(
        out,
        "Are you sure you want to delete doctor {doctor_name}? [y/N] "
    )?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
