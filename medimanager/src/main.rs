//! Composition root: installs error reporting and logging, loads settings,
//! wires adapters into the directory service and runs one command.

use std::env;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use medimanager::config::ClientSettings;
use medimanager::domain::OperatorName;
use medimanager::domain::ports::{DoctorDirectory, LoginService};
use medimanager::inbound::cli::{Cli, Command, CommandRunner, CommandStatus};
use medimanager::outbound::http::{ApiBaseUrl, ApiClient, DoctorHttpDirectory, HttpLoginService};
use medimanager::outbound::json_file::JsonFileDoctorDirectory;
use medimanager::outbound::memory::FixtureLoginService;

const LOG_FORMAT_VAR: &str = "MEDIMANAGER_LOG_FORMAT";

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("medimanager")])
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    let status = runtime.block_on(async_main(cli, settings))?;

    Ok(match status {
        CommandStatus::Succeeded => ExitCode::SUCCESS,
        CommandStatus::Failed => ExitCode::FAILURE,
    })
}

fn init_tracing() {
    let pretty = env::var(LOG_FORMAT_VAR).is_ok_and(|format| format.eq_ignore_ascii_case("pretty"));
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if pretty {
        builder.try_init()
    } else {
        builder.json().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn async_main(cli: Cli, settings: ClientSettings) -> Result<CommandStatus> {
    let operator = cli
        .operator
        .as_deref()
        .map_or_else(|| settings.operator(), |name| OperatorName::from_setting(Some(name)));

    if cli.offline || settings.offline {
        let path = cli
            .offline_store
            .unwrap_or_else(|| settings.offline_store().to_path_buf());
        info!(path = %path.display(), "running against the offline store");
        let directory = JsonFileDoctorDirectory::open(&path)
            .await
            .wrap_err_with(|| format!("failed to open offline store {}", path.display()))?;
        let login = Arc::new(FixtureLoginService);
        return execute(Arc::new(directory), login, operator, cli.command).await;
    }

    let raw_url = cli.api_url.as_deref().unwrap_or(settings.api_base_url());
    let base_url = ApiBaseUrl::parse(raw_url)
        .wrap_err_with(|| format!("invalid API base URL {raw_url:?}"))?;
    let api = ApiClient::new(base_url, settings.request_timeout())
        .wrap_err("failed to build HTTP client")?;
    let directory = Arc::new(DoctorHttpDirectory::new(api.clone()));
    execute(directory, Arc::new(HttpLoginService::new(api)), operator, cli.command).await
}

async fn execute<D>(
    directory: Arc<D>,
    login: Arc<dyn LoginService>,
    operator: OperatorName,
    command: Command,
) -> Result<CommandStatus>
where
    D: DoctorDirectory,
{
    let mut runner = CommandRunner::new(directory, login, operator);
    let stdout = io::stdout();
    let stdin = io::stdin();
    runner
        .run(command, &mut stdout.lock(), &mut stdin.lock())
        .await
        .wrap_err("command failed")
}
