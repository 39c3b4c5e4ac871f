use crate::{error::CliError, shutdown::ExitCode};
use admin_api::AppState;
use clap::Parser;
use commands::Commands;
use engine_config::settings::{DEFAULT_LOG_LEVEL, Settings};
use engine_runtime::engine::SyncEngine;
use model::execution::report::RunStatus;
use shutdown::ShutdownCoordinator;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "tender-sync",
    version,
    about = "Keeps a Solr tender index in sync with the Mercado Público catalog"
)]
struct Cli {
    #[arg(long, global = true, help = "Path to a .env file (defaults to ./.env)")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let settings = Settings::load(cli.env_file.as_deref());

    let level = settings
        .as_ref()
        .map(|s| s.log_level.as_str())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    init_tracing(level);

    let code = match settings {
        Ok(settings) => match run(cli.command, settings).await {
            Ok(code) => code,
            Err(e) => {
                error!(error = %e, "Command failed");
                ExitCode::GeneralError
            }
        },
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(command: Commands, settings: Settings) -> Result<ExitCode, CliError> {
    let engine = SyncEngine::from_settings(&settings).await?;

    match command {
        Commands::Serve => {
            let coordinator = ShutdownCoordinator::new(CancellationToken::new());
            coordinator.register_handlers();

            admin_api::run_server(
                settings.bind_addr,
                AppState::new(engine),
                coordinator.cancel_token(),
            )
            .await?;
            Ok(ExitCode::Success)
        }
        Commands::Sync { category } => {
            let stats = engine.sync_category(category).await;
            output::print_json(&stats)?;
            Ok(if stats.is_error() {
                ExitCode::RunFailed
            } else {
                ExitCode::Success
            })
        }
        Commands::Run { output } => {
            let report = engine.run_sequence().await?;
            match output {
                Some(path) => {
                    output::write_json(&report, &path).await?;
                    info!(path = %path, "Run report written");
                }
                None => output::print_json(&report)?,
            }
            Ok(match report.status {
                RunStatus::Error => ExitCode::RunFailed,
                RunStatus::Ok | RunStatus::PartialError => ExitCode::Success,
            })
        }
        Commands::Lookup { id } => match engine.lookup(&id).await? {
            Some(state) => {
                output::print_json(&state)?;
                Ok(ExitCode::Success)
            }
            None => {
                warn!(id = %id, "Tender is not indexed");
                Ok(ExitCode::RunFailed)
            }
        },
    }
}
