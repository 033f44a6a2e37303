use clap::Parser as _;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use watchtower::cli::{Cli, Commands, RunCmd};
use watchtower::core::config::Config;
use watchtower::types::params::OTELConfig;
use watchtower::utils::instrument::WatchtowerInstrumentation;
use watchtower::utils::logging::init_logging;
use watchtower::utils::signal_handler::SignalHandler;
use watchtower::worker::TaskController;
use watchtower::WatchtowerResult;

/// Start the watchtower
#[tokio::main]
async fn main() {
    dotenv().ok();
    if let Err(e) = init_logging() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Failed to initialize logging: {:?}", e);
        }
        std::process::exit(1);
    }
    info!("Starting watchtower");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => match run_watchtower(run_command).await {
            Ok(_) => {
                info!("Watchtower stopped");
            }
            Err(e) => {
                error!(
                    error = %e,
                    error_chain = ?e,
                    "Watchtower service failed"
                );
                std::process::exit(1);
            }
        },
    }
}

async fn run_watchtower(run_cmd: &RunCmd) -> WatchtowerResult<()> {
    let otel_config = OTELConfig::try_from(run_cmd.instrumentation_args.clone())?;
    let instrumentation = WatchtowerInstrumentation::new(&otel_config)?;

    let config = Arc::new(Config::from_run_cmd(run_cmd)?);
    debug!(node_address = %config.node_address(), "Configuration initialized");

    let shutdown_token = CancellationToken::new();
    let controller = TaskController::new(config.clone(), shutdown_token.clone());
    let controller_handle = tokio::spawn(controller.run());

    let mut signal_handler = SignalHandler::new();
    signal_handler.wait_for_shutdown().await?;
    shutdown_token.cancel();

    signal_handler
        .handle_graceful_shutdown(
            || async move {
                controller_handle.await.map_err(|e| anyhow::anyhow!("Task controller panicked: {}", e))
            },
            config.service_params().shutdown_timeout_seconds,
        )
        .await?;

    instrumentation.shutdown()?;
    info!("Watchtower service shutting down");
    Ok(())
}
