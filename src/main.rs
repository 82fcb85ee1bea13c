use clap::Parser;
use dotenv::dotenv;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use taskboard::cli::{self, Cli, RunOutcome};
use taskboard::config::Config;
use taskboard::controller::Board;
use taskboard::log;
use taskboard::remote::HttpTaskApi;
use taskboard::session::{SessionGate, StaticSession};
use taskboard::store::TaskListStore;
use taskboard::view;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("taskboard: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    }
    .with_overrides(cli.api_url.clone(), cli.user.clone());

    let env_filter = EnvFilter::try_from_env(log::LOG_ENV);
    if let Err(err) = log::setup(env_filter, config.log.as_ref()) {
        eprintln!("taskboard: unable to set up logging: {}", err);
    }
    info!("Starting taskboard: {}", env!("FULL_VERSION"));

    let api_url = match config.api_url() {
        Ok(url) => url,
        Err(err) => {
            error!(reason = %err, "Invalid configuration.");
            eprintln!("taskboard: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let gate = SessionGate::authenticate(StaticSession::new(config.session()));
    let mut board = Board::new(gate, TaskListStore::new(HttpTaskApi::new(api_url)));
    let mut stdout = std::io::stdout();

    match cli::run(
        cli.command,
        &mut board,
        config.signin_url(),
        view::today(),
        &mut stdout,
    )
    .await
    {
        Ok(RunOutcome::Done) => ExitCode::SUCCESS,
        Ok(RunOutcome::Failed) => ExitCode::FAILURE,
        Ok(RunOutcome::SignInRequired) => ExitCode::from(2),
        Err(err) => {
            error!(reason = %err, "Command failed.");
            eprintln!("taskboard: {}", err);
            ExitCode::FAILURE
        }
    }
}
