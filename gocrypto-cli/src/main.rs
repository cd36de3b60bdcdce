//! gocrypto-cli: run a single GoCrypto capture from the command line.
//!
//! Loads gateway configuration from a TOML file, captures the given order
//! total and prints the outcome as JSON on stdout. Logs go to stderr.
//!
//! Exit codes: `0` redirect, `1` capture failed, `2` setup error.

mod observability;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use gocrypto_payum::{
    CaptureAction, CaptureOutcome, GatewayConfig,
    action::Action,
    request::{Payment, Request},
    transport::HttpTransport,
};
use observability::{LogFormat, init_observability};
use tracing::error;

/// Run a single GoCrypto capture.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Gateway configuration file (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Order total in minor units (cents).
    #[arg(short, long)]
    total: i64,

    /// URL the shopper returns to after payment.
    #[arg(short, long)]
    return_url: String,

    /// Log output format; defaults to `LOG_FORMAT` or pretty.
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_observability(cli.log_format.unwrap_or_else(LogFormat::from_env));

    match run(&cli).await {
        Ok(outcome) => {
            let code = match outcome {
                CaptureOutcome::Redirect { .. } => ExitCode::SUCCESS,
                CaptureOutcome::Recorded { .. } => ExitCode::from(1),
            };
            match serde_json::to_string(&outcome) {
                Ok(json) => println!("{json}"),
                Err(e) => error!(error = %e, "failed to serialize outcome"),
            }
            code
        }
        Err(e) => {
            error!(error = %e, "capture could not run");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: &Cli) -> gocrypto_payum::Result<CaptureOutcome> {
    let config = GatewayConfig::from_file(&cli.config)?;
    let action = CaptureAction::new(HttpTransport::with_config(&config.http)?)
        .with_api(config.api()?)
        .with_options(config.capture);

    let mut payment = Payment::new(cli.total, cli.return_url.clone());
    action.execute(Request::capture(&mut payment)).await
}
