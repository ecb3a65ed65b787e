use std::io::Write;
use std::process::ExitCode;
use clap::Parser;
use log::{debug, error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::{Cli, Config, OutputFormat};
use crate::render::{render_outcome, EMPTY_INPUT_MSG, PROMPT};
use crate::viacep::model::{LookupOutcome, PostalCode};
use crate::viacep::ViaCepClient;

mod config;
mod render;
mod viacep;

/// exit status when the input is blank
const EXIT_EMPTY_INPUT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = install_tracing() {
        eprintln!("cannot set up logging: {:?}", e);
        return ExitCode::FAILURE;
    }
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

/// logs go to stderr, stdout only carries results
fn install_tracing() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

async fn run(cli: Cli) -> color_eyre::Result<ExitCode> {
    let client = ViaCepClient::new(&Config::from(&cli))?;
    match &cli.code {
        Some(input) => lookup_once(&client, input, cli.format).await,
        None => {
            interactive(&client, cli.format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn lookup_once(client: &ViaCepClient, input: &str, format: OutputFormat) -> color_eyre::Result<ExitCode> {
    let Ok(code) = PostalCode::try_from(input) else {
        eprintln!("{}", EMPTY_INPUT_MSG);
        return Ok(ExitCode::from(EXIT_EMPTY_INPUT));
    };
    let outcome = client.lookup(&code).await;
    render_outcome(&outcome, format, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())?;
    Ok(match outcome {
        LookupOutcome::Failed(report) => {
            debug!("{:?}", report);
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    })
}

/// one lookup per stdin line until end of input
async fn interactive(client: &ViaCepClient, format: OutputFormat) -> color_eyre::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut total = 0usize;
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Ok(code) = PostalCode::try_from(line.as_str()) else {
            eprintln!("{}", EMPTY_INPUT_MSG);
            continue;
        };
        total += 1;
        let outcome = client.lookup(&code).await;
        render_outcome(&outcome, format, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())?;
    }
    info!("session finished after [{}] lookups", total);
    Ok(())
}

fn prompt() -> color_eyre::Result<()> {
    let mut err = std::io::stderr().lock();
    write!(err, "{} ", PROMPT)?;
    err.flush()?;
    Ok(())
}
