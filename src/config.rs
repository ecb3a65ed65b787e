use std::time::Duration;
use clap::{Parser, ValueEnum};

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

#[derive(Parser, Debug)]
#[command(name = "cep-lookup", version, about = "Look up a Brazilian postal code (CEP) on ViaCEP")]
pub struct Cli {
    /// postal code to look up, prompts for codes on stdin when omitted
    pub code: Option<String>,

    #[arg(long, env = "CEP_LOOKUP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// request timeout in seconds, no timeout when unset
    #[arg(long, env = "CEP_LOOKUP_TIMEOUT")]
    pub timeout: Option<u64>,

    #[arg(long, env = "CEP_LOOKUP_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// settings needed by the lookup client
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            timeout: cli.timeout.map(Duration::from_secs),
        }
    }
}
