//! Configuration
//!
//! Settings are read from CLI flags with environment fallbacks; a `.env` file
//! is loaded by the binary before parsing.

use std::time::Duration;

use clap::{Args, ValueEnum};
use rusty_money::iso::{self, Currency};

/// Currencies the storefront can price in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CurrencyCode {
    /// US dollar
    Usd,

    /// Pound sterling
    Gbp,

    /// Euro
    Eur,
}

impl CurrencyCode {
    /// The ISO currency for this code.
    pub fn currency(self) -> &'static Currency {
        match self {
            CurrencyCode::Usd => iso::USD,
            CurrencyCode::Gbp => iso::GBP,
            CurrencyCode::Eur => iso::EUR,
        }
    }
}

/// Storefront API settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the storefront API
    #[arg(
        long,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:8000"
    )]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "STOREFRONT_API_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub api_timeout_seconds: u64,

    /// Currency catalog prices are quoted in
    #[arg(long, env = "STOREFRONT_CURRENCY", value_enum, default_value_t = CurrencyCode::Usd)]
    pub currency: CurrencyCode,
}

impl ApiConfig {
    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
