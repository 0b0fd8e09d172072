//! Server configuration module

use clap::Parser;

use crate::config::{service::ServiceConfig, telemetry::TelemetryConfig};

pub(crate) mod service;
pub(crate) mod telemetry;

pub(crate) use telemetry::LogFormat;

/// Reprieve JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "reprieve-json", about = "Reprieve JSON API Server", long_about = None)]
pub struct ServerConfig {
    #[command(flatten)]
    pub service: ServiceConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
