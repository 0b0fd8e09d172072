//! Service Config

use std::time::Duration;

use clap::Args;
use uuid::Uuid;

use reprieve_app::{context::AppSettings, domain::locations::records::LocationUuid};

/// Listener, storage, cascade and claim settings.
#[derive(Debug, Args)]
pub struct ServiceConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Apply pending database migrations at startup.
    #[arg(long, env = "RUN_MIGRATIONS", default_value_t = false)]
    pub run_migrations: bool,

    /// Location used when a cascade run names none. Without it, runs must name one.
    #[arg(long, env = "DEFAULT_LOCATION_UUID")]
    pub default_location_uuid: Option<Uuid>,

    /// Upper bound on a single claim attempt, in milliseconds.
    #[arg(long, env = "CLAIM_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub claim_timeout_ms: u64,
}

impl ServiceConfig {
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn default_location(&self) -> Option<LocationUuid> {
        self.default_location_uuid.map(LocationUuid::from_uuid)
    }

    /// Settings handed to the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            claim_timeout: Duration::from_millis(self.claim_timeout_ms),
            run_migrations: self.run_migrations,
        }
    }
}
