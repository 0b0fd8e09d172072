//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        cascade::{CascadeService, PgCascadeService},
        collectors::{CollectorsService, PgCollectorsService},
        items::{ItemsService, PgItemsService},
        locations::{LocationsService, PgLocationsService},
        rescues::{PgRescueRequestsService, RescueRequestsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Settings that shape service behaviour rather than connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    /// Upper bound on a single claim attempt.
    pub claim_timeout: Duration,

    /// Apply pending migrations before building the services.
    pub run_migrations: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            claim_timeout: Duration::from_secs(5),
            run_migrations: false,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub locations: Arc<dyn LocationsService>,
    pub collectors: Arc<dyn CollectorsService>,
    pub items: Arc<dyn ItemsService>,
    pub cascade: Arc<dyn CascadeService>,
    pub rescues: Arc<dyn RescueRequestsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(&Db::new(pool), settings))
    }

    #[must_use]
    pub fn from_db(db: &Db, settings: AppSettings) -> Self {
        Self {
            locations: Arc::new(PgLocationsService::new(db.clone())),
            collectors: Arc::new(PgCollectorsService::new(db.clone())),
            items: Arc::new(PgItemsService::new(db.clone())),
            cascade: Arc::new(PgCascadeService::new(db.clone())),
            rescues: Arc::new(PgRescueRequestsService::new(
                db.clone(),
                settings.claim_timeout,
            )),
        }
    }
}
