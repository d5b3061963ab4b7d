use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Pool and per-session limits applied to every connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Upper bound on a single statement, so a stuck draw surfaces as a timeout
    pub statement_timeout: Duration,
    /// Upper bound on waiting for a deck row lock
    pub lock_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            statement_timeout: Duration::from_secs(5),
            lock_timeout: Duration::from_secs(3),
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl PoolSettings {
    /// Session settings passed through the libpq `options` URL parameter.
    fn session_options(&self) -> String {
        // "-c statement_timeout=5000 -c lock_timeout=3000", percent-encoded
        format!(
            "options=-c%20statement_timeout%3D{}%20-c%20lock_timeout%3D{}%20-c%20TimeZone%3DUTC",
            millis(self.statement_timeout),
            millis(self.lock_timeout)
        )
    }

    fn apply(&self, url: &str) -> ConnectOptions {
        let separator = if url.contains('?') { '&' } else { '?' };
        let mut opt = ConnectOptions::new(format!("{url}{separator}{}", self.session_options()));
        opt.min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(Duration::from_secs(30))
            .sqlx_logging(false);
        opt
    }
}

/// Unified database connector that supports different profiles and owners
/// This function does NOT run any migrations
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    connect_db_with(profile, owner, &PoolSettings::default()).await
}

pub async fn connect_db_with(
    profile: DbProfile,
    owner: DbOwner,
    settings: &PoolSettings,
) -> Result<DatabaseConnection, AppError> {
    // Build database URL from environment variables
    let database_url = db_url(profile, owner)?;

    info!(
        ?profile,
        ?owner,
        max = settings.max_connections,
        acquire_timeout_ms = millis(settings.acquire_timeout),
        "pool=connecting engine=postgres"
    );
    let conn = Database::connect(settings.apply(&database_url)).await?;
    Ok(conn)
}
