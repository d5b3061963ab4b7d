//! Database connection settings read from the environment.

use std::env;

use crate::error::AppError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Which database the process talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    Prod,
    /// Database name must end in `_test`
    Test,
}

impl DbProfile {
    fn name_var(self) -> &'static str {
        match self {
            DbProfile::Prod => "PROD_DB",
            DbProfile::Test => "TEST_DB",
        }
    }

    fn check_name(self, name: &str) -> Result<(), AppError> {
        if self == DbProfile::Test && !name.ends_with("_test") {
            return Err(AppError::config(format!(
                "Test profile requires database name to end with '_test', but got: '{name}'"
            )));
        }
        Ok(())
    }
}

/// Which role the connection authenticates as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Reads and writes decks
    App,
    /// Owns the schema; used by migrations
    Owner,
}

impl DbOwner {
    fn credential_vars(self) -> (&'static str, &'static str) {
        match self {
            DbOwner::App => ("APP_DB_USER", "APP_DB_PASSWORD"),
            DbOwner::Owner => ("CARDDECK_OWNER_USER", "CARDDECK_OWNER_PASSWORD"),
        }
    }
}

/// Everything needed to reach one database as one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl DbSettings {
    pub fn from_env(profile: DbProfile, owner: DbOwner) -> Result<Self, AppError> {
        let database = required(profile.name_var())?;
        profile.check_name(&database)?;

        let (user_var, password_var) = owner.credential_vars();

        Ok(Self {
            host: env::var("POSTGRES_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: port()?,
            database,
            username: required(user_var)?,
            password: required(password_var)?,
        })
    }

    pub fn url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

/// Database URL for `profile`, authenticating as `owner`.
pub fn db_url(profile: DbProfile, owner: DbOwner) -> Result<String, AppError> {
    DbSettings::from_env(profile, owner).map(|settings| settings.url())
}

fn port() -> Result<u16, AppError> {
    match env::var("POSTGRES_PORT") {
        Ok(raw) => raw.parse().map_err(|_| {
            AppError::config(format!("POSTGRES_PORT must be a port number, got '{raw}'"))
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn required(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
