//! Executor configuration.

use serde::Deserialize;

use crate::error::{ExecError, Result};

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the pool size.
pub const MAX_CONNECTIONS_VAR: &str = "REGSQL_MAX_CONNECTIONS";

/// Connection settings for [`SqliteExecutor`](crate::SqliteExecutor).
///
/// Deserializable so it can be embedded in an application config file;
/// missing fields take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// sqlx connection URL, e.g. `sqlite://app.db` or `sqlite::memory:`.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        // Each in-memory connection is a separate database.
        Self {
            database_url: String::from("sqlite::memory:"),
            max_connections: 1,
        }
    }
}

impl ExecutorConfig {
    /// Creates a configuration for `database_url` with default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Sets the pool size.
    #[must_use]
    pub const fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Reads `DATABASE_URL` and `REGSQL_MAX_CONNECTIONS`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            config.database_url = url;
        }
        if let Some(raw) = lookup(MAX_CONNECTIONS_VAR) {
            config.max_connections = raw.trim().parse().map_err(|_| {
                ExecError::InvalidConfig(format!("{MAX_CONNECTIONS_VAR} is not a number: {raw}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings before a pool is opened.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(ExecError::InvalidConfig(String::from(
                "database_url must not be empty",
            )));
        }
        if self.max_connections == 0 {
            return Err(ExecError::InvalidConfig(String::from(
                "max_connections must be at least 1",
            )));
        }
        Ok(())
    }
}
