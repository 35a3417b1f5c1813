//! Server settings and runtime configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 8;

/// Log output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Error returned for an unrecognised `log_format` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log format {value:?}, expected \"json\" or \"pretty\"")]
pub struct ParseLogFormatError {
    value: String,
}

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(ParseLogFormatError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Settings loaded at startup from CLI flags, `CASETRACK_`-prefixed
/// environment variables, and configuration files, in that precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CASETRACK")]
pub struct ServerSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. When unset the service runs on the
    /// in-memory repository.
    pub database_url: Option<String>,
    /// Connection pool cap.
    pub pool_max_size: Option<u32>,
    /// Log output format: `json` or `pretty`.
    pub log_format: Option<String>,
}

impl ServerSettings {
    /// The listener address, falling back to the default.
    ///
    /// The default literal is validated by a test, so the parse cannot fail.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(|| {
            DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080)))
        })
    }

    /// The pool cap, falling back to the default.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// The configured log format, defaulting to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseLogFormatError`] for an unrecognised value; startup
    /// treats this as fatal.
    pub fn log_format(&self) -> Result<LogFormat, ParseLogFormatError> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::Json), LogFormat::from_str)
    }
}

/// Runtime configuration assembled from settings and initialised resources.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration binding to the given address.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel-backed repository.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("casetrack")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("CASETRACK_BIND_ADDR", None::<String>),
            ("CASETRACK_DATABASE_URL", None::<String>),
            ("CASETRACK_POOL_MAX_SIZE", None::<String>),
            ("CASETRACK_LOG_FORMAT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.database_url.is_none());
        assert_eq!(settings.pool_max_size(), 8);
        assert_eq!(settings.log_format(), Ok(LogFormat::Json));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CASETRACK_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "CASETRACK_DATABASE_URL",
                Some("postgres://localhost/casetrack".to_owned()),
            ),
            ("CASETRACK_POOL_MAX_SIZE", Some("4".to_owned())),
            ("CASETRACK_LOG_FORMAT", Some("pretty".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            "127.0.0.1:9090".parse().expect("addr")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/casetrack")
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert_eq!(settings.log_format(), Ok(LogFormat::Pretty));
    }

    #[rstest]
    fn unknown_log_format_is_rejected() {
        let _guard = lock_env([("CASETRACK_LOG_FORMAT", Some("xml".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(settings.log_format().is_err());
    }

    #[rstest]
    fn default_bind_addr_literal_parses() {
        assert!(DEFAULT_BIND_ADDR.parse::<SocketAddr>().is_ok());
    }
}
