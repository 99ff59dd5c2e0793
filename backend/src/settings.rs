//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `ASSET_LEDGER_*` environment variables over an
//! optional configuration file. Every field is optional; accessors supply the
//! defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("database URL is required; set ASSET_LEDGER_DATABASE_URL or --database-url")]
    MissingDatabaseUrl,
    /// The pool size was zero.
    #[error("db_max_connections must be at least 1")]
    ZeroPoolSize,
}

/// Server and persistence settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASSET_LEDGER")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections; defaults to 10.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection; defaults to 30.
    pub db_connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations at startup; defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Socket address the HTTP server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Whether embedded migrations run before the server starts.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool configuration derived from the database settings.
    ///
    /// # Errors
    /// Fails when the database URL is missing or the pool size is zero.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let max_size = self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
        if max_size == 0 {
            return Err(SettingsError::ZeroPoolSize);
        }
        let timeout = Duration::from_secs(
            self.db_connection_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
        );
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(max_size)
            .with_connection_timeout(timeout))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "ASSET_LEDGER_HOST",
        "ASSET_LEDGER_PORT",
        "ASSET_LEDGER_DATABASE_URL",
        "ASSET_LEDGER_DB_MAX_CONNECTIONS",
        "ASSET_LEDGER_DB_CONNECTION_TIMEOUT_SECS",
        "ASSET_LEDGER_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("asset-ledger")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.run_migrations());
        assert_eq!(
            settings.pool_config().expect_err("url missing"),
            SettingsError::MissingDatabaseUrl
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.extend([
            ("ASSET_LEDGER_HOST", Some("127.0.0.1".to_owned())),
            ("ASSET_LEDGER_PORT", Some("9090".to_owned())),
            (
                "ASSET_LEDGER_DATABASE_URL",
                Some("postgres://ledger@localhost/ledger".to_owned()),
            ),
            ("ASSET_LEDGER_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("ASSET_LEDGER_DB_CONNECTION_TIMEOUT_SECS", Some("5".to_owned())),
            ("ASSET_LEDGER_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        assert!(!settings.run_migrations());
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    #[case::blank(Some("   "))]
    #[case::absent(None)]
    fn database_url_must_be_present(#[case] url: Option<&str>) {
        let settings = AppSettings {
            host: None,
            port: None,
            database_url: url.map(str::to_owned),
            db_max_connections: None,
            db_connection_timeout_secs: None,
            run_migrations: None,
        };
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn zero_pool_size_is_rejected() {
        let settings = AppSettings {
            host: None,
            port: None,
            database_url: Some("postgres://localhost/ledger".to_owned()),
            db_max_connections: Some(0),
            db_connection_timeout_secs: None,
            run_migrations: None,
        };
        assert_eq!(
            settings.pool_config().expect_err("zero size"),
            SettingsError::ZeroPoolSize
        );
    }
}
