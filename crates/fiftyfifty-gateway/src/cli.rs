use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "FIFTYFIFTY_LISTEN_ADDR";
pub const ENVIRONMENT_ENV: &str = "FIFTYFIFTY_ENVIRONMENT";
pub const STORAGE_BACKEND_ENV: &str = "FIFTYFIFTY_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "FIFTYFIFTY_MYSQL_DSN";
pub const TABLE_ENV: &str = "FIFTYFIFTY_TABLE";
pub const CACHE_MAX_ENTRIES_ENV: &str = "FIFTYFIFTY_CACHE_MAX_ENTRIES";
pub const CACHE_MAX_BYTES_ENV: &str = "FIFTYFIFTY_CACHE_MAX_BYTES";
pub const STORE_TIMEOUT_MS_ENV: &str = "FIFTYFIFTY_STORE_TIMEOUT_MS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[value(name = "development")]
    Development,
    #[value(name = "production")]
    Production,
}

impl Environment {
    /// Each environment keeps its sets in its own table.
    pub fn default_table(self) -> &'static str {
        match self {
            Environment::Development => "dev_video_sets",
            Environment::Production => "video_sets",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fiftyfifty-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = ENVIRONMENT_ENV,
        value_enum,
        default_value_t = Environment::Development
    )]
    pub environment: Environment,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// Overrides the per-environment table name.
    #[arg(long, env = TABLE_ENV)]
    pub table: Option<String>,

    #[arg(
        long,
        env = CACHE_MAX_ENTRIES_ENV,
        default_value_t = fiftyfifty_cache::memory::DEFAULT_MAX_ENTRIES
    )]
    pub cache_max_entries: usize,

    #[arg(
        long,
        env = CACHE_MAX_BYTES_ENV,
        default_value_t = fiftyfifty_cache::memory::DEFAULT_MAX_BYTES
    )]
    pub cache_max_bytes: usize,

    #[arg(long, env = STORE_TIMEOUT_MS_ENV, default_value_t = DEFAULT_STORE_TIMEOUT_MS)]
    pub store_timeout_ms: u64,
}

impl CLI {
    pub fn table(&self) -> &str {
        self.table
            .as_deref()
            .unwrap_or_else(|| self.environment.default_table())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["fiftyfifty-gateway"]).unwrap();

        assert_eq!(cli.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.environment, Environment::Development);
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.table(), "dev_video_sets");
        assert_eq!(cli.cache_max_entries, 10_000);
        assert_eq!(cli.cache_max_bytes, 100_000);
        assert_eq!(cli.store_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn production_uses_production_table() {
        let cli =
            CLI::try_parse_from(["fiftyfifty-gateway", "--environment", "production"]).unwrap();
        assert_eq!(cli.table(), "video_sets");
    }

    #[test]
    fn table_override_wins() {
        let cli = CLI::try_parse_from([
            "fiftyfifty-gateway",
            "--environment",
            "production",
            "--table",
            "staging_sets",
        ])
        .unwrap();
        assert_eq!(cli.table(), "staging_sets");
    }

    #[test]
    fn mysql_requires_dsn() {
        assert!(CLI::try_parse_from(["fiftyfifty-gateway", "--storage", "mysql"]).is_err());

        let cli = CLI::try_parse_from([
            "fiftyfifty-gateway",
            "--storage",
            "mysql",
            "--mysql-dsn",
            "mysql://localhost/fiftyfifty",
        ])
        .unwrap();
        assert_eq!(cli.mysql_dsn.as_deref(), Some("mysql://localhost/fiftyfifty"));
    }
}
