// ⚙️ Configuration - database location, bind address, log filter
//
// Precedence: explicit overrides (CLI flags) > environment > defaults.

use directories::ProjectDirs;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "LIBRARY_DB";
pub const ENV_BIND_ADDR: &str = "LIBRARY_BIND";
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";
const DB_FILE_NAME: &str = "library.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub bind_addr: String,
    pub log_filter: String,
}

impl Config {
    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` for environment values. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Config {
            db_path: get(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            bind_addr: get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_filter: get(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    pub fn with_db_path(mut self, db_path: Option<PathBuf>) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        self
    }

    pub fn with_bind_addr(mut self, bind_addr: Option<String>) -> Self {
        if let Some(addr) = bind_addr {
            self.bind_addr = addr;
        }
        self
    }
}

/// `<platform data dir>/library-catalog/library.sqlite`, or a file in the
/// working directory when no home directory can be found.
pub fn default_db_path() -> PathBuf {
    ProjectDirs::from("", "", "library-catalog")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}
