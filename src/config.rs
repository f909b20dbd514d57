//! Where tasktree keeps its data.
//!
//! The task file is taken from `--db` (or `TASKTREE_DB`); without one it lives
//! at `~/.tasktree/tasks.json`. The data directory is created on demand.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DATA_DIR_NAME: &str = ".tasktree";
pub const DEFAULT_DB_FILE: &str = "tasks.json";
pub const LOG_FILE: &str = "tasktree.log";

/// Resolved locations for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve paths from an explicit task file, falling back to `home`.
    pub fn resolve(db: Option<&Path>, home: Option<&Path>) -> Result<Self> {
        let config = match db {
            Some(db_path) => {
                if db_path.as_os_str().is_empty() {
                    return Err(Error::InvalidArgument("--db path is empty".into()));
                }
                let data_dir = db_path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."))
                    .to_path_buf();
                Config {
                    db_path: db_path.to_path_buf(),
                    data_dir,
                }
            }
            None => {
                let data_dir = home.unwrap_or_else(|| Path::new(".")).join(DATA_DIR_NAME);
                Config {
                    db_path: data_dir.join(DEFAULT_DB_FILE),
                    data_dir,
                }
            }
        };
        Ok(config)
    }

    /// Resolve against `$HOME`.
    pub fn from_env(db: Option<&Path>) -> Result<Self> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::resolve(db, home.as_deref())
    }

    /// Create the data directory if it does not exist yet.
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| Error::StoreUnavailable {
            path: self.data_dir.clone(),
            source,
        })
    }

    /// File the dashboard logs to, since stderr belongs to the terminal UI.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}
