//! Core configuration and composition root.
//!
//! # Responsibility
//! - Describe the knobs a host sets before building the core.
//! - Wire logging, persistence and the model manager into a `LogicManager`.
//!
//! # Invariants
//! - With no `db_path` the core runs purely in memory.
//! - With a `db_path`, the stored snapshot is loaded before any command
//!   runs and every later change is saved.

use crate::db::{open_db, DbError};
use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::logic::LogicManager;
use crate::repo::contact_repo::{ContactRepository, RepoError, SqliteContactRepository};
use crate::service::model_manager::ModelManager;
use crate::service::projection::SortMode;
use crate::service::storage::SaveOnChange;
use crate::store::address_book::AddressBook;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "ADDRESSBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ADDRESSBOOK_LOG_DIR";
pub const ENV_DB_PATH: &str = "ADDRESSBOOK_DB";
pub const ENV_SORT: &str = "ADDRESSBOOK_SORT";

/// Host-provided settings for building the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off if unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite snapshot file; the core is memory-only if unset.
    pub db_path: Option<PathBuf>,
    pub default_sort: SortMode,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: None,
            default_sort: SortMode::default(),
        }
    }
}

impl CoreConfig {
    /// Reads settings from `ADDRESSBOOK_*` environment variables, keeping
    /// defaults for unset or empty values.
    pub fn from_env() -> Result<Self, BootstrapError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BootstrapError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        config.db_path = read(ENV_DB_PATH).map(PathBuf::from);
        if let Some(sort) = read(ENV_SORT) {
            config.default_sort =
                SortMode::parse(&sort).ok_or(BootstrapError::InvalidSortMode(sort))?;
        }
        Ok(config)
    }
}

/// Failure while building the core from a `CoreConfig`.
#[derive(Debug)]
pub enum BootstrapError {
    InvalidSortMode(String),
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSortMode(value) => {
                write!(f, "invalid sort mode `{value}`; expected name|tag")
            }
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSortMode(_) => None,
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<LoggingError> for BootstrapError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for BootstrapError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Builds a ready `LogicManager` from `config`.
pub fn bootstrap(config: &CoreConfig) -> Result<LogicManager, BootstrapError> {
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let mut model = match config.db_path.as_ref() {
        Some(path) => {
            let repo = SqliteContactRepository::try_new(open_db(path)?)?;
            let book = repo.load_address_book()?;
            info!(
                "event=snapshot_load module=config status=ok size={}",
                book.len()
            );
            let mut model = ModelManager::new(book);
            model.add_observer(SaveOnChange::new(repo));
            model
        }
        None => ModelManager::new(AddressBook::new()),
    };
    model.set_sort(config.default_sort);

    Ok(LogicManager::new(model))
}
