//! Platform-specific configuration and paths

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

use crate::sheet::{JsonFileStorage, SqliteStorage, Storage};

/// Persistence variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// One JSON document holding every category
    Json,
    /// SQLite object store
    #[default]
    Sqlite,
}

impl Backend {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "cheatstore.json",
            Self::Sqlite => "cheatsheet.sqlite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Get the default application data directory
/// - macOS: ~/Library/Application Support/cheatsheet/
/// - Linux: ~/.local/share/cheatsheet/
/// - Windows: %APPDATA%/cheatsheet/
pub fn default_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join("Library")
            .join("Application Support")
            .join("cheatsheet"))
    }

    #[cfg(not(target_os = "macos"))]
    {
        let data = dirs::data_dir().context("Could not determine data directory")?;
        Ok(data.join("cheatsheet"))
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub backend: Backend,
}

impl Config {
    /// `data_dir` overrides the platform default (from `--home` / `CHEATSHEET_HOME`)
    pub fn resolve(data_dir: Option<PathBuf>, backend: Backend) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self { data_dir, backend })
    }

    /// Path of the store file for the selected backend
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(self.backend.file_name())
    }

    /// Path of the file holding the selected category
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join("state.json")
    }

    pub fn open_storage(&self) -> Result<Box<dyn Storage>> {
        let path = self.store_path();
        let storage: Box<dyn Storage> = match self.backend {
            Backend::Json => Box::new(JsonFileStorage::new(&path)),
            Backend::Sqlite => Box::new(
                SqliteStorage::open(&path)
                    .with_context(|| format!("Failed to open store: {}", path.display()))?,
            ),
        };
        Ok(storage)
    }
}
