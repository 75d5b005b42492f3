//! Core cheatsheet operations

pub mod clipboard;
pub mod error;
pub mod library;
pub mod model;
pub mod ordering;
pub mod samples;
pub mod storage;
pub mod transfer;
pub mod validate;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use error::{ImportError, SheetError, StorageError, ValidationError};
pub use library::{AppState, ImportSummary, Library};
pub use model::{Category, Command};
pub use storage::{JsonFileStorage, MemoryStorage, SqliteStorage, Storage};
