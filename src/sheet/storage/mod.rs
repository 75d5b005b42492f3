//! Persistence backends
//!
//! The library works on a whole-collection snapshot: it loads every category
//! once, and after each mutation hands the complete ordered collection back to
//! `save_all`. Backends commit that snapshot atomically.

mod json;
mod memory;
mod sqlite;

pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use uuid::Uuid;

use super::error::StorageError;
use super::model::Category;

pub trait Storage {
    /// Load every category with its commands
    fn load_all(&self) -> Result<Vec<Category>, StorageError>;

    /// Replace the stored collection with `categories`
    fn save_all(&mut self, categories: &[Category]) -> Result<(), StorageError>;

    fn generate_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
