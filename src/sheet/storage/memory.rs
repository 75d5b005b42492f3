//! Volatile backend
//!
//! Clones share the same contents, so a caller can keep a handle after moving
//! one into a [`Library`](crate::sheet::Library) and inspect what was committed.

use std::cell::RefCell;
use std::rc::Rc;

use super::Storage;
use crate::sheet::error::StorageError;
use crate::sheet::model::Category;

#[derive(Debug, Default)]
struct Inner {
    categories: Vec<Category>,
    read_only: bool,
    saves: usize,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let storage = Self::default();
        storage.inner.borrow_mut().categories = categories;
        storage
    }

    /// Make every later `save_all` fail with [`StorageError::ReadOnly`]
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.borrow_mut().read_only = read_only;
    }

    /// Number of successful commits
    pub fn saves(&self) -> usize {
        self.inner.borrow().saves
    }

    /// The last committed collection
    pub fn snapshot(&self) -> Vec<Category> {
        self.inner.borrow().categories.clone()
    }
}

impl Storage for MemoryStorage {
    fn load_all(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.snapshot())
    }

    fn save_all(&mut self, categories: &[Category]) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.read_only {
            return Err(StorageError::ReadOnly);
        }
        inner.categories = categories.to_vec();
        inner.saves += 1;
        Ok(())
    }
}
