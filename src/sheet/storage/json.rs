//! Flat-file backend: one JSON document holding every category

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::Storage;
use crate::sheet::error::StorageError;
use crate::sheet::model::Category;

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl Storage for JsonFileStorage {
    fn load_all(&self) -> Result<Vec<Category>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Decode {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save_all(&mut self, categories: &[Category]) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let content = serde_json::to_string_pretty(categories).map_err(StorageError::Encode)?;

        // Write beside the target and rename so a failed write leaves the old document intact
        let mut file = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::model::Command;
    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn sample() -> Vec<Category> {
        let now = Utc::now();
        let mut git = Category::new(Uuid::new_v4(), "Git".into(), 0, now);
        git.is_pinned = true;
        git.commands.push(Command::new(
            Uuid::new_v4(),
            "status".into(),
            "git status".into(),
            0,
            now,
        ));
        vec![git, Category::new(Uuid::new_v4(), "Docker".into(), 0, now)]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cheatstore.json"));
        assert!(storage.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cheatstore.json");
        let mut storage = JsonFileStorage::new(&path);

        let categories = sample();
        storage.save_all(&categories).unwrap();
        assert!(path.exists());

        let loaded = storage.load_all().unwrap();
        assert_eq!(loaded, categories);
    }

    #[test]
    fn test_corrupt_document_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cheatstore.json");
        fs::write(&path, "{ not json").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(matches!(
            storage.load_all(),
            Err(StorageError::Decode { .. })
        ));
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonFileStorage::new(dir.path().join("cheatstore.json"));

        storage.save_all(&sample()).unwrap();
        storage.save_all(&[]).unwrap();
        assert!(storage.load_all().unwrap().is_empty());
    }
}
