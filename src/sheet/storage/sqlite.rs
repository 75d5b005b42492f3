//! SQLite object store backend
//!
//! Categories and commands live in two tables; `commands.category_id` cascades
//! on delete, so dropping a category row removes its commands in the same
//! transaction.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::Storage;
use crate::sheet::error::StorageError;
use crate::sheet::model::{Category, Command};

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    is_pinned   INTEGER NOT NULL DEFAULT 0,
    sort_order  INTEGER NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS commands (
    id          TEXT PRIMARY KEY,
    category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    name        TEXT NOT NULL,
    content     TEXT NOT NULL,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    sort_order  INTEGER NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_commands_category ON commands(category_id, sort_order);
";

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (creating if needed) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

fn parse_id(raw: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(raw).map_err(|_| StorageError::Corrupt(format!("bad id {raw:?}")))
}

/// Timestamps are stored as RFC 3339 text with nanosecond precision
fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| StorageError::Corrupt(format!("bad timestamp {raw:?}")))
}

type CategoryRow = (String, String, bool, u32, String, String);
type CommandRow = (String, String, String, String, bool, u32, String, String);

impl Storage for SqliteStorage {
    fn load_all(&self) -> Result<Vec<Category>, StorageError> {
        let category_rows: Vec<CategoryRow> = {
            let mut stmt = self.conn.prepare(
                "SELECT id, name, is_pinned, sort_order, created_at, updated_at
                 FROM categories ORDER BY is_pinned DESC, sort_order ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?;
            rows.collect::<rusqlite::Result<_>>()?
        };

        let command_rows: Vec<CommandRow> = {
            let mut stmt = self.conn.prepare(
                "SELECT id, category_id, name, content, is_favorite, sort_order, created_at, updated_at
                 FROM commands ORDER BY category_id, sort_order ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ))
            })?;
            rows.collect::<rusqlite::Result<_>>()?
        };

        let mut commands_by_category: HashMap<Uuid, Vec<Command>> = HashMap::new();
        for (id, category_id, name, content, is_favorite, order, created, updated) in command_rows {
            commands_by_category
                .entry(parse_id(&category_id)?)
                .or_default()
                .push(Command {
                    id: parse_id(&id)?,
                    name,
                    content,
                    is_favorite,
                    order,
                    created_at: parse_time(&created)?,
                    updated_at: parse_time(&updated)?,
                });
        }

        category_rows
            .into_iter()
            .map(|(id, name, is_pinned, order, created, updated)| {
                let id = parse_id(&id)?;
                Ok(Category {
                    id,
                    name,
                    is_pinned,
                    order,
                    created_at: parse_time(&created)?,
                    updated_at: parse_time(&updated)?,
                    commands: commands_by_category.remove(&id).unwrap_or_default(),
                })
            })
            .collect()
    }

    fn save_all(&mut self, categories: &[Category]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;

        {
            let keep_categories: HashSet<String> =
                categories.iter().map(|c| c.id.to_string()).collect();
            let keep_commands: HashSet<String> = categories
                .iter()
                .flat_map(|c| c.commands.iter().map(|cmd| cmd.id.to_string()))
                .collect();

            let stored_categories: Vec<String> = {
                let mut stmt = tx.prepare("SELECT id FROM categories")?;
                let ids = stmt.query_map([], |row| row.get(0))?;
                ids.collect::<rusqlite::Result<_>>()?
            };
            for id in stored_categories.iter().filter(|id| !keep_categories.contains(*id)) {
                tx.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
            }

            let stored_commands: Vec<String> = {
                let mut stmt = tx.prepare("SELECT id FROM commands")?;
                let ids = stmt.query_map([], |row| row.get(0))?;
                ids.collect::<rusqlite::Result<_>>()?
            };
            for id in stored_commands.iter().filter(|id| !keep_commands.contains(*id)) {
                tx.execute("DELETE FROM commands WHERE id = ?1", params![id])?;
            }

            let mut upsert_category = tx.prepare(
                "INSERT INTO categories (id, name, is_pinned, sort_order, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    is_pinned = excluded.is_pinned,
                    sort_order = excluded.sort_order,
                    updated_at = excluded.updated_at",
            )?;
            let mut upsert_command = tx.prepare(
                "INSERT INTO commands
                    (id, category_id, name, content, is_favorite, sort_order, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    category_id = excluded.category_id,
                    name = excluded.name,
                    content = excluded.content,
                    is_favorite = excluded.is_favorite,
                    sort_order = excluded.sort_order,
                    updated_at = excluded.updated_at",
            )?;

            for category in categories {
                let category_id = category.id.to_string();
                upsert_category.execute(params![
                    category_id,
                    category.name,
                    category.is_pinned,
                    category.order,
                    format_time(&category.created_at),
                    format_time(&category.updated_at),
                ])?;

                for command in &category.commands {
                    upsert_command.execute(params![
                        command.id.to_string(),
                        category_id,
                        command.name,
                        command.content,
                        command.is_favorite,
                        command.order,
                        format_time(&command.created_at),
                        format_time(&command.updated_at),
                    ])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}
