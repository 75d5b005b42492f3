//! Category and command records
//!
//! The serde shape here is also the flat-file document: a JSON array of
//! categories, each embedding its commands in `order` sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ordering::Ordered;

/// A named shell snippet owned by one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub id: Uuid,
    pub name: String,
    /// Shell text placed on the clipboard
    pub content: String,
    /// Cosmetic only, does not partition `order`
    #[serde(default)]
    pub is_favorite: bool,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Command {
    pub fn new(id: Uuid, name: String, content: String, order: u32, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            content,
            is_favorite: false,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// A named, orderable, pinnable grouping of commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub is_pinned: bool,
    /// Unique within the pinned or unpinned partition
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Sorted by `order`
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Category {
    pub fn new(id: Uuid, name: String, order: u32, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            is_pinned: false,
            order,
            created_at: now,
            updated_at: now,
            commands: Vec::new(),
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn command(&self, id: Uuid) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn command_index(&self, id: Uuid) -> Option<usize> {
        self.commands.iter().position(|c| c.id == id)
    }
}

impl Ordered for Category {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl Ordered for Command {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// Sort categories into display order: pinned partition first, then by `order`
pub fn sort_for_display(categories: &mut [Category]) {
    categories.sort_by(|a, b| b.is_pinned.cmp(&a.is_pinned).then(a.order.cmp(&b.order)));
}
