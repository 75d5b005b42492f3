//! Category and command stores
//!
//! [`Library`] keeps the ordered in-memory view and the storage backend.
//! Every mutation runs against a working copy of the collection, is committed
//! through [`Storage::save_all`], and only then replaces the in-memory view, so
//! a failed validation or save leaves the library untouched.

use chrono::{Local, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::clipboard::Clipboard;
use super::error::{Result, SheetError, StorageError};
use super::model::{sort_for_display, Category, Command};
use super::ordering::{is_contiguous, move_within, next_order, renumber};
use super::samples::SAMPLES;
use super::storage::Storage;
use super::transfer;
use super::validate::validate;

/// Outcome of a bulk import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub category_id: Uuid,
    pub category_name: String,
    /// Whether the import created the category
    pub created_category: bool,
    pub imported: usize,
}

pub struct Library {
    /// Display order: pinned partition first, each partition by `order`
    categories: Vec<Category>,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("categories", &self.categories.len())
            .finish_non_exhaustive()
    }
}

/// Renumber the pinned and unpinned partitions of a display-ordered list
fn renumber_partitions(categories: &mut [Category]) {
    let split = categories.iter().take_while(|c| c.is_pinned).count();
    let (pinned, unpinned) = categories.split_at_mut(split);
    renumber(pinned);
    renumber(unpinned);
}

fn category_mut(categories: &mut [Category], id: Uuid) -> Result<&mut Category> {
    categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(SheetError::CategoryNotFound(id))
}

fn import_label() -> String {
    format!("Imported {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

impl Library {
    /// Load the collection from `storage`
    ///
    /// Order indexes that are not contiguous are repaired in memory; the
    /// repaired numbering is written with the next mutation.
    pub fn open(storage: Box<dyn Storage>) -> Result<Self> {
        let mut categories = storage.load_all()?;

        for category in &mut categories {
            category.commands.sort_by_key(|c| c.order);
            if !is_contiguous(&category.commands) {
                warn!(category = %category.name, "repairing command order");
                renumber(&mut category.commands);
            }
        }

        sort_for_display(&mut categories);
        let split = categories.iter().take_while(|c| c.is_pinned).count();
        if !is_contiguous(&categories[..split]) || !is_contiguous(&categories[split..]) {
            warn!("repairing category order");
            renumber_partitions(&mut categories);
        }

        debug!(categories = categories.len(), "library loaded");
        Ok(Self {
            categories,
            storage,
        })
    }

    /// Apply `mutate` to a working copy and commit it
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut Vec<Category>) -> Result<T>) -> Result<T> {
        let mut working = self.categories.clone();
        let out = mutate(&mut working)?;
        if let Err(e) = self.storage.save_all(&working) {
            warn!(error = %e, "save failed, change discarded");
            return Err(e.into());
        }
        self.categories = working;
        Ok(out)
    }

    // Queries

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn pinned(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_pinned)
    }

    pub fn unpinned(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| !c.is_pinned)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Commands of a category in `order` sequence
    pub fn commands(&self, category_id: Uuid) -> Result<&[Command]> {
        self.category(category_id)
            .map(|c| c.commands.as_slice())
            .ok_or(SheetError::CategoryNotFound(category_id))
    }

    /// Resolve a category by name, 1-based display position, or id prefix
    pub fn find_category(&self, query: &str) -> Option<&Category> {
        let query = query.trim();
        self.categories
            .iter()
            .find(|c| c.name == query)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(query))
            })
            .or_else(|| by_position(&self.categories, query))
            .or_else(|| by_id_prefix(&self.categories, query, |c| c.id))
    }

    /// Resolve a command within a category the same way as [`Self::find_category`]
    pub fn find_command(&self, category_id: Uuid, query: &str) -> Option<&Command> {
        let commands = self.commands(category_id).ok()?;
        let query = query.trim();
        commands
            .iter()
            .find(|c| c.name == query)
            .or_else(|| commands.iter().find(|c| c.name.eq_ignore_ascii_case(query)))
            .or_else(|| by_position(commands, query))
            .or_else(|| by_id_prefix(commands, query, |c| c.id))
    }

    // Category operations

    /// Create an unpinned category at the end of the unpinned partition
    pub fn create_category(&mut self, name: &str) -> Result<Uuid> {
        validate(name, None)?;
        let name = name.trim().to_string();
        let id = self.storage.generate_id();

        self.commit(|categories| {
            let order = next_order(categories.iter().filter(|c| !c.is_pinned).count());
            categories.push(Category::new(id, name.clone(), order, Utc::now()));
            Ok(())
        })?;

        debug!(%id, %name, "created category");
        Ok(id)
    }

    pub fn rename_category(&mut self, id: Uuid, name: &str) -> Result<()> {
        validate(name, None)?;
        let name = name.trim().to_string();

        self.commit(|categories| {
            let category = category_mut(categories, id)?;
            category.name = name.clone();
            category.touch(Utc::now());
            Ok(())
        })?;

        debug!(%id, %name, "renamed category");
        Ok(())
    }

    /// Delete a category and all of its commands
    ///
    /// Clears `selection` when it pointed at the deleted category.
    pub fn delete_category(&mut self, id: Uuid, selection: &mut Option<Uuid>) -> Result<Category> {
        let removed = self.commit(|categories| {
            let index = categories
                .iter()
                .position(|c| c.id == id)
                .ok_or(SheetError::CategoryNotFound(id))?;
            let removed = categories.remove(index);
            renumber_partitions(categories);
            Ok(removed)
        })?;

        if *selection == Some(id) {
            *selection = None;
        }

        debug!(%id, commands = removed.commands.len(), "deleted category");
        Ok(removed)
    }

    /// Flip a category between the pinned and unpinned partitions
    ///
    /// The category lands at the end of its new partition and both partitions
    /// are renumbered. Returns the new pinned state.
    pub fn toggle_pin(&mut self, id: Uuid) -> Result<bool> {
        let pinned = self.commit(|categories| {
            let pinned = !category_mut(categories, id)?.is_pinned;
            let order = next_order(categories.iter().filter(|c| c.is_pinned == pinned).count());

            let category = category_mut(categories, id)?;
            category.is_pinned = pinned;
            category.order = order;
            category.touch(Utc::now());

            sort_for_display(categories);
            renumber_partitions(categories);
            Ok(pinned)
        })?;

        debug!(%id, pinned, "toggled category pin");
        Ok(pinned)
    }

    /// Move a category between display positions within its partition
    ///
    /// Returns `false` without changing anything when the positions are equal,
    /// out of range, or in different partitions.
    pub fn move_category(&mut self, from: usize, to: usize) -> Result<bool> {
        let len = self.categories.len();
        if from == to || from >= len || to >= len {
            return Ok(false);
        }
        if self.categories[from].is_pinned != self.categories[to].is_pinned {
            debug!(from, to, "rejected cross-partition category move");
            return Ok(false);
        }

        self.commit(|categories| {
            move_within(categories, from, to);
            categories[to].touch(Utc::now());
            renumber_partitions(categories);
            Ok(())
        })?;

        debug!(from, to, "moved category");
        Ok(true)
    }

    // Command operations

    /// Append a command to the end of a category
    pub fn create_command(&mut self, category_id: Uuid, name: &str, content: &str) -> Result<Uuid> {
        validate(name, Some(content))?;
        let name = name.trim().to_string();
        let content = content.trim().to_string();
        let id = self.storage.generate_id();

        self.commit(|categories| {
            let now = Utc::now();
            let category = category_mut(categories, category_id)?;
            let order = next_order(category.commands.len());
            category
                .commands
                .push(Command::new(id, name.clone(), content, order, now));
            category.touch(now);
            Ok(())
        })?;

        debug!(%id, %category_id, %name, "created command");
        Ok(id)
    }

    pub fn update_command(
        &mut self,
        category_id: Uuid,
        command_id: Uuid,
        name: &str,
        content: &str,
    ) -> Result<()> {
        validate(name, Some(content))?;
        let name = name.trim().to_string();
        let content = content.trim().to_string();

        self.commit(|categories| {
            let now = Utc::now();
            let category = category_mut(categories, category_id)?;
            let command = category
                .commands
                .iter_mut()
                .find(|c| c.id == command_id)
                .ok_or(SheetError::CommandNotFound(command_id))?;
            command.name = name;
            command.content = content;
            command.touch(now);
            category.touch(now);
            Ok(())
        })?;

        debug!(%command_id, "updated command");
        Ok(())
    }

    /// Delete a command and close the gap it leaves
    pub fn delete_command(&mut self, category_id: Uuid, command_id: Uuid) -> Result<Command> {
        let removed = self.commit(|categories| {
            let category = category_mut(categories, category_id)?;
            let index = category
                .command_index(command_id)
                .ok_or(SheetError::CommandNotFound(command_id))?;
            let removed = category.commands.remove(index);
            renumber(&mut category.commands);
            category.touch(Utc::now());
            Ok(removed)
        })?;

        debug!(%command_id, "deleted command");
        Ok(removed)
    }

    /// Returns the new favorite state
    pub fn toggle_favorite(&mut self, category_id: Uuid, command_id: Uuid) -> Result<bool> {
        self.commit(|categories| {
            let now = Utc::now();
            let category = category_mut(categories, category_id)?;
            let command = category
                .commands
                .iter_mut()
                .find(|c| c.id == command_id)
                .ok_or(SheetError::CommandNotFound(command_id))?;
            command.is_favorite = !command.is_favorite;
            command.touch(now);
            let favorite = command.is_favorite;
            category.touch(now);
            Ok(favorite)
        })
    }

    /// Move a command between positions within its category
    ///
    /// Returns `false` without changing anything when the positions are equal
    /// or out of range.
    pub fn move_command(&mut self, category_id: Uuid, from: usize, to: usize) -> Result<bool> {
        let len = self.commands(category_id)?.len();
        if from == to || from >= len || to >= len {
            return Ok(false);
        }

        self.commit(|categories| {
            let now = Utc::now();
            let category = category_mut(categories, category_id)?;
            move_within(&mut category.commands, from, to);
            renumber(&mut category.commands);
            category.commands[to].touch(now);
            category.touch(now);
            Ok(())
        })?;

        debug!(%category_id, from, to, "moved command");
        Ok(true)
    }

    /// Place a command's content on the clipboard
    pub fn copy_command(
        &self,
        category_id: Uuid,
        command_id: Uuid,
        clipboard: &mut dyn Clipboard,
    ) -> Result<&Command> {
        let command = self
            .commands(category_id)?
            .iter()
            .find(|c| c.id == command_id)
            .ok_or(SheetError::CommandNotFound(command_id))?;

        if !clipboard.copy(&command.content) {
            warn!(%command_id, "clipboard copy failed");
            return Err(SheetError::Clipboard);
        }
        Ok(command)
    }

    // Bulk transfer

    /// Import a `[{name, prompt}]` payload
    ///
    /// Creates a new timestamp-labelled category unless `into` names an
    /// existing one. Entries are appended in array order, verbatim. A payload
    /// that fails to decode writes nothing.
    pub fn import_json(&mut self, bytes: &[u8], into: Option<Uuid>) -> Result<ImportSummary> {
        let entries = transfer::parse_entries(bytes)?;
        let ids: Vec<Uuid> = entries.iter().map(|_| self.storage.generate_id()).collect();

        let target = match into {
            Some(id) => {
                let category = self.category(id).ok_or(SheetError::CategoryNotFound(id))?;
                (category.id, category.name.clone(), false)
            }
            None => (self.storage.generate_id(), import_label(), true),
        };
        let (category_id, category_name, created_category) = target;

        self.commit(|categories| {
            let now = Utc::now();
            if created_category {
                let order = next_order(categories.iter().filter(|c| !c.is_pinned).count());
                categories.push(Category::new(category_id, category_name.clone(), order, now));
            }

            let category = category_mut(categories, category_id)?;
            for (entry, id) in entries.iter().zip(&ids) {
                let order = next_order(category.commands.len());
                category.commands.push(Command::new(
                    *id,
                    entry.name.clone(),
                    entry.prompt.clone(),
                    order,
                    now,
                ));
            }
            category.touch(now);
            Ok(())
        })?;

        info!(%category_id, category = %category_name, imported = entries.len(), "imported commands");
        Ok(ImportSummary {
            category_id,
            category_name,
            created_category,
            imported: entries.len(),
        })
    }

    /// Export a category's commands as a `[{name, prompt}]` array
    pub fn export_json(&self, category_id: Uuid) -> Result<String> {
        let commands = self.commands(category_id)?;
        transfer::to_json(commands).map_err(|e| SheetError::Persistence(StorageError::Encode(e)))
    }

    /// Fill an empty library with starter categories
    ///
    /// Returns the number of categories created.
    pub fn seed_samples(&mut self) -> Result<usize> {
        if !self.is_empty() {
            return Err(SheetError::NotEmpty);
        }

        let ids: Vec<(Uuid, Vec<Uuid>)> = SAMPLES
            .iter()
            .map(|(_, _, commands)| {
                let command_ids = commands.iter().map(|_| self.storage.generate_id()).collect();
                (self.storage.generate_id(), command_ids)
            })
            .collect();

        self.commit(|categories| {
            let now = Utc::now();
            for ((name, pinned, commands), (id, command_ids)) in SAMPLES.iter().zip(&ids) {
                let order = next_order(categories.iter().filter(|c| c.is_pinned == *pinned).count());
                let mut category = Category::new(*id, name.to_string(), order, now);
                category.is_pinned = *pinned;
                category.commands = commands
                    .iter()
                    .zip(command_ids)
                    .enumerate()
                    .map(|(i, ((name, content), id))| {
                        Command::new(*id, name.to_string(), content.to_string(), i as u32, now)
                    })
                    .collect();
                categories.push(category);
            }
            sort_for_display(categories);
            Ok(())
        })?;

        info!(categories = SAMPLES.len(), "seeded sample data");
        Ok(SAMPLES.len())
    }
}

fn by_position<'a, T>(items: &'a [T], query: &str) -> Option<&'a T> {
    query
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| items.get(i))
}

/// Unique match on a hyphen-insensitive id prefix of at least four characters
fn by_id_prefix<'a, T>(items: &'a [T], query: &str, id: impl Fn(&T) -> Uuid) -> Option<&'a T> {
    let needle = query.to_ascii_lowercase().replace('-', "");
    if needle.len() < 4 {
        return None;
    }
    let mut matches = items
        .iter()
        .filter(|item| id(*item).simple().to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Some(item),
        _ => None,
    }
}

/// Top-level application state: the library plus the selected category
#[derive(Debug)]
pub struct AppState {
    pub library: Library,
    pub selected_category: Option<Uuid>,
}

impl AppState {
    /// A selection that no longer resolves is dropped
    pub fn new(library: Library, selected_category: Option<Uuid>) -> Self {
        let selected_category = selected_category.filter(|id| library.category(*id).is_some());
        Self {
            library,
            selected_category,
        }
    }

    pub fn select(&mut self, id: Uuid) -> Result<()> {
        if self.library.category(id).is_none() {
            return Err(SheetError::CategoryNotFound(id));
        }
        self.selected_category = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_category = None;
    }

    pub fn selected(&self) -> Option<&Category> {
        self.selected_category.and_then(|id| self.library.category(id))
    }

    pub fn delete_category(&mut self, id: Uuid) -> Result<Category> {
        self.library.delete_category(id, &mut self.selected_category)
    }
}
