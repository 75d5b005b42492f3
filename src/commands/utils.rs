//! Shared utilities for commands

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use uuid::Uuid;

use cheatsheet::config::Config;
use cheatsheet::sheet::{AppState, Command, Library};

/// Per-user session state kept next to the store
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    #[serde(default)]
    pub selected_category: Option<Uuid>,
}

impl SessionFile {
    /// Read state.json; a missing file is an empty session
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse: {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read: {}", path.display())),
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write: {}", path.display()))?;
        Ok(())
    }
}

/// Load the library and the persisted selection
pub fn open_state(config: &Config) -> Result<AppState> {
    let storage = config.open_storage()?;
    let library = Library::open(storage).with_context(|| {
        format!("Failed to load store: {}", config.store_path().display())
    })?;
    let session = SessionFile::read(config.state_path())?;
    Ok(AppState::new(library, session.selected_category))
}

/// Persist the current selection
pub fn save_selection(config: &Config, state: &AppState) -> Result<()> {
    SessionFile {
        selected_category: state.selected_category,
    }
    .write(config.state_path())
}

/// Resolve a category argument, falling back to the selected category
pub fn resolve_category(state: &AppState, query: Option<&str>) -> Result<Uuid> {
    match query {
        Some(q) => state
            .library
            .find_category(q)
            .map(|c| c.id)
            .with_context(|| format!("No category matches {q:?}")),
        None => match state.selected_category {
            Some(id) => Ok(id),
            None => bail!("No category given and none selected (see `cheatsheet use`)"),
        },
    }
}

/// Resolve a command argument within a category
pub fn resolve_command<'a>(state: &'a AppState, category_id: Uuid, query: &str) -> Result<&'a Command> {
    state
        .library
        .find_command(category_id, query)
        .with_context(|| format!("No command matches {query:?}"))
}

/// Convert a 1-based position to an index; 0 maps to an out-of-range index
pub fn position_to_index(position: usize) -> usize {
    position.checked_sub(1).unwrap_or(usize::MAX)
}

/// Format a timestamp in local time
pub fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten to at most `max_chars` characters, replacing the tail with `...`
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Ask for a y/N confirmation on stdin
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N) ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
