//! Command commands - Add, edit, delete, favorite, reorder, and copy commands

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;

use super::utils;
use cheatsheet::config::Config;
use cheatsheet::sheet::Clipboard;

/// Arguments for adding a command
pub struct AddOptions {
    pub category: Option<String>,
    pub name: String,
    pub content: Option<String>,
    /// Take the content from the clipboard
    pub from_clipboard: bool,
}

pub fn add(config: &Config, options: AddOptions, clipboard: &mut dyn Clipboard) -> Result<()> {
    let mut state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, options.category.as_deref())?;

    let content = match (options.content, options.from_clipboard) {
        (Some(content), false) => content,
        (None, true) => clipboard
            .paste()
            .context("Clipboard is empty or unavailable")?,
        (Some(_), true) => bail!("Give either content or --from-clipboard, not both"),
        (None, false) => bail!("Missing content (or pass --from-clipboard)"),
    };

    let id = state
        .library
        .create_command(category_id, &options.name, &content)?;
    let command = state
        .library
        .category(category_id)
        .and_then(|c| c.command(id))
        .context("Created command is missing")?;
    println!(
        "{} {} (#{})",
        "Added command:".green(),
        command.name,
        command.order + 1
    );
    Ok(())
}

/// Arguments for editing a command; omitted fields keep their value
pub struct EditOptions {
    pub category: Option<String>,
    pub command: String,
    pub name: Option<String>,
    pub content: Option<String>,
}

pub fn edit(config: &Config, options: EditOptions) -> Result<()> {
    if options.name.is_none() && options.content.is_none() {
        bail!("Nothing to change (pass --name and/or --content)");
    }

    let mut state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, options.category.as_deref())?;
    let command = utils::resolve_command(&state, category_id, &options.command)?;
    let command_id = command.id;
    let name = options.name.unwrap_or_else(|| command.name.clone());
    let content = options.content.unwrap_or_else(|| command.content.clone());

    state
        .library
        .update_command(category_id, command_id, &name, &content)?;
    println!("{} {}", "Updated command:".green(), name.trim());
    Ok(())
}

pub fn remove(config: &Config, category: Option<&str>, query: &str) -> Result<()> {
    let mut state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, category)?;
    let command_id = utils::resolve_command(&state, category_id, query)?.id;

    let removed = state.library.delete_command(category_id, command_id)?;
    println!("{} {}", "Deleted command:".green(), removed.name);
    Ok(())
}

pub fn toggle_favorite(config: &Config, category: Option<&str>, query: &str) -> Result<()> {
    let mut state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, category)?;
    let command = utils::resolve_command(&state, category_id, query)?;
    let (command_id, name) = (command.id, command.name.clone());

    if state.library.toggle_favorite(category_id, command_id)? {
        println!("{} {}", "Favorited:".green(), name);
    } else {
        println!("{} {}", "Unfavorited:".green(), name);
    }
    Ok(())
}

/// Move a command between 1-based positions within its category
///
/// Returns whether anything moved.
pub fn reorder(config: &Config, category: Option<&str>, from: usize, to: usize) -> Result<bool> {
    let mut state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, category)?;
    let moved = state.library.move_command(
        category_id,
        utils::position_to_index(from),
        utils::position_to_index(to),
    )?;

    if moved {
        println!("{} {} -> {}", "Moved command:".green(), from, to);
    } else {
        println!("{}", "Nothing moved (same position or out of range)".yellow());
    }
    Ok(moved)
}

/// Copy a command's content to the clipboard and return the line to print
///
/// With `print` the content itself is returned and the clipboard is not touched.
pub fn copy(
    config: &Config,
    category: Option<&str>,
    query: &str,
    print: bool,
    clipboard: &mut dyn Clipboard,
) -> Result<String> {
    let state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, category)?;
    let command = utils::resolve_command(&state, category_id, query)?;

    if print {
        return Ok(command.content.clone());
    }

    let command = state
        .library
        .copy_command(category_id, command.id, clipboard)?;
    Ok(format!("{} {}", "Copied:".green(), command.name))
}
