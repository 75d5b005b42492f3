//! Category commands - Add, rename, delete, pin, reorder, and select categories

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use cheatsheet::config::Config;

pub fn add(config: &Config, name: &str) -> Result<()> {
    let mut state = utils::open_state(config)?;
    let id = state.library.create_category(name)?;
    let category = state.library.category(id).map(|c| c.name.as_str()).unwrap_or(name);
    println!("{} {}", "Created category:".green(), category);
    Ok(())
}

pub fn rename(config: &Config, query: &str, name: &str) -> Result<()> {
    let mut state = utils::open_state(config)?;
    let id = utils::resolve_category(&state, Some(query))?;
    state.library.rename_category(id, name)?;
    println!("{} {}", "Renamed category to:".green(), name.trim());
    Ok(())
}

/// Delete a category with its commands, asking first unless `yes`
pub fn remove(config: &Config, query: &str, yes: bool) -> Result<()> {
    let mut state = utils::open_state(config)?;
    let id = utils::resolve_category(&state, Some(query))?;

    if !yes {
        let (name, count) = state
            .library
            .category(id)
            .map(|c| (c.name.clone(), c.commands.len()))
            .unwrap_or_default();
        if !utils::confirm(&format!("Delete {} and its {} command(s)?", name, count))? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let was_selected = state.selected_category == Some(id);
    let removed = state.delete_category(id)?;
    if was_selected {
        utils::save_selection(config, &state)?;
    }

    println!(
        "{} {} ({} command(s))",
        "Deleted:".green(),
        removed.name,
        removed.commands.len()
    );
    Ok(())
}

pub fn toggle_pin(config: &Config, query: &str) -> Result<()> {
    let mut state = utils::open_state(config)?;
    let id = utils::resolve_category(&state, Some(query))?;
    let pinned = state.library.toggle_pin(id)?;
    let name = state.library.category(id).map(|c| c.name.as_str()).unwrap_or_default();

    if pinned {
        println!("{} {}", "Pinned:".green(), name);
    } else {
        println!("{} {}", "Unpinned:".green(), name);
    }
    Ok(())
}

/// Move a category between 1-based display positions
///
/// Returns whether anything moved.
pub fn reorder(config: &Config, from: usize, to: usize) -> Result<bool> {
    let mut state = utils::open_state(config)?;
    let moved = state
        .library
        .move_category(utils::position_to_index(from), utils::position_to_index(to))?;

    if moved {
        println!("{} {} -> {}", "Moved category:".green(), from, to);
    } else {
        println!(
            "{}",
            "Nothing moved (same position, out of range, or across pinned/unpinned)".yellow()
        );
    }
    Ok(moved)
}

/// Select a category, show the selection, or clear it
pub fn select(config: &Config, query: Option<&str>, clear: bool) -> Result<()> {
    let mut state = utils::open_state(config)?;

    if clear {
        state.clear_selection();
        utils::save_selection(config, &state)?;
        println!("Selection cleared.");
        return Ok(());
    }

    match query {
        Some(q) => {
            let id = utils::resolve_category(&state, Some(q))?;
            state.select(id)?;
            utils::save_selection(config, &state)?;
            let name = state.selected().map(|c| c.name.as_str()).unwrap_or_default();
            println!("{} {}", "Selected:".green(), name);
        }
        None => match state.selected() {
            Some(category) => println!("{}", category.name),
            None => println!("{}", "No category selected.".dimmed()),
        },
    }
    Ok(())
}
