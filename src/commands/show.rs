//! Show command - List the commands of one category

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use uuid::Uuid;

use super::utils;
use cheatsheet::config::Config;
use cheatsheet::sheet::AppState;

/// Options for the show command
pub struct ShowOptions {
    /// Category name, position, or id prefix; the selected category if omitted
    pub category: Option<String>,
    /// Show command ids
    pub with_id: bool,
    /// Show full content instead of a one-line preview
    pub full: bool,
}

pub fn execute(config: &Config, options: ShowOptions) -> Result<String> {
    let state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, options.category.as_deref())?;
    render(&state, category_id, &options)
}

pub fn render(state: &AppState, category_id: Uuid, options: &ShowOptions) -> Result<String> {
    let commands = state.library.commands(category_id)?;
    let name = state
        .library
        .category(category_id)
        .map(|c| c.name.as_str())
        .unwrap_or_default();

    if commands.is_empty() {
        return Ok(format!(
            "{} has no commands. Add one with `cheatsheet command add -c {:?} <name> <content>`.",
            name, name
        ));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("#"), Cell::new("")];
    if options.with_id {
        header.push(Cell::new("ID"));
    }
    header.push(Cell::new("Name"));
    header.push(Cell::new("Command"));
    table.set_header(header);

    for (index, command) in commands.iter().enumerate() {
        let content = if options.full {
            command.content.clone()
        } else {
            let first_line = command.content.lines().next().unwrap_or_default();
            let preview = utils::truncate_str(first_line, 60);
            if command.content.lines().nth(1).is_some() && !preview.ends_with("...") {
                format!("{}...", preview)
            } else {
                preview
            }
        };

        let mut row = vec![
            Cell::new(index + 1),
            Cell::new(if command.is_favorite { "*" } else { "" }),
        ];
        if options.with_id {
            row.push(Cell::new(command.id));
        }
        row.push(Cell::new(&command.name));
        row.push(Cell::new(content));
        table.add_row(row);
    }

    let favorites = commands.iter().filter(|c| c.is_favorite).count();
    Ok(format!(
        "{}\n{}\n\n{} commands ({} favorite)",
        name,
        table,
        commands.len(),
        favorites
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheatsheet::sheet::{Library, MemoryStorage};

    fn options() -> ShowOptions {
        ShowOptions {
            category: None,
            with_id: false,
            full: false,
        }
    }

    #[test]
    fn test_render_commands_in_order() {
        let mut library = Library::open(Box::new(MemoryStorage::new())).unwrap();
        let id = library.create_category("Git").unwrap();
        library.create_command(id, "status", "git status").unwrap();
        let push = library.create_command(id, "push", "git push").unwrap();
        library.toggle_favorite(id, push).unwrap();
        let state = AppState::new(library, Some(id));

        let output = render(&state, id, &options()).unwrap();
        assert!(output.find("status").unwrap() < output.find("push").unwrap());
        assert!(output.contains("2 commands (1 favorite)"));
    }

    #[test]
    fn test_multiline_content_is_previewed() {
        let mut library = Library::open(Box::new(MemoryStorage::new())).unwrap();
        let id = library.create_category("Shell").unwrap();
        library
            .create_command(id, "loop", "for i in 1 2 3; do\n  echo $i\ndone")
            .unwrap();
        let state = AppState::new(library, None);

        let output = render(&state, id, &options()).unwrap();
        assert!(output.contains("for i in 1 2 3; do..."));
        assert!(!output.contains("done"));
    }

    #[test]
    fn test_render_empty_category() {
        let mut library = Library::open(Box::new(MemoryStorage::new())).unwrap();
        let id = library.create_category("Empty").unwrap();
        let state = AppState::new(library, None);
        assert!(render(&state, id, &options())
            .unwrap()
            .contains("has no commands"));
    }
}
