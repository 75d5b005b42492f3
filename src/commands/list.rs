//! List command - Show all categories in display order

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use super::utils;
use cheatsheet::config::Config;
use cheatsheet::sheet::AppState;

/// Options for the list command
pub struct ListOptions {
    /// Show category ids
    pub with_id: bool,
}

/// Execute the list command and return formatted output
pub fn execute(config: &Config, options: ListOptions) -> Result<String> {
    let state = utils::open_state(config)?;
    Ok(render(&state, &options))
}

/// Render the category table
pub fn render(state: &AppState, options: &ListOptions) -> String {
    let library = &state.library;
    if library.is_empty() {
        return "No categories yet. Add one with `cheatsheet category add <name>` \
                or load samples with `cheatsheet seed`."
            .to_string();
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
    header.push(Cell::new("Commands"));
    header.push(Cell::new("Updated"));
    table.set_header(header);

    for (index, category) in library.categories().iter().enumerate() {
        let mut marker = String::new();
        if state.selected_category == Some(category.id) {
            marker.push('>');
        }
        if category.is_pinned {
            marker.push('*');
        }

        let mut row = vec![Cell::new(index + 1), Cell::new(marker)];
        if options.with_id {
            row.push(Cell::new(category.id));
        }
        row.push(Cell::new(&category.name));
        row.push(Cell::new(category.commands.len()));
        row.push(Cell::new(utils::format_time(category.updated_at)));
        table.add_row(row);
    }

    let pinned = library.pinned().count();
    format!(
        "{}\n\n{} categories ({} pinned). * pinned, > selected",
        table,
        library.categories().len(),
        pinned
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheatsheet::sheet::{Library, MemoryStorage};

    fn state() -> AppState {
        let mut library = Library::open(Box::new(MemoryStorage::new())).unwrap();
        library.create_category("Docker").unwrap();
        let git = library.create_category("Git").unwrap();
        library.toggle_pin(git).unwrap();
        AppState::new(library, Some(git))
    }

    #[test]
    fn test_render_empty() {
        let library = Library::open(Box::new(MemoryStorage::new())).unwrap();
        let output = render(&AppState::new(library, None), &ListOptions { with_id: false });
        assert!(output.contains("cheatsheet seed"));
    }

    #[test]
    fn test_render_lists_pinned_first() {
        let output = render(&state(), &ListOptions { with_id: false });
        let git = output.find("Git").unwrap();
        let docker = output.find("Docker").unwrap();
        assert!(git < docker);
        assert!(output.contains(">*"));
        assert!(output.contains("2 categories (1 pinned)"));
    }

    #[test]
    fn test_render_with_id() {
        let state = state();
        let id = state.selected_category.unwrap().to_string();
        let output = render(&state, &ListOptions { with_id: true });
        assert!(output.contains(&id));
    }
}
