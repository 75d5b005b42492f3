//! Import/export commands - Move commands in and out as `[{name, prompt}]` JSON

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::io::{self, Read};

use super::utils;
use cheatsheet::config::Config;
use cheatsheet::sheet::ImportSummary;

/// Import commands from a file, or stdin when `input` is omitted or `-`
///
/// A new category is created (and selected) unless `into` names one.
pub fn import(config: &Config, input: Option<&str>, into: Option<&str>) -> Result<ImportSummary> {
    let bytes = match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
        Some(path) => fs::read(path).with_context(|| format!("Failed to read: {}", path))?,
    };

    let mut state = utils::open_state(config)?;
    let into = into
        .map(|q| utils::resolve_category(&state, Some(q)))
        .transpose()?;

    let summary = state.library.import_json(&bytes, into)?;
    if summary.created_category {
        state.select(summary.category_id)?;
        utils::save_selection(config, &state)?;
    }
    Ok(summary)
}

pub fn format_summary(summary: &ImportSummary) -> String {
    let verb = if summary.created_category {
        "into new category"
    } else {
        "into"
    };
    format!(
        "{} {} command(s) {} {}",
        "Imported".green(),
        summary.imported,
        verb,
        summary.category_name
    )
}

/// Export a category to `output`, or return the JSON for stdout
pub fn export(config: &Config, category: Option<&str>, output: Option<&str>) -> Result<Option<String>> {
    let state = utils::open_state(config)?;
    let category_id = utils::resolve_category(&state, category)?;
    let json = state.library.export_json(category_id)?;

    match output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write: {}", path))?;
            println!("Exported to: {}", path);
            Ok(None)
        }
        None => Ok(Some(json)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheatsheet::config::Backend;
    use tempfile::TempDir;

    #[test]
    fn test_export_then_import_into_new_category() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(Some(dir.path().join("data")), Backend::Json).unwrap();

        let mut state = utils::open_state(&config).unwrap();
        let git = state.library.create_category("Git").unwrap();
        state.library.create_command(git, "status", "git status").unwrap();
        state.library.create_command(git, "log", "git log --oneline").unwrap();
        drop(state);

        let file = dir.path().join("git.json");
        let file = file.to_str().unwrap();
        assert!(export(&config, Some("Git"), Some(file)).unwrap().is_none());

        let summary = import(&config, Some(file), None).unwrap();
        assert!(summary.created_category);
        assert_eq!(summary.imported, 2);
        assert!(summary.category_name.starts_with("Imported "));

        let state = utils::open_state(&config).unwrap();
        assert_eq!(state.selected_category, Some(summary.category_id));
        let names: Vec<_> = state
            .library
            .commands(summary.category_id)
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["status", "log"]);
    }

    #[test]
    fn test_import_into_existing_category() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(Some(dir.path().join("data")), Backend::Sqlite).unwrap();

        let mut state = utils::open_state(&config).unwrap();
        let docker = state.library.create_category("Docker").unwrap();
        state.library.create_command(docker, "ps", "docker ps").unwrap();
        drop(state);

        let file = dir.path().join("more.json");
        fs::write(&file, r#"[{"name":"images","prompt":"docker images"}]"#).unwrap();

        let summary = import(&config, file.to_str(), Some("docker")).unwrap();
        assert!(!summary.created_category);
        assert_eq!(summary.category_id, docker);
        assert!(format_summary(&summary).contains("1 command(s) into Docker"));

        let state = utils::open_state(&config).unwrap();
        assert_eq!(state.library.commands(docker).unwrap().len(), 2);
        assert!(state.selected_category.is_none());
    }

    #[test]
    fn test_import_rejects_bad_file_without_writing() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(Some(dir.path().join("data")), Backend::Json).unwrap();

        let file = dir.path().join("bad.json");
        fs::write(&file, r#"{"name":"not an array"}"#).unwrap();
        assert!(import(&config, file.to_str(), None).is_err());

        let state = utils::open_state(&config).unwrap();
        assert!(state.library.is_empty());
    }

    #[test]
    fn test_export_to_stdout() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(Some(dir.path().to_path_buf()), Backend::Json).unwrap();

        let mut state = utils::open_state(&config).unwrap();
        let id = state.library.create_category("Empty").unwrap();
        state.select(id).unwrap();
        utils::save_selection(&config, &state).unwrap();

        let json = export(&config, None, None).unwrap().unwrap();
        assert_eq!(json.trim(), "[]");
    }
}
