//! Seed command - Fill an empty library with starter categories

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use cheatsheet::config::Config;
use cheatsheet::sheet::SheetError;

pub fn execute(config: &Config) -> Result<()> {
    let mut state = utils::open_state(config)?;
    match state.library.seed_samples() {
        Ok(created) => {
            println!("{} {} sample categories", "Created".green(), created);
            Ok(())
        }
        Err(SheetError::NotEmpty) => {
            println!(
                "{}",
                "Library already has categories; nothing seeded.".yellow()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
