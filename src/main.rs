//! cheatsheet: keep reusable shell commands in ordered, pinnable categories
//! and copy them to the clipboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cheatsheet::config::{Backend, Config};
use cheatsheet::logging::{self, Verbosity};
use cheatsheet::sheet::SystemClipboard;

mod commands;

#[derive(Parser)]
#[command(name = "cheatsheet")]
#[command(about = "Organize and copy frequently used commands", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "CHEATSHEET_HOME")]
    home: Option<PathBuf>,

    /// Storage backend
    #[arg(long, global = true, value_enum, env = "CHEATSHEET_BACKEND", default_value_t = Backend::Sqlite)]
    backend: Backend,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Silence all logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories, pinned first
    List {
        /// Show category ids
        #[arg(long)]
        with_id: bool,
    },

    /// Show the commands of a category
    Show {
        /// Category name, position, or id prefix (selected category if omitted)
        category: Option<String>,

        /// Show command ids
        #[arg(long)]
        with_id: bool,

        /// Show full multi-line content
        #[arg(long)]
        full: bool,
    },

    /// Select the category other commands act on by default
    Use {
        /// Category name, position, or id prefix (prints the selection if omitted)
        category: Option<String>,

        /// Clear the selection
        #[arg(long, conflicts_with = "category")]
        clear: bool,
    },

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Manage commands within a category
    #[command(subcommand)]
    Command(CommandCommands),

    /// Copy a command's content to the clipboard
    Copy {
        /// Command name, position, or id prefix
        command: String,

        /// Category (selected category if omitted)
        #[arg(short, long)]
        category: Option<String>,

        /// Print the content instead of copying
        #[arg(short, long)]
        print: bool,
    },

    /// Import commands from a `[{name, prompt}]` JSON file
    Import {
        /// Input file (reads stdin if omitted or `-`)
        file: Option<String>,

        /// Append to this category instead of creating a new one
        #[arg(long)]
        into: Option<String>,
    },

    /// Export a category's commands as `[{name, prompt}]` JSON
    Export {
        /// Category (selected category if omitted)
        category: Option<String>,

        /// Output file (prints to stdout if omitted)
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Add sample categories to an empty library
    Seed,

    /// Print where data is stored
    Path,
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a category at the end of the unpinned list
    Add {
        name: String,
    },

    /// Rename a category
    Rename {
        /// Category name, position, or id prefix
        category: String,

        /// New name
        name: String,
    },

    /// Delete a category and all its commands
    Rm {
        /// Category name, position, or id prefix
        category: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Pin or unpin a category
    Pin {
        /// Category name, position, or id prefix
        category: String,
    },

    /// Move a category to another position within its pinned/unpinned group
    Move {
        /// Current 1-based position
        from: usize,

        /// Target 1-based position
        to: usize,
    },
}

#[derive(Subcommand)]
enum CommandCommands {
    /// Add a command to the end of a category
    Add {
        /// Command name
        name: String,

        /// Command content
        content: Option<String>,

        /// Category (selected category if omitted)
        #[arg(short, long)]
        category: Option<String>,

        /// Read the content from the clipboard
        #[arg(long, conflicts_with = "content")]
        from_clipboard: bool,
    },

    /// Change a command's name or content
    Edit {
        /// Command name, position, or id prefix
        command: String,

        /// Category (selected category if omitted)
        #[arg(short, long)]
        category: Option<String>,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a command
    Rm {
        /// Command name, position, or id prefix
        command: String,

        /// Category (selected category if omitted)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Toggle a command's favorite flag
    Fav {
        /// Command name, position, or id prefix
        command: String,

        /// Category (selected category if omitted)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Move a command to another position within its category
    Move {
        /// Current 1-based position
        from: usize,

        /// Target 1-based position
        to: usize,

        /// Category (selected category if omitted)
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));
    let config = Config::resolve(cli.home, cli.backend)?;

    match cli.command {
        Commands::List { with_id } => {
            let options = commands::list::ListOptions { with_id };
            let output = commands::list::execute(&config, options)?;
            println!("{}", output);
        }

        Commands::Show {
            category,
            with_id,
            full,
        } => {
            let options = commands::show::ShowOptions {
                category,
                with_id,
                full,
            };
            let output = commands::show::execute(&config, options)?;
            println!("{}", output);
        }

        Commands::Use { category, clear } => {
            commands::category::select(&config, category.as_deref(), clear)?;
        }

        Commands::Category(command) => match command {
            CategoryCommands::Add { name } => commands::category::add(&config, &name)?,
            CategoryCommands::Rename { category, name } => {
                commands::category::rename(&config, &category, &name)?
            }
            CategoryCommands::Rm { category, yes } => {
                commands::category::remove(&config, &category, yes)?
            }
            CategoryCommands::Pin { category } => {
                commands::category::toggle_pin(&config, &category)?
            }
            CategoryCommands::Move { from, to } => {
                commands::category::reorder(&config, from, to)?;
            }
        },

        Commands::Command(command) => match command {
            CommandCommands::Add {
                name,
                content,
                category,
                from_clipboard,
            } => {
                let options = commands::command::AddOptions {
                    category,
                    name,
                    content,
                    from_clipboard,
                };
                commands::command::add(&config, options, &mut SystemClipboard)?;
            }
            CommandCommands::Edit {
                command,
                category,
                name,
                content,
            } => {
                let options = commands::command::EditOptions {
                    category,
                    command,
                    name,
                    content,
                };
                commands::command::edit(&config, options)?;
            }
            CommandCommands::Rm { command, category } => {
                commands::command::remove(&config, category.as_deref(), &command)?
            }
            CommandCommands::Fav { command, category } => {
                commands::command::toggle_favorite(&config, category.as_deref(), &command)?
            }
            CommandCommands::Move { from, to, category } => {
                commands::command::reorder(&config, category.as_deref(), from, to)?;
            }
        },

        Commands::Copy {
            command,
            category,
            print,
        } => {
            let output = commands::command::copy(
                &config,
                category.as_deref(),
                &command,
                print,
                &mut SystemClipboard,
            )?;
            println!("{}", output);
        }

        Commands::Import { file, into } => {
            let summary = commands::transfer::import(&config, file.as_deref(), into.as_deref())?;
            println!("{}", commands::transfer::format_summary(&summary));
        }

        Commands::Export { category, output } => {
            if let Some(json) =
                commands::transfer::export(&config, category.as_deref(), output.as_deref())?
            {
                println!("{}", json);
            }
        }

        Commands::Seed => commands::seed::execute(&config)?,

        Commands::Path => {
            println!("Backend: {}", config.backend);
            println!("Store:   {}", config.store_path().display());
            println!("State:   {}", config.state_path().display());
        }
    }

    Ok(())
}
