pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::query::{DateWindow, SortMode};

#[derive(Parser)]
#[command(name = "easel")]
#[command(about = "A terminal drawing-prompt topic manager", long_about = None)]
pub struct Cli {
    /// Directory containing topics.json / topics.csv
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path of the progress database
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List topics, filtered and sorted
    List {
        /// Restrict to a completion-date window
        #[arg(short, long, value_enum, default_value_t = DateWindow::All)]
        window: DateWindow,

        /// Only topics in this exact category
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive substring match on title and category
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortMode::DateDesc)]
        sort: SortMode,
    },
    /// List the distinct categories
    Categories,
    /// Pick a random not-yet-done topic
    Pick,
    /// Toggle a topic's done state
    Done {
        /// Topic id (as shown by `list`)
        id: String,
    },
    /// Add a topic of your own
    Add {
        /// Topic title
        title: String,

        /// An existing category to file it under
        #[arg(short, long)]
        category: Option<String>,

        /// A new category name (wins over --category)
        #[arg(long)]
        new_category: Option<String>,
    },
    /// Launch the TUI
    Tui,
}
