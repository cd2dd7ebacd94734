use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "etd")]
#[command(about = "EasyToDo Todo List Manager")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to a list
    Add {
        /// Task name
        name: String,
        /// Target list index (defaults to the selected list)
        #[arg(long)]
        list: Option<usize>,
    },

    /// List tasks
    List {
        /// Show completed tasks even when settings hide them
        #[arg(long)]
        all: bool,
        /// Target list index (defaults to the selected list)
        #[arg(long)]
        list: Option<usize>,
    },

    /// Toggle a task's completion flag
    Toggle {
        /// Task index
        index: usize,
        /// Target list index (defaults to the selected list)
        #[arg(long)]
        list: Option<usize>,
    },

    /// Rename a task
    Rename {
        /// Task index
        index: usize,
        /// New task name
        name: String,
        /// Target list index (defaults to the selected list)
        #[arg(long)]
        list: Option<usize>,
    },

    /// Remove a task
    Remove {
        /// Task index
        index: usize,
        /// Target list index (defaults to the selected list)
        #[arg(long)]
        list: Option<usize>,
    },

    /// Show all lists
    Lists,

    /// Add a new list
    AddList {
        /// List name (unnamed when omitted)
        name: Option<String>,
    },

    /// Rename a list
    RenameList {
        /// List index
        index: usize,
        /// New list name
        name: String,
    },

    /// Remove a list
    RemoveList {
        /// List index
        index: usize,
    },

    /// Select the list that task commands operate on by default
    Use {
        /// List index
        index: usize,
    },

    /// Show or hide completed tasks in list output
    ShowCompleted {
        /// true to show, false to hide
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Enable or disable diagnostic logging
    Logging {
        /// true to enable
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Delete the data file
    Reset,

    /// Start MCP server
    Mcp,
}
