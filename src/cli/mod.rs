//! Command-line interface for tdl
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod add;
mod category;
mod done;
mod edit;
mod init;
mod list;
mod rm;
mod user;

/// tdl - personal to-do list manager
///
/// Organize items into categories, mark them complete, and filter and sort
/// the visible list. State lives in a per-user data directory.
#[derive(Parser, Debug)]
#[command(name = "tdl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "TDL_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory and seed default categories
    Init,

    /// Add an item to a category
    Add {
        /// Category name (e.g. "General")
        category: String,

        /// Item title
        title: String,

        /// Item description
        #[arg(default_value = "")]
        description: String,
    },

    /// Show the to-do list grouped by category
    List {
        /// Filter mode: no-filter, completed, not-completed (persisted)
        #[arg(long)]
        filter: Option<String>,

        /// Sort order: ascending, descending (persisted)
        #[arg(long)]
        order: Option<String>,
    },

    /// Toggle an item's completion flag
    Done {
        /// Item id (from `tdl list`)
        id: String,
    },

    /// Delete an item
    Rm {
        /// Item id (from `tdl list`)
        id: String,
    },

    /// Edit an item's title, description, or category
    Edit {
        /// Item id (from `tdl list`)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Move to this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Category management
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Username preference
    #[command(subcommand)]
    User(UserCommands),
}

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Add a category (no-op if the name already exists)
    Add {
        /// Category name; stored in title case
        name: String,
    },

    /// List categories with their item counts
    List,

    /// Remove a category that has no items
    Rm {
        /// Category name
        name: String,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Set the display username
    Set {
        /// Username recorded as creator on new items
        name: String,
    },

    /// Show the current username
    Show,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Init => init::run(self.data_dir, output),
            Commands::Add {
                category,
                title,
                description,
            } => add::run(add::AddOptions {
                category,
                title,
                description,
                data_dir: self.data_dir,
                output,
            }),
            Commands::List { filter, order } => list::run(list::ListOptions {
                filter,
                order,
                data_dir: self.data_dir,
                output,
            }),
            Commands::Done { id } => done::run(done::DoneOptions {
                id,
                data_dir: self.data_dir,
                output,
            }),
            Commands::Rm { id } => rm::run(rm::RmOptions {
                id,
                data_dir: self.data_dir,
                output,
            }),
            Commands::Edit {
                id,
                title,
                description,
                category,
            } => edit::run(edit::EditOptions {
                id,
                title,
                description,
                category,
                data_dir: self.data_dir,
                output,
            }),
            Commands::Category(cmd) => match cmd {
                CategoryCommands::Add { name } => {
                    category::run_add(self.data_dir, name, output)
                }
                CategoryCommands::List => category::run_list(self.data_dir, output),
                CategoryCommands::Rm { name } => category::run_rm(self.data_dir, name, output),
            },
            Commands::User(cmd) => match cmd {
                UserCommands::Set { name } => user::run_set(self.data_dir, name, output),
                UserCommands::Show => user::run_show(self.data_dir, output),
            },
        }
    }
}
