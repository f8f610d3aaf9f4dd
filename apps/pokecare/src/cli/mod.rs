//! # Pokecare CLI Module
//!
//! ## Available Commands
//!
//! - `list` - Show the roster
//! - `show` - Show one creature in detail
//! - `select` - Select a creature by id
//! - `next` / `prev` - Move the selection, wrapping around
//! - `feed`, `stone`, `potion` - Care actions
//! - `check` - Run the evolution check
//! - `task` - Add, complete or list tasks
//! - `reset` - Forget all saved state
//!
//! Commands that take an optional `ID` act on the selected creature when
//! it is omitted.

mod commands;

use crate::session::CareAction;
use clap::{Parser, Subcommand};
use pokecare_core::PetError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Pokecare - a virtual pet you raise through three forms.
#[derive(Parser, Debug)]
#[command(name = "pokecare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the save database
    #[arg(short = 'D', long, global = true, default_value = "pokecare.db")]
    pub database: PathBuf,

    /// Storage backend: "redb" (saved to disk) or "memory" (gone on exit)
    #[arg(short = 'B', long, global = true, default_value = "redb")]
    pub backend: String,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every creature
    List,

    /// Show one creature
    Show {
        /// Creature id (defaults to the selection)
        id: Option<String>,
    },

    /// Select a creature
    Select {
        /// Creature id
        id: String,
    },

    /// Select the next creature
    Next,

    /// Select the previous creature
    Prev,

    /// Feed a creature (+50 health, +50 happiness)
    Feed {
        /// Creature id (defaults to the selection)
        id: Option<String>,
    },

    /// Use an evolution stone (+200 health, +200 happiness)
    Stone {
        /// Creature id (defaults to the selection)
        id: Option<String>,
    },

    /// Use a potion (+100 health, -20 happiness)
    Potion {
        /// Creature id (defaults to the selection)
        id: Option<String>,
    },

    /// Run the evolution check
    Check {
        /// Creature id (defaults to the selection)
        id: Option<String>,
    },

    /// Manage the tasks that gate evolution
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Forget all saved state
    Reset,
}

/// Task subcommands.
#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// Add a pending task
    Add {
        /// Task title
        title: String,

        /// Creature id (defaults to the selection)
        #[arg(short, long)]
        id: Option<String>,

        /// Stage number the task gates (1-3, defaults to the current stage)
        #[arg(short, long)]
        stage: Option<u8>,
    },

    /// Complete a task
    Done {
        /// Task id
        task: u64,
    },

    /// List pending tasks
    List,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), PetError> {
    let config = crate::config::Config::load(cli.config.as_deref())?;
    let mut session = open_session(&cli.database, &cli.backend, &config)?;
    let json_mode = cli.json_mode;

    if cli.verbose {
        tracing::info!(
            database = %cli.database.display(),
            backend = %cli.backend,
            "session opened"
        );
    }

    match cli.command {
        Some(Commands::List) | None => cmd_list(&session, json_mode),
        Some(Commands::Show { id }) => cmd_show(&session, json_mode, id.as_deref()),
        Some(Commands::Select { id }) => cmd_select(&mut session, json_mode, Nav::To(&id)),
        Some(Commands::Next) => cmd_select(&mut session, json_mode, Nav::Next),
        Some(Commands::Prev) => cmd_select(&mut session, json_mode, Nav::Previous),
        Some(Commands::Feed { id }) => {
            cmd_care(&mut session, json_mode, id.as_deref(), CareAction::Feed)
        }
        Some(Commands::Stone { id }) => {
            cmd_care(&mut session, json_mode, id.as_deref(), CareAction::Stone)
        }
        Some(Commands::Potion { id }) => {
            cmd_care(&mut session, json_mode, id.as_deref(), CareAction::Potion)
        }
        Some(Commands::Check { id }) => cmd_check(&mut session, json_mode, id.as_deref()),
        Some(Commands::Task { action }) => match action {
            TaskAction::Add { title, id, stage } => {
                cmd_task_add(&mut session, json_mode, id.as_deref(), stage, &title)
            }
            TaskAction::Done { task } => cmd_task_done(&mut session, json_mode, task),
            TaskAction::List => cmd_task_list(&session, json_mode),
        },
        Some(Commands::Reset) => cmd_reset(&mut session, json_mode),
    }
}
