//! Command implementations for the web-depcruiser CLI
//!
//! - graph: graph the dependencies of a single file
//! - project: graph the whole workspace
//! - files: list the files that can be graphed
//! - settings: show the effective settings

pub mod files;
pub mod graph;
pub mod settings;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Graph { .. } | Commands::Project { .. } => graph::execute_graph_command(command),
        Commands::Files { .. } => files::execute_files_command(command),
        Commands::Settings { .. } => settings::execute_settings_command(command),
    }
}
