//! # Web DepCruiser - Dependency Graphs for JavaScript and TypeScript Files
//!
//! Web DepCruiser drives the [dependency-cruiser](https://github.com/sverweij/dependency-cruiser)
//! CLI to graph what a file depends on, or what depends on it, and renders the
//! result into a preview page. Image formats are laid out by Graphviz's `dot`.
//! The analysis itself is entirely up to those tools; this crate finds the
//! right config, builds the command lines, runs them safely and presents the
//! output.
//!
//! ## Main Components
//!
//! - **Resolver**: picks a project-local dependency-cruiser config, falling
//!   back to a bundled one
//! - **Depcruise**: builds argument vectors from a request and runs them with
//!   a timeout and an output bound
//! - **Preview**: turns the output into an HTML page and saves artifacts
//!
//! ## Usage
//!
//! ### Example: Graphing Who Imports a File
//!
//! ```no_run
//! use std::path::Path;
//!
//! use web_depcruiser::cli::{GraphFormat, Mode};
//! use web_depcruiser::common::ConfigBuilder;
//! use web_depcruiser::depcruise::{CommandBuilder, GraphRequest, ProcessRunner};
//! use web_depcruiser::preview::PresentedArtifact;
//! use web_depcruiser::resolver::ConfigResolver;
//! use web_depcruiser::settings::{Settings, SettingsOverrides};
//!
//! # fn main() -> miette::Result<()> {
//! let root = Path::new("/path/to/your/app");
//! let settings = Settings::load(root, &SettingsOverrides::default())?;
//!
//! // Step 1: Find the dependency-cruiser config
//! let config = ConfigResolver::new(root).resolve();
//!
//! // Step 2: Describe the graph
//! let request = GraphRequest::builder()
//!     .with_workspace_root(root)
//!     .with_target_path(root.join("src/components/Button.tsx"))
//!     .with_mode(Mode::Reaches)
//!     .with_format(GraphFormat::Svg)
//!     .with_include_node_modules(settings.include_node_modules)
//!     .with_collapse_pattern(settings.collapse_pattern.clone())
//!     .with_source_dir(settings.source_dir.clone())
//!     .build()?;
//!
//! // Step 3: Run dependency-cruiser | dot -Tsvg
//! let pipeline = CommandBuilder::from_settings(&settings).build(&request, &config);
//! let artifact = ProcessRunner::from_settings(root, &settings)
//!     .run_blocking(&pipeline, request.format)?;
//!
//! // Step 4: Save it
//! PresentedArtifact::present(&artifact).save(&root.join("button-reaches.svg"))?;
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod file_explorer;
mod progress;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod depcruise;
pub mod error;
pub mod executors;
pub mod preview;
pub mod resolver;
pub mod settings;

pub use common::ConfigBuilder;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
