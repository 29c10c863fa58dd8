//! Graph and project command implementation

use miette::{Result, WrapErr};

use crate::cli::{Commands, Mode};
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{GraphConfig, GraphTarget};
use crate::error::WebDepcruiserError;

impl FromCommand for GraphConfig {
    fn from_command(command: Commands) -> Result<Self, WebDepcruiserError> {
        match command {
            Commands::Graph {
                file,
                mode,
                common,
                output,
            } => GraphConfig::builder()
                .with_root(common.get_root())
                .with_target(GraphTarget::File(file))
                .with_mode(mode)
                .with_format(output.format)
                .with_overrides(common.overrides())
                .with_save(output.save)
                .with_output(output.output)
                .with_open(output.open)
                .with_verbose(common.verbose)
                .build(),
            Commands::Project { common, output } => GraphConfig::builder()
                .with_root(common.get_root())
                .with_target(GraphTarget::Project)
                .with_mode(Some(Mode::Deps))
                .with_format(output.format)
                .with_overrides(common.overrides())
                .with_save(output.save)
                .with_output(output.output)
                .with_open(output.open)
                .with_verbose(common.verbose)
                .build(),
            _ => Err(WebDepcruiserError::ConfigurationError {
                message: "Invalid command type for GraphConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GraphConfig);

/// Execute the graph or project command
pub fn execute_graph_command(command: Commands) -> Result<()> {
    let config = GraphConfig::from_command(command)
        .wrap_err("Failed to parse graph command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, GraphFormat};

    #[test]
    fn test_project_command_is_deps_over_whole_workspace() {
        let cli = Cli::try_parse_from(["web-depcruiser", "project", "--root", "/work", "-f", "png"])
            .unwrap();

        let config = GraphConfig::try_from(cli.command).unwrap();

        assert_eq!(config.root, PathBuf::from("/work"));
        assert_eq!(config.target, GraphTarget::Project);
        assert_eq!(config.mode, Some(Mode::Deps));
        assert_eq!(config.format, Some(GraphFormat::Png));
    }

    #[test]
    fn test_graph_command_carries_overrides() {
        let cli = Cli::try_parse_from([
            "web-depcruiser",
            "graph",
            "src/a.ts",
            "--root",
            "/work",
            "--include-node-modules",
            "false",
            "--save",
        ])
        .unwrap();

        let config = GraphConfig::try_from(cli.command).unwrap();

        assert_eq!(config.target, GraphTarget::File(PathBuf::from("src/a.ts")));
        assert_eq!(config.mode, None);
        assert_eq!(config.overrides.include_node_modules, Some(false));
        assert!(config.save);
    }

    #[test]
    fn test_files_command_is_not_a_graph_config() {
        let cli = Cli::try_parse_from(["web-depcruiser", "files"]).unwrap();

        assert!(GraphConfig::try_from(cli.command).is_err());
    }
}
