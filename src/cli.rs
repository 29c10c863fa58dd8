use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{CommonArgs, FormatArgs, OutputArgs};

#[derive(Parser)]
#[command(
    name = "web-depcruiser",
    about = "🕸 Render dependency-cruiser graphs for a file or a whole project",
    long_about = "web-depcruiser drives the dependency-cruiser CLI (and Graphviz's dot for image \
                  formats) to graph what a file depends on, or what depends on it. The result is \
                  written to a preview page that renders Mermaid, SVG and PNG output, and can be \
                  saved next to your sources.",
    subcommand_required = true,
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Graph the dependencies of a single file
    ///
    /// Runs dependency-cruiser for one file, either following its outgoing
    /// imports (deps) or scanning the source directory for everything that
    /// reaches it (reaches).
    #[command(
        long_about = "Generate a dependency graph for a single file. In 'deps' mode the file is \
                      the entry point and its imports are followed. In 'reaches' mode the source \
                      directory is scanned and only modules that (transitively) import the file \
                      are kept. Image formats are laid out by Graphviz's dot."
    )]
    Graph {
        /// File to graph
        #[arg(value_name = "FILE", env = "WEB_DEPCRUISER_FILE")]
        file: PathBuf,

        /// Dependency direction (defaults to the configured mode)
        #[arg(short, long, value_enum, env = "WEB_DEPCRUISER_MODE")]
        mode: Option<Mode>,

        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Graph the dependencies of the whole project
    #[command(
        long_about = "Generate a dependency graph for the entire workspace, using the workspace \
                      root as the dependency-cruiser entry point."
    )]
    Project {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the source files that can be graphed
    ///
    /// Walks the workspace and prints every JavaScript, TypeScript and Vue
    /// source file, skipping node_modules and hidden directories.
    Files {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Show the effective settings
    ///
    /// Prints the settings after merging web-depcruiser.toml, environment
    /// variables and flags, together with the dependency-cruiser config file
    /// that would be used.
    Settings {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Direction of the dependency traversal
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// What the file depends on
    Deps,
    /// What depends on the file
    Reaches,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Deps => "deps",
            Mode::Reaches => "reaches",
        }
    }

    /// Parse a mode name from a settings file
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "deps" => Some(Mode::Deps),
            "reaches" => Some(Mode::Reaches),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format of the generated graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    /// Mermaid source, rendered in the preview
    Mmd,
    /// Graphviz-rendered SVG
    Svg,
    /// Graphviz-rendered PNG
    Png,
    /// Raw Graphviz DOT source
    Dot,
}

impl GraphFormat {
    /// File extension of saved artifacts
    pub fn extension(&self) -> &'static str {
        match self {
            GraphFormat::Mmd => "mmd",
            GraphFormat::Svg => "svg",
            GraphFormat::Png => "png",
            GraphFormat::Dot => "dot",
        }
    }

    /// Parse a format name leniently; anything unrecognized is treated as DOT
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mmd" | "mermaid" => GraphFormat::Mmd,
            "svg" => GraphFormat::Svg,
            "png" => GraphFormat::Png,
            _ => GraphFormat::Dot,
        }
    }

    /// Whether Graphviz has to lay out the graph
    pub fn needs_layout(&self) -> bool {
        matches!(self, GraphFormat::Svg | GraphFormat::Png)
    }
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_graph_command_parses_mode_and_format() {
        let cli = Cli::try_parse_from([
            "web-depcruiser",
            "graph",
            "src/index.ts",
            "--mode",
            "deps",
            "--format",
            "svg",
        ])
        .unwrap();

        match cli.command {
            Commands::Graph { file, mode, output, .. } => {
                assert_eq!(file, PathBuf::from("src/index.ts"));
                assert_eq!(mode, Some(Mode::Deps));
                assert_eq!(output.format, Some(GraphFormat::Svg));
            }
            _ => panic!("Expected graph command"),
        }
    }

    #[test]
    fn test_format_from_name_falls_back_to_dot() {
        assert_eq!(GraphFormat::from_name("mmd"), GraphFormat::Mmd);
        assert_eq!(GraphFormat::from_name("mermaid"), GraphFormat::Mmd);
        assert_eq!(GraphFormat::from_name("PNG"), GraphFormat::Png);
        assert_eq!(GraphFormat::from_name("d2"), GraphFormat::Dot);
    }

    #[test]
    fn test_only_image_formats_need_layout() {
        assert!(GraphFormat::Svg.needs_layout());
        assert!(GraphFormat::Png.needs_layout());
        assert!(!GraphFormat::Mmd.needs_layout());
        assert!(!GraphFormat::Dot.needs_layout());
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(Mode::from_name("Reaches"), Some(Mode::Reaches));
        assert_eq!(Mode::from_name("deps"), Some(Mode::Deps));
        assert_eq!(Mode::from_name("sideways"), None);
    }
}
