//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::cli::GraphFormat;
use crate::settings::SettingsOverrides;

/// Common arguments shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Workspace root (defaults to current directory)
    #[arg(long, value_name = "DIR", env = "WEB_DEPCRUISER_ROOT")]
    pub root: Option<PathBuf>,

    /// Follow node_modules one level deep and collapse them (true), or
    /// exclude them entirely (false)
    #[arg(long, value_name = "BOOL", env = "WEB_DEPCRUISER_INCLUDE_NODE_MODULES")]
    pub include_node_modules: Option<bool>,

    /// Path pattern collapsed (or excluded) into a single node
    #[arg(long, value_name = "REGEX", env = "WEB_DEPCRUISER_COLLAPSE_PATTERN")]
    pub collapse_pattern: Option<String>,

    /// Source directory scanned in reaches mode
    #[arg(long, value_name = "DIR", env = "WEB_DEPCRUISER_SOURCE_DIR")]
    pub source_dir: Option<String>,

    /// Graphviz dot executable
    #[arg(long, value_name = "PATH", env = "WEB_DEPCRUISER_DOT_PATH")]
    pub dot_path: Option<String>,

    /// Command used to invoke dependency-cruiser
    #[arg(long, value_name = "COMMAND", env = "WEB_DEPCRUISER_DEPCRUISE_COMMAND")]
    pub depcruise_command: Option<String>,

    /// Seconds a whole run (analysis plus layout) may take before the
    /// running tool is killed
    #[arg(long, value_name = "SECONDS", env = "WEB_DEPCRUISER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum bytes accepted from a tool's output
    #[arg(long, value_name = "BYTES", env = "WEB_DEPCRUISER_MAX_OUTPUT")]
    pub max_output: Option<usize>,

    /// Print the commands being run
    #[arg(short, long, env = "WEB_DEPCRUISER_VERBOSE")]
    pub verbose: bool,
}

/// Arguments controlling the generated graph and where it goes
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Graph format (defaults to the configured format)
    #[arg(short, long, value_enum, env = "WEB_DEPCRUISER_FORMAT")]
    pub format: Option<GraphFormat>,

    /// Save the graph under .cruise/ as dependency-<mode>-<name>.<ext>
    #[arg(long, env = "WEB_DEPCRUISER_SAVE")]
    pub save: bool,

    /// Save the graph to this path
    #[arg(short, long, env = "WEB_DEPCRUISER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Open the preview page in the browser
    #[arg(long, env = "WEB_DEPCRUISER_OPEN")]
    pub open: bool,
}

/// Common report format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "WEB_DEPCRUISER_REPORT_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

impl CommonArgs {
    /// Get the workspace root, using the current directory if none provided
    pub fn get_root(&self) -> PathBuf {
        let root = self
            .root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        std::path::absolute(&root).unwrap_or(root)
    }

    /// Settings given on the command line or through the environment
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            include_node_modules: self.include_node_modules,
            collapse_pattern: self.collapse_pattern.clone(),
            source_dir: self.source_dir.clone(),
            dot_path: self.dot_path.clone(),
            depcruise_command: self.depcruise_command.clone(),
            timeout_secs: self.timeout,
            max_output_bytes: self.max_output,
            ..SettingsOverrides::default()
        }
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::WebDepcruiserError>;
}

/// Trait for configurations that can be created from CLI commands
pub trait FromCommand: Sized {
    /// Create the configuration from the matching command variant
    fn from_command(
        command: crate::cli::Commands,
    ) -> Result<Self, crate::error::WebDepcruiserError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::WebDepcruiserError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
