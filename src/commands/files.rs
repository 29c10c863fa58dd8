//! Files command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::WorkspaceReportConfig;
use crate::error::WebDepcruiserError;

impl FromCommand for WorkspaceReportConfig {
    fn from_command(command: Commands) -> Result<Self, WebDepcruiserError> {
        match command {
            Commands::Files { common, format } | Commands::Settings { common, format } => {
                WorkspaceReportConfig::builder()
                    .with_root(common.get_root())
                    .with_format(format.format)
                    .with_overrides(common.overrides())
                    .build()
            }
            _ => Err(WebDepcruiserError::ConfigurationError {
                message: "Invalid command type for WorkspaceReportConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(WorkspaceReportConfig);

/// Execute the files command, listing graphable source files
pub fn execute_files_command(command: Commands) -> Result<()> {
    let config = WorkspaceReportConfig::from_command(command)
        .wrap_err("Failed to parse files command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::files::FilesExecutor;
    FilesExecutor::execute(config)
}
