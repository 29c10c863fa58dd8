//! Settings command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::FromCommand;
use crate::config::WorkspaceReportConfig;

/// Execute the settings command, showing the effective settings
pub fn execute_settings_command(command: Commands) -> Result<()> {
    let config = WorkspaceReportConfig::from_command(command)
        .wrap_err("Failed to parse settings command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::settings::SettingsExecutor;
    SettingsExecutor::execute(config)
}
