//! Settings command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::WorkspaceReportConfig;
use crate::constants::defaults::SETTINGS_FILE;
use crate::executors::CommandExecutor;
use crate::resolver::{ConfigResolver, ConfigSource};
use crate::settings::Settings;

pub struct SettingsExecutor;

impl CommandExecutor for SettingsExecutor {
    type Config = WorkspaceReportConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let settings = Settings::load(&config.root, &config.overrides)
            .wrap_err("Failed to load web-depcruiser settings")?;
        let resolved = ConfigResolver::new(&config.root).resolve();
        let settings_file = config.root.join(SETTINGS_FILE);
        let source = match resolved.source {
            ConfigSource::Project => "project",
            ConfigSource::Bundled => "bundled",
        };

        match config.format {
            OutputFormat::Human => {
                let report = settings.report();
                println!("{}", style("Web DepCruiser settings").bold().underlined());
                println!(
                    "  settings file         {}{}",
                    settings_file.display(),
                    if settings_file.is_file() { "" } else { " (not present)" }
                );
                println!(
                    "  dependency-cruiser    {} ({source})",
                    resolved.config_path.display()
                );
                println!("  include-node-modules  {}", report.include_node_modules);
                println!("  collapse-pattern      {}", report.collapse_pattern);
                println!("  source-dir            {}", report.source_dir);
                println!("  dot-path              {}", report.dot_path);
                println!("  depcruise-command     {}", report.depcruise_command);
                println!("  default-mode          {}", report.default_mode);
                println!("  default-format        {}", report.default_format);
                println!("  timeout               {}s", report.timeout_secs);
                println!("  max-output            {} bytes", report.max_output_bytes);
            }
            OutputFormat::Json => {
                let report = json!({
                    "settings_file": settings_file.display().to_string(),
                    "settings_file_present": settings_file.is_file(),
                    "config": {
                        "path": resolved.config_path.display().to_string(),
                        "source": source,
                    },
                    "settings": settings.report(),
                });
                println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            }
        }

        Ok(())
    }
}
