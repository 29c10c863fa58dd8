//! Configuration for the `files` and `settings` commands

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::settings::SettingsOverrides;

#[derive(Debug, Clone)]
pub struct WorkspaceReportConfig {
    pub root: PathBuf,
    pub format: OutputFormat,
    pub overrides: SettingsOverrides,
}

impl WorkspaceReportConfig {
    pub fn builder() -> WorkspaceReportConfigBuilder {
        WorkspaceReportConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct WorkspaceReportConfigBuilder {
    root: Option<PathBuf>,
    format: Option<OutputFormat>,
    overrides: Option<SettingsOverrides>,
}

impl WorkspaceReportConfigBuilder {
    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

impl crate::common::ConfigBuilder for WorkspaceReportConfigBuilder {
    type Config = WorkspaceReportConfig;

    fn build(self) -> Result<Self::Config, crate::error::WebDepcruiserError> {
        Ok(WorkspaceReportConfig {
            root: self.root.ok_or_else(|| {
                crate::error::WebDepcruiserError::ConfigurationError {
                    message: "Missing required field: root".to_string(),
                }
            })?,
            format: self.format.unwrap_or(OutputFormat::Human),
            overrides: self.overrides.unwrap_or_default(),
        })
    }
}
