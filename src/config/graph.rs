//! Graph command configuration

use std::path::PathBuf;

use crate::cli::{GraphFormat, Mode};
use crate::settings::SettingsOverrides;

/// What to graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphTarget {
    /// A single source file
    File(PathBuf),
    /// The whole workspace
    Project,
}

/// Configuration for the `graph` and `project` commands
///
/// Mode and format stay optional here; unset values fall back to the
/// configured defaults once settings are loaded.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Workspace root; the tools run from here
    pub root: PathBuf,
    pub target: GraphTarget,
    pub mode: Option<Mode>,
    pub format: Option<GraphFormat>,
    /// Settings given on the command line
    pub overrides: SettingsOverrides,
    /// Save under the output directory with the conventional name
    pub save: bool,
    /// Save to an explicit path
    pub output: Option<PathBuf>,
    /// Open the preview page in a browser
    pub open: bool,
    pub verbose: bool,
}

impl GraphConfig {
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphConfigBuilder {
    root: Option<PathBuf>,
    target: Option<GraphTarget>,
    mode: Option<Option<Mode>>,
    format: Option<Option<GraphFormat>>,
    overrides: Option<SettingsOverrides>,
    save: Option<bool>,
    output: Option<Option<PathBuf>>,
    open: Option<bool>,
    verbose: Option<bool>,
}

impl GraphConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_target(mut self, target: GraphTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_mode(mut self, mode: Option<Mode>) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_format(mut self, format: Option<GraphFormat>) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = Some(save);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }
}

impl crate::common::ConfigBuilder for GraphConfigBuilder {
    type Config = GraphConfig;

    fn build(self) -> Result<Self::Config, crate::error::WebDepcruiserError> {
        let missing = |field: &str| crate::error::WebDepcruiserError::ConfigurationError {
            message: format!("Missing required field: {field}"),
        };

        let target = self.target.ok_or_else(|| missing("target"))?;
        if let GraphTarget::File(path) = &target
            && path.as_os_str().is_empty()
        {
            return Err(missing("target"));
        }

        Ok(GraphConfig {
            root: self.root.ok_or_else(|| missing("root"))?,
            target,
            mode: self.mode.unwrap_or_default(),
            format: self.format.unwrap_or_default(),
            overrides: self.overrides.unwrap_or_default(),
            save: self.save.unwrap_or(false),
            output: self.output.unwrap_or_default(),
            open: self.open.unwrap_or(false),
            verbose: self.verbose.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    #[test]
    fn test_builder_requires_target() {
        let result = GraphConfig::builder()
            .with_root(PathBuf::from("/work"))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_empty_file_target() {
        let result = GraphConfig::builder()
            .with_root(PathBuf::from("/work"))
            .with_target(GraphTarget::File(PathBuf::new()))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = GraphConfig::builder()
            .with_root(PathBuf::from("/work"))
            .with_target(GraphTarget::Project)
            .build()
            .unwrap();

        assert_eq!(config.mode, None);
        assert_eq!(config.format, None);
        assert!(!config.save);
        assert!(!config.open);
    }
}
