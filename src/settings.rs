//! Effective settings
//!
//! Settings are merged from three layers, highest precedence first: CLI flags
//! (and their `WEB_DEPCRUISER_*` environment variables), the optional
//! `web-depcruiser.toml` in the workspace root, and the built-in defaults.

use std::path::Path;
use std::time::Duration;

use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::cli::{GraphFormat, Mode};
use crate::constants::defaults;
use crate::error::WebDepcruiserError;

/// Settings after all layers have been applied
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub include_node_modules: bool,
    pub collapse_pattern: String,
    pub source_dir: String,
    pub dot_path: String,
    pub depcruise_command: String,
    pub default_mode: Mode,
    pub default_format: GraphFormat,
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_node_modules: defaults::INCLUDE_NODE_MODULES,
            collapse_pattern: defaults::COLLAPSE_PATTERN.to_string(),
            source_dir: defaults::SOURCE_DIR.to_string(),
            dot_path: defaults::DOT_PATH.to_string(),
            depcruise_command: defaults::DEPCRUISE_COMMAND.to_string(),
            default_mode: Mode::Reaches,
            default_format: GraphFormat::Mmd,
            timeout: defaults::TIMEOUT,
            max_output_bytes: defaults::MAX_OUTPUT_BYTES,
        }
    }
}

/// One optional value per setting. Used both for the settings file and for
/// command-line overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsOverrides {
    pub include_node_modules: Option<bool>,
    pub collapse_pattern: Option<String>,
    pub source_dir: Option<String>,
    pub dot_path: Option<String>,
    pub depcruise_command: Option<String>,
    pub default_mode: Option<String>,
    pub default_format: Option<String>,
    #[serde(rename = "timeout")]
    pub timeout_secs: Option<u64>,
    #[serde(rename = "max-output")]
    pub max_output_bytes: Option<usize>,
}

/// Serializable view used by the `settings` command
#[derive(Debug, Serialize)]
pub struct SettingsReport<'a> {
    pub include_node_modules: bool,
    pub collapse_pattern: &'a str,
    pub source_dir: &'a str,
    pub dot_path: &'a str,
    pub depcruise_command: &'a str,
    pub default_mode: &'static str,
    pub default_format: &'static str,
    pub timeout_secs: u64,
    pub max_output_bytes: usize,
}

impl Settings {
    /// Load settings for a workspace, applying `overrides` last
    pub fn load(root: &Path, overrides: &SettingsOverrides) -> Result<Self, WebDepcruiserError> {
        let mut settings = Settings::default();

        let file = root.join(defaults::SETTINGS_FILE);
        if file.is_file() {
            settings.apply(&SettingsOverrides::parse_file(&file)?)?;
        }

        settings.apply(overrides)?;
        Ok(settings)
    }

    /// Apply every value present in `layer`
    pub fn apply(&mut self, layer: &SettingsOverrides) -> Result<(), WebDepcruiserError> {
        if let Some(include) = layer.include_node_modules {
            self.include_node_modules = include;
        }
        if let Some(pattern) = &layer.collapse_pattern {
            self.collapse_pattern = pattern.clone();
        }
        if let Some(dir) = &layer.source_dir {
            self.source_dir = dir.clone();
        }
        if let Some(dot) = &layer.dot_path {
            self.dot_path = dot.clone();
        }
        if let Some(command) = &layer.depcruise_command {
            match shlex::split(command) {
                None => {
                    return Err(WebDepcruiserError::ConfigurationError {
                        message: format!("depcruise-command has unbalanced quotes: {command}"),
                    });
                }
                Some(words) if words.is_empty() => {
                    return Err(WebDepcruiserError::ConfigurationError {
                        message: "depcruise-command must not be empty".to_string(),
                    });
                }
                Some(_) => self.depcruise_command = command.clone(),
            }
        }
        if let Some(mode) = &layer.default_mode {
            self.default_mode =
                Mode::from_name(mode).ok_or_else(|| WebDepcruiserError::ConfigurationError {
                    message: format!("Unknown default-mode '{mode}', expected deps or reaches"),
                })?;
        }
        if let Some(format) = &layer.default_format {
            self.default_format = GraphFormat::from_name(format);
        }
        if let Some(secs) = layer.timeout_secs {
            if secs == 0 {
                return Err(WebDepcruiserError::ConfigurationError {
                    message: "timeout must be at least one second".to_string(),
                });
            }
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(bytes) = layer.max_output_bytes {
            if bytes == 0 || bytes > defaults::MAX_OUTPUT_CEILING {
                return Err(WebDepcruiserError::ConfigurationError {
                    message: format!(
                        "max-output must be between 1 and {} bytes, got {bytes}",
                        defaults::MAX_OUTPUT_CEILING
                    ),
                });
            }
            self.max_output_bytes = bytes;
        }
        Ok(())
    }

    pub fn report(&self) -> SettingsReport<'_> {
        SettingsReport {
            include_node_modules: self.include_node_modules,
            collapse_pattern: &self.collapse_pattern,
            source_dir: &self.source_dir,
            dot_path: &self.dot_path,
            depcruise_command: &self.depcruise_command,
            default_mode: self.default_mode.as_str(),
            default_format: self.default_format.extension(),
            timeout_secs: self.timeout.as_secs(),
            max_output_bytes: self.max_output_bytes,
        }
    }
}

impl SettingsOverrides {
    pub fn parse_file(path: &Path) -> Result<Self, WebDepcruiserError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WebDepcruiserError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            WebDepcruiserError::TomlParseError(Box::new(crate::error::TomlParseError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.clone()),
                span,
                source: e,
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_settings_file() {
        let temp = TempDir::new().unwrap();

        let settings = Settings::load(temp.path(), &SettingsOverrides::default()).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(settings.include_node_modules);
        assert_eq!(settings.collapse_pattern, "^(node_modules|lib)/[^/]+");
        assert_eq!(settings.default_mode, Mode::Reaches);
        assert_eq!(settings.default_format, GraphFormat::Mmd);
    }

    #[test]
    fn test_settings_file_is_applied() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("web-depcruiser.toml"),
            r#"
include-node-modules = false
source-dir = "app"
default-mode = "deps"
default-format = "svg"
timeout = 30
"#,
        )
        .unwrap();

        let settings = Settings::load(temp.path(), &SettingsOverrides::default()).unwrap();

        assert!(!settings.include_node_modules);
        assert_eq!(settings.source_dir, "app");
        assert_eq!(settings.default_mode, Mode::Deps);
        assert_eq!(settings.default_format, GraphFormat::Svg);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_win_over_settings_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("web-depcruiser.toml"),
            "source-dir = \"app\"\ndot-path = \"/opt/graphviz/dot\"\n",
        )
        .unwrap();

        let overrides = SettingsOverrides {
            source_dir: Some("packages".to_string()),
            ..SettingsOverrides::default()
        };
        let settings = Settings::load(temp.path(), &overrides).unwrap();

        assert_eq!(settings.source_dir, "packages");
        assert_eq!(settings.dot_path, "/opt/graphviz/dot");
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("web-depcruiser.toml"), "source-dir = ").unwrap();

        let err = Settings::load(temp.path(), &SettingsOverrides::default()).unwrap_err();

        assert!(matches!(err, WebDepcruiserError::TomlParseError(_)));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let mut settings = Settings::default();
        let layer = SettingsOverrides {
            default_mode: Some("upstream".to_string()),
            ..SettingsOverrides::default()
        };

        let err = settings.apply(&layer).unwrap_err();
        assert!(err.to_string().contains("upstream"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut settings = Settings::default();
        let layer = SettingsOverrides {
            timeout_secs: Some(0),
            ..SettingsOverrides::default()
        };

        assert!(settings.apply(&layer).is_err());
    }

    #[test]
    fn test_max_output_out_of_range_is_rejected() {
        for bytes in [0, usize::MAX] {
            let mut settings = Settings::default();
            let layer = SettingsOverrides {
                max_output_bytes: Some(bytes),
                ..SettingsOverrides::default()
            };

            let err = settings.apply(&layer).unwrap_err();
            assert!(err.to_string().contains("max-output"), "{err}");
            assert_eq!(settings.max_output_bytes, defaults::MAX_OUTPUT_BYTES);
        }
    }

    #[test]
    fn test_quoted_depcruise_command_is_accepted() {
        let mut settings = Settings::default();
        let layer = SettingsOverrides {
            depcruise_command: Some(r#"node "/opt/my tools/depcruise.js""#.to_string()),
            ..SettingsOverrides::default()
        };

        settings.apply(&layer).unwrap();
        assert_eq!(settings.depcruise_command, r#"node "/opt/my tools/depcruise.js""#);
    }

    #[test]
    fn test_unbalanced_depcruise_command_is_rejected() {
        let mut settings = Settings::default();
        let layer = SettingsOverrides {
            depcruise_command: Some(r#"node "/opt/my tools/depcruise.js"#.to_string()),
            ..SettingsOverrides::default()
        };

        let err = settings.apply(&layer).unwrap_err();
        assert!(err.to_string().contains("unbalanced quotes"), "{err}");
    }

    #[test]
    fn test_unknown_settings_key_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("web-depcruiser.toml"), "timeout-secs = 5
").unwrap();

        let err = Settings::load(temp.path(), &SettingsOverrides::default()).unwrap_err();

        match err {
            WebDepcruiserError::TomlParseError(parse) => {
                assert!(parse.source.to_string().contains("timeout-secs"));
            }
            other => panic!("Expected TomlParseError, got {other:?}"),
        }
    }
}
