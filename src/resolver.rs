//! dependency-cruiser config discovery

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::cruiser::{BUNDLED_CONFIG, BUNDLED_CONFIG_FILE, CONFIG_CANDIDATES};
use crate::constants::output::OUTPUT_DIR;

/// Where a resolved config came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// A config file checked into the workspace
    Project,
    /// The config shipped with web-depcruiser
    Bundled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub config_path: PathBuf,
    pub source: ConfigSource,
}

/// Picks the dependency-cruiser config for a workspace
pub struct ConfigResolver {
    candidates: Vec<PathBuf>,
    bundled: PathBuf,
}

impl ConfigResolver {
    /// Resolver using the standard candidate list and the bundled config
    /// location under the workspace output directory
    pub fn new(root: &Path) -> Self {
        Self::with_bundled(root, bundled_config_path(root))
    }

    pub fn with_bundled(root: &Path, bundled: PathBuf) -> Self {
        Self {
            candidates: CONFIG_CANDIDATES.iter().map(|c| root.join(c)).collect(),
            bundled,
        }
    }

    /// First candidate that exists, else the bundled default. Never fails.
    pub fn resolve(&self) -> ResolvedConfig {
        self.candidates
            .iter()
            .find(|candidate| candidate.is_file())
            .map(|path| ResolvedConfig {
                config_path: path.clone(),
                source: ConfigSource::Project,
            })
            .unwrap_or_else(|| ResolvedConfig {
                config_path: self.bundled.clone(),
                source: ConfigSource::Bundled,
            })
    }
}

pub fn bundled_config_path(root: &Path) -> PathBuf {
    root.join(OUTPUT_DIR).join(BUNDLED_CONFIG_FILE)
}

/// Write the bundled config to `config.config_path` unless it is already there
pub fn ensure_bundled_config(config: &ResolvedConfig) -> std::io::Result<()> {
    if config.source != ConfigSource::Bundled || config.config_path.is_file() {
        return Ok(());
    }
    if let Some(parent) = config.config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config.config_path, BUNDLED_CONFIG)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_json_config_is_found_without_commonjs_variants() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".dependency-cruiser.json"), "{}").unwrap();

        let resolved = ConfigResolver::new(temp.path()).resolve();

        assert_eq!(resolved.config_path, temp.path().join(".dependency-cruiser.json"));
        assert_eq!(resolved.source, ConfigSource::Project);
    }

    #[test]
    fn test_commonjs_config_wins_over_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".dependency-cruiser.json"), "{}").unwrap();
        fs::write(temp.path().join("dependency-cruiser.config.cjs"), "").unwrap();

        let resolved = ConfigResolver::new(temp.path()).resolve();

        assert_eq!(
            resolved.config_path,
            temp.path().join("dependency-cruiser.config.cjs")
        );
    }

    #[test]
    fn test_falls_back_to_bundled_default() {
        let temp = TempDir::new().unwrap();
        let bundled = PathBuf::from("/opt/web-depcruiser/.dependency-cruiser.cjs");

        let resolved = ConfigResolver::with_bundled(temp.path(), bundled.clone()).resolve();

        assert_eq!(resolved.config_path, bundled);
        assert_eq!(resolved.source, ConfigSource::Bundled);
    }

    #[test]
    fn test_directory_named_like_candidate_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".dependency-cruiser.js")).unwrap();

        let resolved = ConfigResolver::new(temp.path()).resolve();

        assert_eq!(resolved.source, ConfigSource::Bundled);
    }

    #[test]
    fn test_ensure_bundled_config_writes_once() {
        let temp = TempDir::new().unwrap();
        let resolved = ConfigResolver::new(temp.path()).resolve();

        ensure_bundled_config(&resolved).unwrap();
        let written = fs::read_to_string(&resolved.config_path).unwrap();
        assert_eq!(written, BUNDLED_CONFIG);

        fs::write(&resolved.config_path, "// edited").unwrap();
        ensure_bundled_config(&resolved).unwrap();
        assert_eq!(fs::read_to_string(&resolved.config_path).unwrap(), "// edited");
    }

    #[test]
    fn test_ensure_bundled_config_leaves_project_configs_alone() {
        let resolved = ResolvedConfig {
            config_path: PathBuf::from("/nonexistent/.dependency-cruiser.cjs"),
            source: ConfigSource::Project,
        };

        ensure_bundled_config(&resolved).unwrap();
        assert!(!resolved.config_path.exists());
    }
}
