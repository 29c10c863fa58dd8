use std::path::{Path, PathBuf};

use miette::{Result, WrapErr};
use walkdir::{DirEntry, WalkDir};

use crate::constants::explorer::{SKIPPED_DIRS, SOURCE_EXTENSIONS};
use crate::error::WebDepcruiserError;

/// Lists the source files a graph can be generated for
pub struct FileExplorer {
    root: PathBuf,
}

impl FileExplorer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source files under the root, relative to it and sorted by path.
    /// `node_modules` and hidden directories are not entered.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(WebDepcruiserError::ConfigurationError {
                message: format!("'{}' is not a directory", self.root.display()),
            })
            .wrap_err("Failed to list source files");
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_source_file(e.path()))
            .filter_map(|e| e.path().strip_prefix(&self.root).ok().map(Path::to_path_buf))
            .collect();

        files.sort();
        Ok(files)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_lists_source_files_only() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.ts");
        touch(temp.path(), "src/components/Button.tsx");
        touch(temp.path(), "src/App.vue");
        touch(temp.path(), "src/legacy.js");
        touch(temp.path(), "src/styles.css");
        touch(temp.path(), "README.md");

        let files = FileExplorer::new(temp.path()).list().unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("src/App.vue"),
                PathBuf::from("src/components/Button.tsx"),
                PathBuf::from("src/index.ts"),
                PathBuf::from("src/legacy.js"),
            ]
        );
    }

    #[test]
    fn test_skips_node_modules_and_hidden_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "node_modules/lodash/index.js");
        touch(temp.path(), ".cruise/preview.js");
        touch(temp.path(), ".git/hooks/pre-commit.js");
        touch(temp.path(), "lib/main.jsx");

        let files = FileExplorer::new(temp.path()).list().unwrap();

        assert_eq!(files, vec![PathBuf::from("lib/main.jsx")]);
    }

    #[test]
    fn test_hidden_root_is_still_walked() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".workspace");
        touch(&root, "a.ts");

        let files = FileExplorer::new(&root).list().unwrap();

        assert_eq!(files, vec![PathBuf::from("a.ts")]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();

        assert!(FileExplorer::new(temp.path().join("missing")).list().is_err());
    }
}
