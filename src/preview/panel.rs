use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::document::PresentedArtifact;
use crate::error::WebDepcruiserError;

/// The process-wide preview surface. Each successful graph replaces the
/// previous one instead of opening another page.
pub static PREVIEW: PreviewSurface = PreviewSurface::new();

/// A page on disk showing the current artifact
#[derive(Debug)]
pub struct PreviewPanel {
    path: PathBuf,
    file_name: String,
    artifact: PresentedArtifact,
}

impl PreviewPanel {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn artifact(&self) -> &PresentedArtifact {
        &self.artifact
    }

    fn render(&self) -> Result<(), WebDepcruiserError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, self.artifact.to_html(&self.file_name))?;
        Ok(())
    }
}

/// Whether [`PreviewSurface::show`] opened a new page or replaced one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    Created,
    Replaced,
}

/// Holder for at most one [`PreviewPanel`]
#[derive(Debug)]
pub struct PreviewSurface {
    slot: Mutex<Option<PreviewPanel>>,
}

impl Default for PreviewSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSurface {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<PreviewPanel>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Show `artifact` at `page`, creating the panel or replacing the
    /// current one in place
    pub fn show(
        &self,
        page: &Path,
        file_name: &str,
        artifact: PresentedArtifact,
    ) -> Result<ShowOutcome, WebDepcruiserError> {
        let mut slot = self.lock();

        let panel = PreviewPanel {
            path: page.to_path_buf(),
            file_name: file_name.to_string(),
            artifact,
        };
        panel.render()?;

        let outcome = if slot.is_some() {
            ShowOutcome::Replaced
        } else {
            ShowOutcome::Created
        };

        if let Some(previous) = slot.replace(panel)
            && previous.path != page
        {
            let _ = fs::remove_file(&previous.path);
        }

        Ok(outcome)
    }

    /// Save the artifact currently on display
    pub fn save(&self, path: &Path) -> Result<(), WebDepcruiserError> {
        let slot = self.lock();
        let panel = slot
            .as_ref()
            .ok_or_else(|| WebDepcruiserError::ConfigurationError {
                message: "There is no graph to save".to_string(),
            })?;
        panel.artifact.save(path)
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock().as_ref().map(|panel| panel.path.clone())
    }

    pub fn is_showing(&self) -> bool {
        self.lock().is_some()
    }

    /// Drop the current panel, leaving its page on disk
    pub fn dispose(&self) -> Option<PreviewPanel> {
        self.lock().take()
    }
}
