use crate::error::{PosterError, PosterResult};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// A downloaded image that lives only until it has been uploaded.
///
/// The file is removed when the guard is dropped, on every exit path. Removal
/// is best effort: a failure is logged and otherwise ignored.
#[derive(Debug)]
pub struct TransientImage {
    path: PathBuf,
}

impl TransientImage {
    /// Takes ownership of `path`. Whatever ends up there is deleted on drop.
    pub fn claim(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into())
    }

    pub async fn write(&self, bytes: &[u8]) -> PosterResult<()> {
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| PosterError::file_system(&self.path, e))
    }

    pub async fn read(&self) -> PosterResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| PosterError::file_system(&self.path, e))
    }
}

impl Drop for TransientImage {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Unable to remove {}: {}", self.path.display(), e),
        }
    }
}
