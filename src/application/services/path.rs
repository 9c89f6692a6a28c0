//! One-shot path existence and permission checks

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{DomainError, PathMode};
use crate::infrastructure::traits::FileSystem;

pub struct PathService {
    fs: Arc<dyn FileSystem>,
}

impl PathService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Check `path` against `mode` once.
    pub fn check(&self, path: &Path, mode: PathMode) -> ApplicationResult<()> {
        let ok = self.fs.access(path, mode);
        debug!("check: {} {} -> {}", path.display(), mode, ok);
        match (ok, mode) {
            (true, _) => Ok(()),
            (false, PathMode::Exists) => Err(DomainError::PathMissing {
                path: path.to_path_buf(),
            }
            .into()),
            (false, mode) => Err(DomainError::PathNotAccessible {
                path: path.to_path_buf(),
                mode,
            }
            .into()),
        }
    }
}
