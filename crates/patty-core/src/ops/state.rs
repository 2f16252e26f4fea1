//! On-disk project state.

use std::fmt;

use crate::error::PattyError;
use crate::lockfile::LockFile;
use crate::manifest::Manifest;
use crate::paths::ProjectLayout;

/// Where a project is in its lifecycle.
///
/// ```text
/// Uninitialized -> Initialized -> DependenciesDeclared -> Installing -> Locked
///                                                             |
///                                                             v
///                                                           Failed
/// ```
///
/// `Installing` and `Failed` only exist during an install run and are never
/// returned by [`ProjectState::detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectState {
    /// No manifest.
    Uninitialized,
    /// Manifest with no dependencies.
    Initialized,
    /// Dependencies declared but no successful install recorded.
    DependenciesDeclared,
    /// An install run is in progress.
    Installing,
    /// The lock file records a successful install.
    Locked,
    /// The current install run stopped on a package failure.
    Failed,
}

impl ProjectState {
    /// Classify the project from its files.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    pub fn detect(layout: &ProjectLayout) -> Result<Self, PattyError> {
        let manifest = match Manifest::load(layout) {
            Ok(manifest) => manifest,
            Err(PattyError::ManifestMissing { .. }) => return Ok(Self::Uninitialized),
            Err(e) => return Err(e),
        };

        if manifest.dependencies.is_empty() {
            return Ok(Self::Initialized);
        }

        match LockFile::load(layout) {
            Some(lock) if !lock.packages.is_empty() => Ok(Self::Locked),
            _ => Ok(Self::DependenciesDeclared),
        }
    }
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::DependenciesDeclared => "dependencies-declared",
            Self::Installing => "installing",
            Self::Locked => "locked",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}
