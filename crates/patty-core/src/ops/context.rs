//! Shared operation context.

use std::fmt;
use std::sync::Arc;

use crate::installer::{Installer, PackageInstaller};
use crate::paths::ProjectLayout;
use crate::reporter::Reporter;

/// Groups the state every operation needs.
#[derive(Clone)]
pub struct Context {
    /// Project whose files are read and written.
    pub layout: ProjectLayout,
    /// Installs single packages into the project's private tree.
    pub installer: PackageInstaller,
    /// Receives user-facing progress.
    pub reporter: Arc<dyn Reporter>,
    /// Recorded as `meta.tool_version` in lock files.
    pub tool_version: String,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("layout", &self.layout)
            .field("installer", &self.installer)
            .field("tool_version", &self.tool_version)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Context for `layout`, recording this library's version in lock files.
    pub fn new(
        layout: ProjectLayout,
        installer: Arc<dyn Installer>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            layout,
            installer: PackageInstaller::new(installer),
            reporter,
            tool_version: crate::TOOL_VERSION.to_string(),
        }
    }

    /// Record `version` instead of the library version.
    #[must_use]
    pub fn with_tool_version(mut self, version: impl Into<String>) -> Self {
        self.tool_version = version.into();
        self
    }
}
