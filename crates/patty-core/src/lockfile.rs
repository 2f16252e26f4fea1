//! Lock file written after a successful install run.
//!
//! `patty.lock` records exactly which `(name, version)` pairs the last
//! successful run handed to luarocks. It is regenerated wholesale every time
//! and never merged, so an unchanged manifest always produces the same bytes.

use serde::{Deserialize, Serialize};

use crate::error::PattyError;
use crate::io::write_atomic;
use crate::manifest::InstallSet;
use crate::paths::ProjectLayout;
use crate::types::{PackageName, VersionReq};

/// Installer backend recorded in every lock entry.
pub const LOCK_SOURCE: &str = "luarocks";

/// A resolved lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
    /// Information about the tool that produced this file.
    pub meta: LockMeta,
    /// Installed packages, sorted by name.
    #[serde(default)]
    pub packages: Vec<LockPackage>,
}

/// The `[meta]` section of the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockMeta {
    /// Version of patty that wrote the lock.
    pub tool_version: String,
}

/// A single entry in the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockPackage {
    /// Package name as declared.
    pub name: PackageName,
    /// Version constraint that was installed, verbatim from the manifest.
    pub version: VersionReq,
    /// Installer backend, currently always [`LOCK_SOURCE`].
    pub source: String,
}

impl LockFile {
    /// A lock file with no packages.
    pub fn empty(tool_version: &str) -> Self {
        Self {
            meta: LockMeta {
                tool_version: tool_version.to_string(),
            },
            packages: Vec::new(),
        }
    }

    /// Record every entry of an install set.
    pub fn from_install_set(set: &InstallSet, tool_version: &str) -> Self {
        let mut packages: Vec<LockPackage> = set
            .iter()
            .map(|(name, version)| LockPackage {
                name: name.clone(),
                version: version.clone(),
                source: LOCK_SOURCE.to_string(),
            })
            .collect();

        // Sort alphabetically for deterministic output
        packages.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            meta: LockMeta {
                tool_version: tool_version.to_string(),
            },
            packages,
        }
    }

    /// Read the project's lock file, if there is a readable one.
    ///
    /// Install runs never call this; the manifest is authoritative. It exists
    /// for state detection and inspection.
    pub fn load(layout: &ProjectLayout) -> Option<Self> {
        let content = std::fs::read_to_string(layout.lock_path()).ok()?;
        match toml::from_str(&content) {
            Ok(lock) => Some(lock),
            Err(e) => {
                tracing::debug!("Ignoring unreadable {}: {e}", layout.lock_path().display());
                None
            }
        }
    }

    /// Overwrite the project's lock file with this one.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::LockWrite`] if serialization or the write fails.
    pub fn save(&self, layout: &ProjectLayout) -> Result<(), PattyError> {
        let path = layout.lock_path();
        let content = toml::to_string(self).map_err(|e| PattyError::LockWrite {
            path: path.clone(),
            source: std::io::Error::other(e),
        })?;

        write_atomic(&path, &content).map_err(|source| PattyError::LockWrite { path, source })?;
        tracing::debug!(packages = self.packages.len(), "Wrote lock file");
        Ok(())
    }
}
