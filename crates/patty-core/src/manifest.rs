//! Manifest parsing and persistence for patty projects.
//!
//! A patty manifest (`patty.toml`) declares a project's identity and its
//! direct dependencies. It is the only input to an install run; the lock file
//! is never consulted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PattyError;
use crate::io::write_atomic;
use crate::paths::ProjectLayout;
use crate::types::{PackageName, VersionReq};

/// Placeholder project name written by `init`.
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

/// Placeholder project version written by `init`.
pub const DEFAULT_PROJECT_VERSION: &str = "0.1.0";

/// Placeholder Lua constraint written by `init`.
pub const DEFAULT_LUA_CONSTRAINT: &str = ">=5.1";

/// Top-level project manifest parsed from a `patty.toml` file.
///
/// Both dependency maps are always present in memory, even when the file
/// omits the corresponding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Project identity metadata.
    pub project: ProjectSection,
    /// Dependencies installed by `patty install`.
    #[serde(default)]
    pub dependencies: BTreeMap<PackageName, VersionReq>,
    /// Development-only dependencies. Declared but never installed by default.
    #[serde(default)]
    pub dev_dependencies: BTreeMap<PackageName, VersionReq>,
}

/// The `[project]` section of a patty manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Human-readable name of the project.
    pub name: String,
    /// Project version.
    pub version: String,
    /// Supported Lua runtime versions, e.g. `>=5.1`.
    pub lua: String,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            project: ProjectSection {
                name: DEFAULT_PROJECT_NAME.to_string(),
                version: DEFAULT_PROJECT_VERSION.to_string(),
                lua: DEFAULT_LUA_CONSTRAINT.to_string(),
            },
            dependencies: BTreeMap::new(),
            dev_dependencies: BTreeMap::new(),
        }
    }
}

impl Manifest {
    /// Load and parse the manifest of the given project.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::ManifestMissing`] if the file does not exist,
    /// [`PattyError::ManifestRead`] if it cannot be read, and
    /// [`PattyError::ManifestParse`] if its contents do not match the schema.
    pub fn load(layout: &ProjectLayout) -> Result<Self, PattyError> {
        let path = layout.manifest_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PattyError::ManifestMissing { path });
            }
            Err(source) => return Err(PattyError::ManifestRead { path, source }),
        };

        Self::parse(&content, &path)
    }

    /// Parse manifest text. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::ManifestParse`] if `content` is not a valid
    /// manifest.
    pub fn parse(content: &str, path: &Path) -> Result<Self, PattyError> {
        toml::from_str(content).map_err(|source| PattyError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render the manifest as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Overwrite the project's manifest with this one.
    ///
    /// The write is all-or-nothing: on failure the previous file is left as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::ManifestWrite`] if the file cannot be created or
    /// written.
    pub fn save(&self, layout: &ProjectLayout) -> Result<(), PattyError> {
        let path = layout.manifest_path();
        let content = self.to_toml().map_err(|e| PattyError::ManifestWrite {
            path: path.clone(),
            source: std::io::Error::other(e),
        })?;

        write_atomic(&path, &content).map_err(|source| PattyError::ManifestWrite { path, source })?;
        tracing::debug!(
            dependencies = self.dependencies.len(),
            "Wrote {}",
            layout.manifest_path().display()
        );
        Ok(())
    }

    /// Write a placeholder manifest, refusing to replace an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::ManifestAlreadyExists`] if a manifest is already
    /// present, or [`PattyError::ManifestWrite`] if it cannot be written.
    pub fn ensure_new(layout: &ProjectLayout) -> Result<Self, PattyError> {
        let path = layout.manifest_path();
        if path.exists() {
            return Err(PattyError::ManifestAlreadyExists { path });
        }

        let manifest = Self::default();
        manifest.save(layout)?;
        Ok(manifest)
    }

    /// Declare (or re-pin) a dependency. Returns the previous constraint.
    pub fn declare(&mut self, name: PackageName, version: VersionReq) -> Option<VersionReq> {
        self.dependencies.insert(name, version)
    }

    /// Remove a declared dependency, returning its constraint.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::DependencyNotDeclared`], listing the declared
    /// names, if `name` is not a key of `dependencies`.
    pub fn undeclare(&mut self, name: &str) -> Result<VersionReq, PattyError> {
        self.dependencies
            .remove(name)
            .ok_or_else(|| PattyError::DependencyNotDeclared {
                name: name.to_string(),
                declared: self.dependencies.keys().cloned().collect(),
            })
    }

    /// The install set for a run starting now: declared dependencies sorted
    /// by name. Development dependencies are never included.
    pub fn install_set(&self) -> InstallSet {
        InstallSet::new(
            self.dependencies
                .iter()
                .map(|(name, version)| (name.clone(), version.clone()))
                .collect(),
        )
    }
}

/// The sorted `(name, constraint)` pairs processed by one install run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstallSet {
    entries: Vec<(PackageName, VersionReq)>,
}

impl InstallSet {
    /// Build a set from arbitrary pairs, sorting by name.
    pub fn new(mut entries: Vec<(PackageName, VersionReq)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }

    /// Number of packages in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in install order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageName, &VersionReq)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }
}
