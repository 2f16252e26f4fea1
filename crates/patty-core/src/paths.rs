//! Project-relative file locations.

use std::path::{Path, PathBuf};

/// Manifest file name.
pub const MANIFEST_FILE: &str = "patty.toml";

/// Lock file name.
pub const LOCK_FILE: &str = "patty.lock";

/// Generated loader script name.
pub const LOADER_FILE: &str = "patty_loader.lua";

/// Private luarocks tree, relative to the project root.
pub const TREE_DIR: &str = ".patty";

/// Version-control ignore file that receives the tree entry.
pub const IGNORE_FILE: &str = ".gitignore";

/// Paths of a single patty project, all derived from its root directory.
///
/// # Example
///
/// ```
/// use patty_core::ProjectLayout;
///
/// let layout = ProjectLayout::new("/work/game");
/// assert!(layout.manifest_path().ends_with("patty.toml"));
/// assert!(layout.tree_path().ends_with(".patty"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/patty.toml`
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// `<root>/patty.lock`
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    /// `<root>/patty_loader.lua`
    pub fn loader_path(&self) -> PathBuf {
        self.root.join(LOADER_FILE)
    }

    /// `<root>/.patty`
    pub fn tree_path(&self) -> PathBuf {
        self.root.join(TREE_DIR)
    }

    /// `<root>/.gitignore`
    pub fn ignore_path(&self) -> PathBuf {
        self.root.join(IGNORE_FILE)
    }

    /// Line appended to the ignore file for the private tree (`.patty/`).
    pub fn tree_ignore_line() -> String {
        format!("{TREE_DIR}/")
    }
}
