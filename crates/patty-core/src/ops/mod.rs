//! Command-level operations.
//!
//! Each operation takes a [`Context`] naming the project root, the installer
//! and the reporter, and returns a typed [`PattyError`](crate::PattyError) on
//! failure. Nothing here is retried, and nothing installed before a failure
//! is rolled back.

pub mod context;
pub mod init;
pub mod install;
pub mod remove;
pub mod state;

pub use context::Context;
pub use init::init;
pub use install::{InstallOutcome, install, update};
pub use remove::remove;
pub use state::ProjectState;

use crate::ignore;
use crate::paths::ProjectLayout;

/// Add the private tree to the ignore file. Failures are reported as
/// warnings, not returned.
pub(crate) fn remember_tree_in_ignore(ctx: &Context) {
    let path = ctx.layout.ignore_path();
    let line = ProjectLayout::tree_ignore_line();
    match ignore::ensure_line(&path, &line) {
        Ok(true) => tracing::debug!("Added {line} to {}", path.display()),
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("Could not update {}: {e}", path.display());
            ctx.reporter.warning(&format!("Could not add {line} to {}", path.display()));
        }
    }
}
