//! Remove command
use anyhow::Result;
use std::path::Path;

use patty_core::paths::LOCK_FILE;
use patty_core::{Reporter, ops};

/// Remove a declared dependency.
pub fn remove(project_dir: Option<&Path>, package: &str) -> Result<()> {
    let ctx = super::context(project_dir)?;
    ops::remove(&ctx, package)?;
    ctx.reporter.info(&format!(
        "Run 'patty install' to update {LOCK_FILE}; installed files stay in .patty until then"
    ));
    Ok(())
}
