//! Install command
use anyhow::Result;
use std::path::Path;

use patty_core::ops;

/// Declare `packages` and install every dependency.
pub fn install(project_dir: Option<&Path>, packages: &[String]) -> Result<()> {
    let ctx = super::context(project_dir)?;
    let outcome = ops::install(&ctx, packages)?;
    super::finish_install(&ctx, &outcome);
    Ok(())
}
