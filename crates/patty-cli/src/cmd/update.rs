//! Update command
use anyhow::Result;
use std::path::Path;

use patty_core::ops;

/// Reinstall every declared dependency.
pub fn update(project_dir: Option<&Path>) -> Result<()> {
    let ctx = super::context(project_dir)?;
    let outcome = ops::update(&ctx)?;
    super::finish_install(&ctx, &outcome);
    Ok(())
}
