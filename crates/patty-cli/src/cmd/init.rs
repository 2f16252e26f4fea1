//! Init command
use anyhow::Result;
use std::path::Path;

use patty_core::ops;

/// Create a new project.
pub fn init(project_dir: Option<&Path>) -> Result<()> {
    let ctx = super::context(project_dir)?;
    ops::init(&ctx)?;
    Ok(())
}
