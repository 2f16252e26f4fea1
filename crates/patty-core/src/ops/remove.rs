//! `remove`: drop a declared dependency.

use super::Context;
use crate::error::PattyError;
use crate::manifest::Manifest;
use crate::types::{PackageName, VersionReq};

/// Remove `name` from the manifest's dependencies.
///
/// The lock file, loader and private tree are left as they are until the next
/// install run.
///
/// # Errors
///
/// Returns [`PattyError::DependencyNotDeclared`] if `name` is not declared,
/// leaving the manifest untouched, or a manifest load/save error.
pub fn remove(ctx: &Context, name: &str) -> Result<VersionReq, PattyError> {
    let mut manifest = Manifest::load(&ctx.layout)?;
    let version = manifest.undeclare(name)?;
    manifest.save(&ctx.layout)?;

    ctx.reporter.removed(&PackageName::new(name));
    Ok(version)
}
