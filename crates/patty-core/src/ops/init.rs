//! `init`: create a new project.

use super::{Context, ProjectState, remember_tree_in_ignore};
use crate::error::PattyError;
use crate::lockfile::LockFile;
use crate::loader;
use crate::manifest::Manifest;
use crate::paths::MANIFEST_FILE;

/// Create the manifest, loader and an empty lock file.
///
/// The ignore-file entry is best effort and never fails the command.
///
/// # Errors
///
/// Returns [`PattyError::ManifestAlreadyExists`] if the project already has a
/// manifest, readable or not, in which case nothing is written. Write
/// failures are returned as the matching `*Write` variant.
pub fn init(ctx: &Context) -> Result<(), PattyError> {
    match ProjectState::detect(&ctx.layout) {
        Ok(ProjectState::Uninitialized) => {}
        Ok(state) => {
            tracing::debug!(%state, "Refusing to initialize");
            return Err(PattyError::ManifestAlreadyExists {
                path: ctx.layout.manifest_path(),
            });
        }
        Err(e) => {
            tracing::debug!("Refusing to initialize over an unusable manifest: {e}");
            return Err(PattyError::ManifestAlreadyExists {
                path: ctx.layout.manifest_path(),
            });
        }
    }

    Manifest::ensure_new(&ctx.layout)?;
    loader::write(&ctx.layout)?;
    LockFile::empty(&ctx.tool_version).save(&ctx.layout)?;
    remember_tree_in_ignore(ctx);

    tracing::info!("Initialized project at {}", ctx.layout.root().display());
    ctx.reporter.success(&format!("Created {MANIFEST_FILE}"));
    Ok(())
}
