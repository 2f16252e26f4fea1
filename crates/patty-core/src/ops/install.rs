//! `install` and `update`: bring the private tree in line with the manifest.
//!
//! A run moves through these steps:
//!
//! 1. Check that the installer exists (before anything is written).
//! 2. Validate every package argument.
//! 3. Merge the arguments into the manifest and save it.
//! 4. Install the sorted install set, one package at a time.
//! 5. Regenerate the lock file and loader.
//!
//! The first package failure ends the run. Packages installed earlier in the
//! run stay in the tree, and the previous lock file is left alone.

use super::{Context, ProjectState, remember_tree_in_ignore};
use crate::error::PattyError;
use crate::lockfile::LockFile;
use crate::loader;
use crate::manifest::Manifest;
use crate::paths::MANIFEST_FILE;
use crate::types::{PackageName, PackageSpec, VersionReq};

/// What an install run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The manifest declares no dependencies. Nothing was installed or written.
    NothingDeclared,
    /// Every declared package was installed and recorded in this lock file.
    Installed(LockFile),
}

/// Declare `args` (`name` or `name@version`) and install every dependency.
///
/// # Errors
///
/// - [`PattyError::InstallerNotFound`] before anything is touched.
/// - [`PattyError::InvalidPackageArgument`] before the manifest is modified.
/// - Manifest errors from loading or saving.
/// - [`PattyError::DirectoryCreate`] if the private tree cannot be created.
/// - [`PattyError::CompilerMissing`] or [`PattyError::InstallFailure`] for
///   the first package that fails.
/// - [`PattyError::LockWrite`] or [`PattyError::LoaderWrite`] after every
///   package is installed.
pub fn install<S: AsRef<str>>(ctx: &Context, args: &[S]) -> Result<InstallOutcome, PattyError> {
    ctx.installer.check_available()?;

    let specs = args
        .iter()
        .map(|arg| PackageSpec::parse(arg.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut manifest = Manifest::load(&ctx.layout)?;
    if !specs.is_empty() {
        for spec in &specs {
            manifest.declare(spec.name.clone(), spec.version.clone());
        }
        manifest.save(&ctx.layout)?;
        for spec in &specs {
            ctx.reporter.added(&spec.name, &spec.version);
        }
    }

    let set = manifest.install_set();
    if set.is_empty() {
        ctx.reporter.info(&format!("No dependencies found in {MANIFEST_FILE}"));
        return Ok(InstallOutcome::NothingDeclared);
    }

    let tree = ctx.layout.tree_path();
    std::fs::create_dir_all(&tree).map_err(|source| PattyError::DirectoryCreate {
        path: tree.clone(),
        source,
    })?;

    tracing::debug!(
        state = %ProjectState::Installing,
        packages = set.len(),
        "Starting install run"
    );
    for (name, version) in set.iter() {
        if let Err(e) = install_one(ctx, name, version) {
            tracing::debug!(
                state = %ProjectState::Failed,
                package = %name,
                "Install run stopped"
            );
            return Err(e);
        }
    }

    let lock = LockFile::from_install_set(&set, &ctx.tool_version);
    lock.save(&ctx.layout)?;
    loader::write(&ctx.layout)?;
    remember_tree_in_ignore(ctx);

    tracing::debug!(
        state = %ProjectState::Locked,
        packages = lock.packages.len(),
        "Install run finished"
    );
    Ok(InstallOutcome::Installed(lock))
}

/// Reinstall every declared dependency and regenerate the lock file and
/// loader.
///
/// # Errors
///
/// Same as [`install`].
pub fn update(ctx: &Context) -> Result<InstallOutcome, PattyError> {
    install::<&str>(ctx, &[])
}

fn install_one(ctx: &Context, name: &PackageName, version: &VersionReq) -> Result<(), PattyError> {
    ctx.reporter.installing(name, version);
    let spinner = ctx.reporter.activity(&format!("Installing {name}..."));
    let result = ctx.installer.install(name, version);
    if let Some(spinner) = spinner {
        spinner.stop();
    }

    match result {
        Ok(receipt) => {
            tracing::trace!("Installer output for {name}:\n{}", receipt.output);
            ctx.reporter.installed(name, version);
            Ok(())
        }
        Err(e) => {
            let output = match &e {
                PattyError::InstallFailure { output, .. } => output.as_str(),
                _ => "",
            };
            ctx.reporter.failed(name, version, output);
            Err(e)
        }
    }
}
