//! Command handlers.
//!
//! Each handler resolves the project directory, builds a core
//! [`Context`](patty_core::ops::Context) and runs one operation.

pub mod init;
pub mod install;
pub mod remove;
pub mod update;

use anyhow::{Result, anyhow};
use std::path::Path;
use std::sync::Arc;

use patty_core::installer::LuaRocks;
use patty_core::ops::{Context, InstallOutcome};
use patty_core::paths::{LOADER_FILE, LOCK_FILE};
use patty_core::{ProjectLayout, Reporter};

use crate::ui::Output;

/// Build the operation context for `project_dir`, or the working directory.
pub fn context(project_dir: Option<&Path>) -> Result<Context> {
    let root = match project_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()
            .map_err(|e| anyhow!("cannot determine the current directory: {e}"))?,
    };
    tracing::debug!("Project root: {}", root.display());

    let layout = ProjectLayout::new(root);
    let installer = Arc::new(LuaRocks::new(&layout));
    Ok(Context::new(layout, installer, Arc::new(Output::new())).with_tool_version(crate::VERSION))
}

/// Report a finished install run.
pub(crate) fn finish_install(ctx: &Context, outcome: &InstallOutcome) {
    let InstallOutcome::Installed(lock) = outcome else {
        return;
    };

    let count = lock.packages.len();
    ctx.reporter.success(&format!(
        "Installed {count} package{}",
        if count == 1 { "" } else { "s" }
    ));
    print_post_install_hint();
    ctx.reporter.info(&format!("Wrote {LOCK_FILE} and {LOADER_FILE}"));
}

fn print_post_install_hint() {
    println!();
    println!("  To use installed packages, load the patty loader first:");
    println!();
    println!("      require(\"patty_loader\")");
    println!("      local lfs = require(\"lfs\")");
    println!();
}
