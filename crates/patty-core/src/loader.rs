//! Generated `patty_loader.lua`.
//!
//! The loader prepends the private luarocks tree to `package.path` and
//! `package.cpath`. Projects `require("patty_loader")` once, before any
//! installed module. The Lua version and native library extension are
//! resolved at runtime, so the file depends only on the tree path.

use crate::error::PattyError;
use crate::io::write_atomic;
use crate::paths::{ProjectLayout, TREE_DIR};

/// Render the loader for a tree directory (relative to the project root).
pub fn render(tree_dir: &str) -> String {
    format!(
        r#"-- Generated by patty. Do not edit; run `patty install` to regenerate.
-- Add `require("patty_loader")` before requiring installed packages.
local tree = "{tree_dir}"
local lua_version = _VERSION:match("%d+%.%d+") or "5.1"
local native_ext = package.config:sub(1, 1) == "\\" and "dll" or "so"

local share = tree .. "/share/lua/" .. lua_version
local lib = tree .. "/lib/lua/" .. lua_version

package.path = share .. "/?.lua;" .. share .. "/?/init.lua;" .. package.path
package.cpath = lib .. "/?." .. native_ext .. ";" .. package.cpath
"#
    )
}

/// Write the loader script into the project root.
///
/// # Errors
///
/// Returns [`PattyError::LoaderWrite`] if the file cannot be written.
pub fn write(layout: &ProjectLayout) -> Result<(), PattyError> {
    let path = layout.loader_path();
    write_atomic(&path, &render(TREE_DIR))
        .map_err(|source| PattyError::LoaderWrite { path, source })
}
