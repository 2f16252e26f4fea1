//! patty core
//!
//! Install orchestration for Lua projects that delegate package retrieval to
//! `luarocks`.
//!
//! # Overview
//!
//! A project declares its direct dependencies in `patty.toml`. An install run
//! hands each declared package, one at a time and in name order, to the
//! external installer, then records the result in `patty.lock` and writes
//! `patty_loader.lua` so that the Lua runtime can find the private tree.
//!
//! # Project Layout
//!
//! ```text
//! <project>/
//! ├── patty.toml        # Manifest (user intent)
//! ├── patty.lock        # Lock file (last successful install)
//! ├── patty_loader.lua  # Runtime search-path shim
//! └── .patty/           # Private luarocks tree
//! ```
//!
//! Every path is derived from a [`ProjectLayout`]; nothing in this crate reads
//! the process working directory on its own.

pub mod error;
pub mod ignore;
pub mod installer;
pub mod io;
pub mod loader;
pub mod lockfile;
pub mod manifest;
pub mod ops;
pub mod paths;
pub mod progress;
pub mod reporter;
pub mod types;

pub use error::PattyError;
pub use paths::ProjectLayout;
pub use reporter::{NullReporter, Reporter};
pub use types::{PackageName, PackageSpec, VersionReq};

/// Version of this library, used as the default `meta.tool_version`.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
