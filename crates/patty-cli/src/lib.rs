//! patty - a Lua dependency tool built on luarocks
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Command-line front end for `patty-core`. This crate parses arguments,
//! builds an operation [`Context`](patty_core::ops::Context) for the project
//! directory, and renders progress to the terminal.

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Version reported by `--version` and written to `patty.lock`.
pub const VERSION: &str = env!("PATTY_VERSION");

#[derive(Debug, Parser)]
#[command(name = "patty")]
#[command(version = VERSION, about = "patty - a Lua dependency tool built on luarocks")]
#[command(after_help = "Examples:
  patty init
  patty install luafilesystem
  patty install lua-cjson@2.1.0-1 luasocket
  patty remove luafilesystem
  patty update")]
pub struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new patty project
    Init,
    /// Install packages (adds them to patty.toml first)
    #[command(visible_alias = "i")]
    Install {
        /// Package name(s), optionally with version: pkg or pkg@1.0-1
        packages: Vec<String>,
    },
    /// Remove a dependency from the project
    #[command(visible_alias = "rm")]
    Remove {
        /// Package name
        package: String,
    },
    /// Reinstall all dependencies
    Update,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::parse_from(["patty", "i", "lpeg@1.1.0-1", "luasocket"]);
        match cli.command {
            Commands::Install { packages } => assert_eq!(packages, ["lpeg@1.1.0-1", "luasocket"]),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from(["patty", "rm", "lpeg"]);
        assert!(matches!(cli.command, Commands::Remove { package } if package == "lpeg"));
    }

    #[test]
    fn test_project_dir_is_global() {
        let cli = Cli::parse_from(["patty", "update", "--project-dir", "/work/game"]);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/work/game")));
        assert!(matches!(cli.command, Commands::Update));
    }

    #[test]
    fn test_remove_requires_package() {
        assert!(Cli::try_parse_from(["patty", "remove"]).is_err());
    }
}
