//! Terminal reporter.
//!
//! Messages go to stdout, errors to stderr. A spinner is only drawn when
//! stdout is a terminal; otherwise each package gets a plain
//! "Installing ..." line instead.

use std::io::IsTerminal;

use crossterm::style::Stylize;
use patty_core::progress::Spinner;
use patty_core::{PackageName, Reporter, VersionReq};

use super::theme::Theme;

/// Reporter that prints styled lines to the terminal.
#[derive(Debug, Clone)]
pub struct Output {
    theme: Theme,
    interactive: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create an output handle, detecting whether stdout is a terminal.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            interactive: std::io::stdout().is_terminal(),
        }
    }

    fn package(&self, name: &PackageName, version: &VersionReq) -> String {
        format!(
            "{} {}",
            name.as_str().with(self.theme.colors.package_name),
            version.as_str().with(self.theme.colors.version)
        )
    }
}

impl Reporter for Output {
    fn info(&self, msg: &str) {
        println!("  {} {msg}", self.theme.icons.info.with(self.theme.colors.info));
    }

    fn success(&self, msg: &str) {
        println!(
            "  {} {msg}",
            self.theme.icons.success.with(self.theme.colors.success)
        );
    }

    fn warning(&self, msg: &str) {
        println!(
            "  {} {msg}",
            self.theme.icons.warning.with(self.theme.colors.warning)
        );
    }

    fn added(&self, name: &PackageName, version: &VersionReq) {
        println!(
            "  {} {} {}",
            self.theme.icons.added.with(self.theme.colors.success),
            self.package(name, version),
            "added to patty.toml".with(self.theme.colors.secondary)
        );
    }

    fn removed(&self, name: &PackageName) {
        println!(
            "  {} {} {}",
            self.theme.icons.removed.with(self.theme.colors.error),
            name.as_str().with(self.theme.colors.package_name),
            "removed from patty.toml".with(self.theme.colors.secondary)
        );
    }

    fn installing(&self, name: &PackageName, version: &VersionReq) {
        if !self.interactive {
            println!(
                "  {} Installing {}...",
                self.theme.icons.active.with(self.theme.colors.secondary),
                self.package(name, version)
            );
        }
    }

    fn installed(&self, name: &PackageName, version: &VersionReq) {
        println!(
            "  {} {}",
            self.theme.icons.success.with(self.theme.colors.success),
            self.package(name, version)
        );
    }

    fn failed(&self, name: &PackageName, version: &VersionReq, _output: &str) {
        // The output is part of the returned error, which main prints.
        println!(
            "  {} {}",
            self.theme.icons.error.with(self.theme.colors.error),
            self.package(name, version)
        );
    }

    fn activity(&self, label: &str) -> Option<Spinner> {
        self.interactive
            .then(|| Spinner::start(format!("  {label}"), std::io::stdout()))
    }
}
