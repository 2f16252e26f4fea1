//! Error kinds surfaced by patty operations.
//!
//! None of these are retried. Every variant ends the current command, and
//! packages installed before a failure stay on disk.

use std::path::PathBuf;
use thiserror::Error;

use crate::installer::InvocationError;
use crate::types::{PackageName, VersionReq};

const INSTALLER_HINTS: &str = "\
  patty uses luarocks to fetch Lua packages. To install it:
    Windows:  choco install luarocks
    macOS:    brew install luarocks
    Linux:    sudo apt install luarocks (or your package manager)

  After installing, restart your terminal and try again";

const COMPILER_HINTS: &str = "\
  Visual Studio Build Tools with the C++ workload is required.
  Install it by running (in an admin terminal):

    winget install Microsoft.VisualStudio.2022.BuildTools --override \"--quiet --add Microsoft.VisualStudio.Workload.VCTools --includeRecommended\"

  After installing, restart your terminal and try again";

const INSTALL_FAILURE_HINTS: &str = "\
  Possible causes:
    - the package name is misspelled
    - the requested version does not exist on luarocks.org
    - a network problem interrupted the download
    - the package has native code that failed to build";

/// Errors returned by the stores and command operations.
#[derive(Error, Debug)]
pub enum PattyError {
    /// The manifest file does not exist.
    #[error("no patty.toml found at {}\n\n  Run 'patty init' to create one", .path.display())]
    ManifestMissing {
        /// Expected manifest location.
        path: PathBuf,
    },

    /// The manifest exists but could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    ManifestRead {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The manifest content does not match the schema.
    #[error("cannot parse {}: {source}", .path.display())]
    ManifestParse {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: toml::de::Error,
    },

    /// The manifest could not be created or written.
    #[error(
        "cannot write to {}: {source}\n  Check that the file isn't read-only or locked by another program",
        .path.display()
    )]
    ManifestWrite {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// `init` found an existing manifest.
    #[error("{} already exists", .path.display())]
    ManifestAlreadyExists {
        /// Existing manifest location.
        path: PathBuf,
    },

    /// The lock file could not be written.
    #[error(
        "packages were installed, but writing {} failed: {source}\n  The .patty tree is in a good state; fix the problem and run 'patty update' to record it",
        .path.display()
    )]
    LockWrite {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The loader script could not be written.
    #[error(
        "packages were installed, but writing {} failed: {source}\n  The .patty tree is in a good state; fix the problem and run 'patty update' to regenerate it",
        .path.display()
    )]
    LoaderWrite {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The private tree could not be created.
    #[error("cannot create install directory {}: {source}", .path.display())]
    DirectoryCreate {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The external installer is not on `PATH`.
    #[error("luarocks was not found on your system\n\n{hints}", hints = INSTALLER_HINTS)]
    InstallerNotFound,

    /// No C compiler environment could be found or bootstrapped.
    #[error(
        "this package contains native C code and needs a C compiler to build\n\n{hints}",
        hints = COMPILER_HINTS
    )]
    CompilerMissing,

    /// The installer ran and failed for one package.
    #[error(
        "failed to install {package} ({version}): {source}{}\n\n{hints}",
        output_block(.output),
        hints = INSTALL_FAILURE_HINTS
    )]
    InstallFailure {
        /// Package that failed.
        package: PackageName,
        /// Version that was requested.
        version: VersionReq,
        /// Filtered installer output, never the raw capture.
        output: String,
        /// What went wrong with the installer process.
        #[source]
        source: InvocationError,
    },

    /// An `install` argument has an empty package name.
    #[error(
        "invalid package argument '{argument}': the package name is empty\n  Use 'name' or 'name@version', for example: patty install luasocket@3.1.0-1"
    )]
    InvalidPackageArgument {
        /// The argument as given.
        argument: String,
    },

    /// `remove` was asked for a name that is not declared.
    #[error("{name} is not a dependency of this project\n\n  {}", declared_listing(.declared))]
    DependencyNotDeclared {
        /// Name given to `remove`.
        name: String,
        /// Currently declared names, sorted.
        declared: Vec<PackageName>,
    },
}

fn output_block(output: &str) -> String {
    if output.trim().is_empty() {
        return String::new();
    }
    let indented: Vec<String> = output.lines().map(|l| format!("    {l}")).collect();
    format!("\n\n  luarocks output:\n{}", indented.join("\n"))
}

fn declared_listing(declared: &[PackageName]) -> String {
    if declared.is_empty() {
        return "No dependencies are declared in patty.toml".to_string();
    }
    let names: Vec<&str> = declared.iter().map(PackageName::as_str).collect();
    format!("Declared dependencies: {}", names.join(", "))
}
