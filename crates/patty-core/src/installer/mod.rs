//! External installer adapter.
//!
//! patty never fetches or builds packages itself. Each declared package is
//! handed to `luarocks` in a separate, synchronous process that installs into
//! the project's private tree.
//!
//! - [`Installer`] is the process boundary. [`LuaRocks`] is the real
//!   implementation; tests substitute scripted fakes.
//! - [`PackageInstaller`] turns a `(name, version)` pair into arguments,
//!   runs them, filters the captured output, and classifies failures.
//! - [`toolchain`] decides whether a C compiler environment must be
//!   bootstrapped first (Windows without `cl` on `PATH`).

pub mod filter;
pub mod luarocks;
pub mod toolchain;

use std::sync::Arc;
use thiserror::Error;

use crate::error::PattyError;
use crate::paths::TREE_DIR;
use crate::types::{PackageName, VersionReq};

pub use filter::filter_output;
pub use luarocks::LuaRocks;
pub use toolchain::{SetupScriptSearch, SystemProbe, Toolchain, ToolchainArch, ToolchainProbe};

/// Executable patty delegates to.
pub const INSTALLER_PROGRAM: &str = "luarocks";

/// Outcome of one finished installer process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Captured standard output followed by standard error, unfiltered.
    pub output: String,
}

impl Invocation {
    /// A successful run with the given output.
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            output: output.into(),
        }
    }

    /// A failed run with the given exit code and output.
    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            output: output.into(),
        }
    }
}

/// Why an installer invocation did not succeed.
#[derive(Error, Debug)]
pub enum InvocationError {
    /// The process could not be started at all.
    #[error("could not start {program}: {source}")]
    Spawn {
        /// Program that failed to launch.
        program: String,
        /// Underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// The compiler-environment wrapper script could not be written.
    #[error("could not prepare the compiler environment script: {0}")]
    Script(#[source] std::io::Error),

    /// The platform needs a C compiler environment and none was found.
    #[error("no C compiler environment is available")]
    CompilerMissing,

    /// The process ran and exited unsuccessfully.
    #[error("{program} exited with {}", describe_exit(.code))]
    Exit {
        /// Program that failed.
        program: String,
        /// Exit code, if any.
        code: Option<i32>,
    },
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by a signal)".to_string(),
    }
}

/// The process boundary to the external package installer.
pub trait Installer: Send + Sync {
    /// Check that the installer can be found.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::InstallerNotFound`] if it is not on `PATH`.
    fn check_available(&self) -> Result<(), PattyError>;

    /// Run the installer with `args`, blocking until it exits.
    ///
    /// A non-zero exit is reported through [`Invocation::success`], not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an [`InvocationError`] if the process could not be run.
    fn run_install(&self, args: &[String]) -> Result<Invocation, InvocationError>;
}

/// Installer arguments for one package.
///
/// # Example
///
/// ```
/// use patty_core::installer::install_args;
/// use patty_core::{PackageName, VersionReq};
///
/// let args = install_args(&PackageName::new("lpeg"), &VersionReq::new("1.1.0-1"), ".patty");
/// assert_eq!(args, ["install", "lpeg", "1.1.0-1", "--tree=.patty", "--local"]);
/// ```
pub fn install_args(name: &PackageName, version: &VersionReq, tree: &str) -> Vec<String> {
    let mut args = vec!["install".to_string(), name.to_string()];
    if let Some(explicit) = version.explicit() {
        args.push(explicit.to_string());
    }
    args.push(format!("--tree={tree}"));
    args.push("--local".to_string());
    args
}

/// Result of a successful package installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReceipt {
    /// Filtered installer output.
    pub output: String,
}

/// Installs single packages through an [`Installer`].
#[derive(Clone)]
pub struct PackageInstaller {
    installer: Arc<dyn Installer>,
    tree: String,
}

impl std::fmt::Debug for PackageInstaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageInstaller")
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl PackageInstaller {
    /// Install into the default private tree (`.patty`).
    pub fn new(installer: Arc<dyn Installer>) -> Self {
        Self {
            installer,
            tree: TREE_DIR.to_string(),
        }
    }

    /// Check that the underlying installer can be found.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::InstallerNotFound`] if it cannot.
    pub fn check_available(&self) -> Result<(), PattyError> {
        self.installer.check_available()
    }

    /// Install one package into the private tree.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::CompilerMissing`] if a compiler environment is
    /// required and absent, and [`PattyError::InstallFailure`] carrying the
    /// filtered output if the installer could not run or exited non-zero.
    pub fn install(
        &self,
        name: &PackageName,
        version: &VersionReq,
    ) -> Result<InstallReceipt, PattyError> {
        let args = install_args(name, version, &self.tree);
        tracing::debug!(?args, "Running {INSTALLER_PROGRAM}");

        let invocation = match self.installer.run_install(&args) {
            Ok(invocation) => invocation,
            Err(InvocationError::CompilerMissing) => return Err(PattyError::CompilerMissing),
            Err(source) => {
                return Err(PattyError::InstallFailure {
                    package: name.clone(),
                    version: version.clone(),
                    output: String::new(),
                    source,
                });
            }
        };

        let output = filter_output(&invocation.output);
        if !invocation.success {
            tracing::debug!(code = ?invocation.code, "{INSTALLER_PROGRAM} failed for {name}");
            return Err(PattyError::InstallFailure {
                package: name.clone(),
                version: version.clone(),
                output,
                source: InvocationError::Exit {
                    program: INSTALLER_PROGRAM.to_string(),
                    code: invocation.code,
                },
            });
        }

        Ok(InstallReceipt { output })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Scripted {
        result: Mutex<Option<Result<Invocation, InvocationError>>>,
        seen: Mutex<Vec<Vec<String>>>,
    }

    impl Scripted {
        fn new(result: Result<Invocation, InvocationError>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Installer for Scripted {
        fn check_available(&self) -> Result<(), PattyError> {
            Ok(())
        }

        fn run_install(&self, args: &[String]) -> Result<Invocation, InvocationError> {
            self.seen.lock().unwrap().push(args.to_vec());
            self.result.lock().unwrap().take().unwrap()
        }
    }

    #[test]
    fn test_latest_omits_version_argument() {
        let args = install_args(&PackageName::new("luasocket"), &VersionReq::latest(), ".patty");
        assert_eq!(args, ["install", "luasocket", "--tree=.patty", "--local"]);
        let args = install_args(&PackageName::new("luasocket"), &VersionReq::new(""), ".patty");
        assert_eq!(args, ["install", "luasocket", "--tree=.patty", "--local"]);
    }

    #[test]
    fn test_install_success_filters_output() {
        let fake = Scripted::new(Ok(Invocation::succeeded(
            "Installing https://luarocks.org/lpeg-1.1.0-1.src.rock\n\nlpeg 1.1.0-1 is now installed in .patty (license: MIT)\nNo existing manifest. Attempting to rebuild...\n",
        )));
        let installer = PackageInstaller::new(fake.clone());

        let receipt = installer
            .install(&PackageName::new("lpeg"), &VersionReq::new("1.1.0-1"))
            .unwrap();

        assert_eq!(
            receipt.output,
            "Installing https://luarocks.org/lpeg-1.1.0-1.src.rock\nlpeg 1.1.0-1 is now installed in .patty (license: MIT)"
        );
        assert_eq!(
            fake.seen.lock().unwrap()[0],
            ["install", "lpeg", "1.1.0-1", "--tree=.patty", "--local"]
        );
    }

    #[test]
    fn test_non_zero_exit_is_install_failure() {
        let fake = Scripted::new(Ok(Invocation::failed(
            1,
            "Microsoft (R) Incremental Linker Version 14.38\nError: No results matching query were found for Lua 5.4.\n",
        )));
        let installer = PackageInstaller::new(fake);

        let err = installer
            .install(&PackageName::new("nosuchrock"), &VersionReq::latest())
            .unwrap_err();

        match err {
            PattyError::InstallFailure {
                package,
                output,
                source,
                ..
            } => {
                assert_eq!(package, "nosuchrock");
                assert_eq!(output, "Error: No results matching query were found for Lua 5.4.");
                assert!(matches!(source, InvocationError::Exit { code: Some(1), .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_compiler_missing_is_not_wrapped() {
        let fake = Scripted::new(Err(InvocationError::CompilerMissing));
        let installer = PackageInstaller::new(fake);
        let err = installer
            .install(&PackageName::new("luafilesystem"), &VersionReq::latest())
            .unwrap_err();
        assert!(matches!(err, PattyError::CompilerMissing));
    }

    #[test]
    fn test_spawn_failure_is_install_failure() {
        let fake = Scripted::new(Err(InvocationError::Spawn {
            program: "luarocks".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }));
        let installer = PackageInstaller::new(fake);
        let err = installer
            .install(&PackageName::new("lpeg"), &VersionReq::latest())
            .unwrap_err();
        assert!(matches!(
            err,
            PattyError::InstallFailure {
                source: InvocationError::Spawn { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_exit_without_code_mentions_signal() {
        let err = InvocationError::Exit {
            program: "luarocks".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("signal"));
    }
}
