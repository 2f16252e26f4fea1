//! C compiler environment bootstrap.
//!
//! Packages with native code need a compiler. On Windows, `cl` is normally
//! only on `PATH` inside a Visual Studio developer prompt, so when it is
//! missing we look for `vcvarsall.bat` and run luarocks behind it.

use std::path::{Path, PathBuf};

/// MSVC compiler driver.
pub const COMPILER_PROGRAM: &str = "cl";

/// Lua interpreter, consulted for the architecture tag.
pub const RUNTIME_PROGRAM: &str = "lua";

/// Visual Studio install roots, searched in order.
pub const DEFAULT_ROOTS: &[&str] = &[
    r"C:\Program Files (x86)\Microsoft Visual Studio",
    r"C:\Program Files\Microsoft Visual Studio",
];

/// Visual Studio release years, newest first.
pub const DEFAULT_YEARS: &[&str] = &["2022", "2019", "2017"];

/// Visual Studio editions, searched in order.
pub const DEFAULT_EDITIONS: &[&str] = &["BuildTools", "Community", "Professional", "Enterprise"];

/// Architecture passed to `vcvarsall.bat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainArch {
    /// 32-bit.
    X86,
    /// 64-bit.
    X64,
}

impl ToolchainArch {
    /// The `vcvarsall.bat` argument.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X64 => "x64",
        }
    }

    /// Guess the architecture of the Lua installation from executable paths.
    ///
    /// Native modules must match the interpreter, so a 32-bit Lua needs the
    /// 32-bit compiler even on a 64-bit machine.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        for path in paths {
            let lower = path.to_string_lossy().to_lowercase();
            if lower.contains("win32")
                || lower.contains("program files (x86)")
                || lower.contains("32bit")
                || lower.replace("x86_64", "").replace("x86-64", "").contains("x86")
            {
                return Self::X86;
            }
        }
        Self::X64
    }
}

impl std::fmt::Display for ToolchainArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filesystem and `PATH` lookups used during detection.
pub trait ToolchainProbe {
    /// Resolve an executable on `PATH`.
    fn resolve(&self, program: &str) -> Option<PathBuf>;

    /// Whether `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Probe backed by the real `PATH` and filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl ToolchainProbe for SystemProbe {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Where to look for `vcvarsall.bat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupScriptSearch {
    /// Install roots, varied slowest.
    pub roots: Vec<PathBuf>,
    /// Release years.
    pub years: Vec<String>,
    /// Editions, varied fastest.
    pub editions: Vec<String>,
}

impl Default for SetupScriptSearch {
    fn default() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(PathBuf::from).collect(),
            years: DEFAULT_YEARS.iter().map(ToString::to_string).collect(),
            editions: DEFAULT_EDITIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl SetupScriptSearch {
    /// Every candidate path, in probe order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(self.roots.len() * self.years.len() * self.editions.len());
        for root in &self.roots {
            for year in &self.years {
                for edition in &self.editions {
                    out.push(
                        root.join(year)
                            .join(edition)
                            .join("VC")
                            .join("Auxiliary")
                            .join("Build")
                            .join("vcvarsall.bat"),
                    );
                }
            }
        }
        out
    }

    /// The first candidate that exists.
    pub fn find(&self, probe: &dyn ToolchainProbe) -> Option<PathBuf> {
        self.candidates().into_iter().find(|p| probe.is_file(p))
    }
}

/// How the installer gets a working compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    /// Run the installer as is.
    Direct,
    /// Run the installer inside a developer prompt set up by `setup_script`.
    DeveloperPrompt {
        /// Path to `vcvarsall.bat`.
        setup_script: PathBuf,
        /// Architecture argument for the script.
        arch: ToolchainArch,
    },
    /// A compiler is required and none could be found.
    Unavailable,
}

impl Toolchain {
    /// Pick a strategy.
    ///
    /// `requires_bootstrap` is true on platforms where the compiler is not
    /// expected on `PATH` (Windows). Elsewhere the result is always
    /// [`Toolchain::Direct`].
    pub fn detect(
        probe: &dyn ToolchainProbe,
        search: &SetupScriptSearch,
        requires_bootstrap: bool,
    ) -> Self {
        if !requires_bootstrap || probe.resolve(COMPILER_PROGRAM).is_some() {
            return Self::Direct;
        }

        let Some(setup_script) = search.find(probe) else {
            tracing::debug!("No {COMPILER_PROGRAM} on PATH and no vcvarsall.bat found");
            return Self::Unavailable;
        };

        let resolved: Vec<PathBuf> = [super::INSTALLER_PROGRAM, RUNTIME_PROGRAM]
            .into_iter()
            .filter_map(|program| probe.resolve(program))
            .collect();
        let arch = ToolchainArch::from_paths(resolved.iter().map(PathBuf::as_path));

        tracing::debug!(script = %setup_script.display(), %arch, "Using developer prompt");
        Self::DeveloperPrompt { setup_script, arch }
    }
}

/// Join arguments into a `cmd` command line, quoting any that contain spaces.
pub fn join_command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.contains(' ') {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// Batch script that enters the developer prompt, then runs `program`.
///
/// Setup output is discarded; the installer's stderr is folded into stdout.
pub fn wrapper_script(
    setup_script: &Path,
    arch: ToolchainArch,
    program: &str,
    args: &[String],
) -> String {
    format!(
        "@call \"{}\" {arch} >nul 2>&1\n@if errorlevel 1 exit /b 1\n@{} 2>&1\n",
        setup_script.display(),
        join_command_line(program, args)
    )
}
