//! The real `luarocks` process.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::toolchain::{SetupScriptSearch, SystemProbe, Toolchain, ToolchainArch, wrapper_script};
use super::{INSTALLER_PROGRAM, Installer, Invocation, InvocationError};
use crate::error::PattyError;
use crate::paths::ProjectLayout;

/// Shell that runs the developer-prompt wrapper script.
const PROMPT_SHELL: &str = "cmd";

/// Runs `luarocks` from the project root.
#[derive(Debug, Clone)]
pub struct LuaRocks {
    program: String,
    working_dir: PathBuf,
    toolchain: Toolchain,
    shell: String,
    /// Where wrapper scripts go; the system temp directory when unset.
    script_dir: Option<PathBuf>,
}

impl LuaRocks {
    /// Installer for `layout`, with the toolchain detected from the host.
    pub fn new(layout: &ProjectLayout) -> Self {
        let toolchain =
            Toolchain::detect(&SystemProbe, &SetupScriptSearch::default(), cfg!(windows));
        Self::with_toolchain(layout, toolchain)
    }

    /// Installer for `layout` with an explicit toolchain strategy.
    pub fn with_toolchain(layout: &ProjectLayout, toolchain: Toolchain) -> Self {
        Self {
            program: INSTALLER_PROGRAM.to_string(),
            working_dir: layout.root().to_path_buf(),
            toolchain,
            shell: PROMPT_SHELL.to_string(),
            script_dir: None,
        }
    }

    /// The selected toolchain strategy.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// The installer executable as `which` finds it, so `PATHEXT` shims such
    /// as `luarocks.bat` spawn too. Falls back to the bare name.
    fn resolve_program(&self) -> PathBuf {
        which::which(&self.program).unwrap_or_else(|_| PathBuf::from(&self.program))
    }

    fn run_direct(&self, args: &[String]) -> Result<Invocation, InvocationError> {
        let program = self.resolve_program();
        tracing::trace!("Spawning {}", program.display());
        let output = Command::new(&program)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| InvocationError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        Ok(collect(&output))
    }

    fn run_in_prompt(
        &self,
        setup_script: &Path,
        arch: ToolchainArch,
        args: &[String],
    ) -> Result<Invocation, InvocationError> {
        let script = wrapper_script(setup_script, arch, &self.program, args);

        let mut builder = tempfile::Builder::new();
        builder.prefix("patty-").suffix(".bat");
        let mut file = match &self.script_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(InvocationError::Script)?;
        file.write_all(script.as_bytes()).map_err(InvocationError::Script)?;
        // The shell needs its own handle; the path is still removed on drop.
        let script_path = file.into_temp_path();

        let output = Command::new(&self.shell)
            .arg("/C")
            .arg(&*script_path)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| InvocationError::Spawn {
                program: self.shell.clone(),
                source,
            })?;
        Ok(collect(&output))
    }
}

impl Installer for LuaRocks {
    fn check_available(&self) -> Result<(), PattyError> {
        match which::which(&self.program) {
            Ok(path) => {
                tracing::debug!("Found {} at {}", self.program, path.display());
                Ok(())
            }
            Err(_) => Err(PattyError::InstallerNotFound),
        }
    }

    fn run_install(&self, args: &[String]) -> Result<Invocation, InvocationError> {
        match &self.toolchain {
            Toolchain::Direct => self.run_direct(args),
            Toolchain::DeveloperPrompt { setup_script, arch } => {
                self.run_in_prompt(setup_script, *arch, args)
            }
            Toolchain::Unavailable => Err(InvocationError::CompilerMissing),
        }
    }
}

fn collect(output: &Output) -> Invocation {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Invocation {
        code: output.status.code(),
        success: output.status.success(),
        output: combined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn prompt() -> Toolchain {
        Toolchain::DeveloperPrompt {
            setup_script: PathBuf::from(r"C:\VS\vcvarsall.bat"),
            arch: ToolchainArch::X64,
        }
    }

    fn install_args() -> Vec<String> {
        vec!["install".to_string(), "lpeg".to_string()]
    }

    fn entries(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[test]
    fn test_unavailable_toolchain_is_compiler_missing() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        let rocks = LuaRocks::with_toolchain(&layout, Toolchain::Unavailable);
        let err = rocks.run_install(&install_args()).unwrap_err();
        assert!(matches!(err, InvocationError::CompilerMissing));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        let mut rocks = LuaRocks::with_toolchain(&layout, Toolchain::Direct);
        rocks.program = "patty-test-no-such-program".to_string();

        assert!(matches!(
            rocks.check_available(),
            Err(PattyError::InstallerNotFound)
        ));
        assert!(matches!(
            rocks.run_install(&[]),
            Err(InvocationError::Spawn { .. })
        ));
    }

    #[test]
    fn test_new_off_windows_is_direct() {
        if cfg!(windows) {
            return;
        }
        let dir = tempdir().unwrap();
        let rocks = LuaRocks::new(&ProjectLayout::new(dir.path()));
        assert_eq!(rocks.toolchain(), &Toolchain::Direct);
    }

    #[test]
    fn test_wrapper_script_removed_when_shell_cannot_start() {
        let project = tempdir().unwrap();
        let scripts = tempdir().unwrap();
        let mut rocks = LuaRocks::with_toolchain(&ProjectLayout::new(project.path()), prompt());
        rocks.script_dir = Some(scripts.path().to_path_buf());
        rocks.shell = "patty-test-no-such-shell".to_string();

        let err = rocks.run_install(&install_args()).unwrap_err();

        assert!(matches!(err, InvocationError::Spawn { .. }));
        assert!(entries(scripts.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_wrapper_script_removed_after_successful_run() {
        let project = tempdir().unwrap();
        let scripts = tempdir().unwrap();
        let mut rocks = LuaRocks::with_toolchain(&ProjectLayout::new(project.path()), prompt());
        rocks.script_dir = Some(scripts.path().to_path_buf());
        rocks.shell = "true".to_string();

        let invocation = rocks.run_install(&install_args()).unwrap();

        assert!(invocation.success);
        assert!(entries(scripts.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_wrapper_script_exists_while_shell_runs() {
        let project = tempdir().unwrap();
        let scripts = tempdir().unwrap();
        let mut rocks = LuaRocks::with_toolchain(&ProjectLayout::new(project.path()), prompt());
        rocks.script_dir = Some(scripts.path().to_path_buf());
        // `cat /C <script>` fails on `/C` but still prints the script.
        rocks.shell = "cat".to_string();

        let invocation = rocks.run_install(&install_args()).unwrap();

        assert!(invocation.output.contains("@luarocks install lpeg 2>&1"));
        assert!(entries(scripts.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_direct_run_spawns_resolved_program() {
        use std::os::unix::fs::PermissionsExt;

        let project = tempdir().unwrap();
        let bin = tempdir().unwrap();
        let fake = bin.path().join("luarocks");
        std::fs::write(&fake, "#!/bin/sh\necho \"ran $*\"\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut rocks =
            LuaRocks::with_toolchain(&ProjectLayout::new(project.path()), Toolchain::Direct);
        rocks.program = fake.to_string_lossy().into_owned();

        let resolved = rocks.resolve_program();
        assert!(resolved.is_absolute());
        assert_eq!(resolved.file_name(), fake.file_name());
        let invocation = rocks.run_install(&install_args()).unwrap();
        assert!(invocation.success);
        assert_eq!(invocation.output.trim(), "ran install lpeg");
    }

    #[test]
    fn test_unresolved_program_falls_back_to_name() {
        let dir = tempdir().unwrap();
        let mut rocks =
            LuaRocks::with_toolchain(&ProjectLayout::new(dir.path()), Toolchain::Direct);
        rocks.program = "patty-test-no-such-program".to_string();
        assert_eq!(
            rocks.resolve_program(),
            PathBuf::from("patty-test-no-such-program")
        );
    }
}
