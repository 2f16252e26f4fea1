//! End-to-end tests against the built `patty` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A project directory plus a private `PATH` the binary runs with.
struct TestContext {
    project: TempDir,
    bin_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            project: TempDir::new().expect("failed to create project dir"),
            bin_dir: TempDir::new().expect("failed to create bin dir"),
        }
    }

    fn root(&self) -> &Path {
        self.project.path()
    }

    fn file(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    fn patty(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_patty"))
            .args(args)
            .current_dir(self.root())
            .env("PATH", self.bin_dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run patty")
    }

    /// Install a shell script named `luarocks` on the private `PATH`.
    #[cfg(unix)]
    fn fake_luarocks(&self, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir.path().join("luarocks");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.patty(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage:"));
    assert!(out.contains("install"));
    assert!(out.contains("--project-dir"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx.patty(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("patty "));
}

#[test]
fn test_lock_records_reported_version() {
    let ctx = TestContext::new();
    let version = stdout(&ctx.patty(&["--version"]));
    let version = version.trim().trim_start_matches("patty ");
    assert!(!version.is_empty());

    assert!(ctx.patty(&["init"]).status.success());
    let lock = std::fs::read_to_string(ctx.file("patty.lock")).unwrap();
    assert!(lock.contains(&format!("tool_version = \"{version}\"")));
}

#[test]
fn test_init_creates_project_files() {
    let ctx = TestContext::new();
    let output = ctx.patty(&["init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created patty.toml"));

    let manifest = std::fs::read_to_string(ctx.file("patty.toml")).unwrap();
    assert!(manifest.contains("name = \"my-project\""));
    assert!(manifest.contains("lua = \">=5.1\""));
    assert!(ctx.file("patty.lock").is_file());
    assert!(ctx.file("patty_loader.lua").is_file());
    assert_eq!(
        std::fs::read_to_string(ctx.file(".gitignore")).unwrap(),
        ".patty/\n"
    );
}

#[test]
fn test_project_dir_option() {
    let ctx = TestContext::new();
    let elsewhere = TempDir::new().unwrap();
    let output = ctx.patty(&["init", "--project-dir", elsewhere.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(elsewhere.path().join("patty.toml").is_file());
    assert!(!ctx.file("patty.toml").exists());
}

#[test]
fn test_second_init_fails_without_changes() {
    let ctx = TestContext::new();
    assert!(ctx.patty(&["init"]).status.success());
    let before = std::fs::read(ctx.file("patty.toml")).unwrap();

    let output = ctx.patty(&["init"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(std::fs::read(ctx.file("patty.toml")).unwrap(), before);
}

#[test]
fn test_remove_unknown_lists_declared() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.file("patty.toml"),
        "[project]\nname = \"game\"\nversion = \"0.1.0\"\nlua = \">=5.1\"\n\n[dependencies]\nlpeg = \"latest\"\n",
    )
    .unwrap();
    let before = std::fs::read(ctx.file("patty.toml")).unwrap();

    let output = ctx.patty(&["rm", "luasocket"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("luasocket is not a dependency"));
    assert!(err.contains("Declared dependencies: lpeg"));
    assert_eq!(std::fs::read(ctx.file("patty.toml")).unwrap(), before);
}

#[test]
fn test_remove_declared() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.file("patty.toml"),
        "[project]\nname = \"game\"\nversion = \"0.1.0\"\nlua = \">=5.1\"\n\n[dependencies]\nlpeg = \"latest\"\n",
    )
    .unwrap();

    let output = ctx.patty(&["remove", "lpeg"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!std::fs::read_to_string(ctx.file("patty.toml")).unwrap().contains("lpeg"));
}

#[test]
fn test_install_without_luarocks_leaves_manifest() {
    let ctx = TestContext::new();
    assert!(ctx.patty(&["init"]).status.success());
    let before = std::fs::read(ctx.file("patty.toml")).unwrap();

    let output = ctx.patty(&["install", "lpeg"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("luarocks was not found"));
    assert_eq!(std::fs::read(ctx.file("patty.toml")).unwrap(), before);
}

#[cfg(unix)]
#[test]
fn test_install_with_fake_luarocks() {
    let ctx = TestContext::new();
    ctx.fake_luarocks(
        r#"echo "Installing https://luarocks.org/$2"
echo "No existing manifest. Attempting to rebuild..."
echo ok > ".patty/$2.installed"
echo "$2 is now installed in .patty""#,
    );
    assert!(ctx.patty(&["init"]).status.success());

    let output = ctx.patty(&["i", "luasocket", "lpeg@1.1.0-1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("require(\"patty_loader\")"));
    assert!(out.contains("Installed 2 packages"));

    let lock = std::fs::read_to_string(ctx.file("patty.lock")).unwrap();
    let lpeg = lock.find("name = \"lpeg\"").unwrap();
    let luasocket = lock.find("name = \"luasocket\"").unwrap();
    assert!(lpeg < luasocket);
    assert!(lock.contains("version = \"1.1.0-1\""));
    assert!(ctx.file(".patty/lpeg.installed").is_file());
    assert!(ctx.file(".patty/luasocket.installed").is_file());
}

#[cfg(unix)]
#[test]
fn test_failed_install_reports_filtered_output() {
    let ctx = TestContext::new();
    ctx.fake_luarocks(
        r#"echo "No existing manifest. Attempting to rebuild..."
echo "Error: No results matching query were found for Lua 5.4." >&2
exit 1"#,
    );
    assert!(ctx.patty(&["init"]).status.success());
    let lock_before = std::fs::read(ctx.file("patty.lock")).unwrap();

    let output = ctx.patty(&["install", "nosuchrock"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("failed to install nosuchrock"));
    assert!(err.contains("No results matching query"));
    assert!(!err.contains("No existing manifest"));
    assert_eq!(std::fs::read(ctx.file("patty.lock")).unwrap(), lock_before);

    // The intent was saved before the failure.
    assert!(
        std::fs::read_to_string(ctx.file("patty.toml"))
            .unwrap()
            .contains("nosuchrock")
    );
}

#[cfg(unix)]
#[test]
fn test_update_without_dependencies_writes_nothing() {
    let ctx = TestContext::new();
    ctx.fake_luarocks("exit 0");
    std::fs::write(
        ctx.file("patty.toml"),
        "[project]\nname = \"game\"\nversion = \"0.1.0\"\nlua = \">=5.1\"\n",
    )
    .unwrap();

    let output = ctx.patty(&["update"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No dependencies found"));
    assert!(!ctx.file("patty.lock").exists());
    assert!(!ctx.file("patty_loader.lua").exists());
}
