//! Sets `PATTY_VERSION` for the binary.
//!
//! Tagged builds use the nearest git tag (leading `v` stripped, `-dev` when
//! the tree is dirty). Builds outside a checkout use the crate version. The
//! same string goes into `[meta] tool_version` of `patty.lock`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/tags");

    let version = describe_head().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=PATTY_VERSION={version}");
}

fn describe_head() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=-dev"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let described = String::from_utf8(out.stdout).ok()?;
    let version = described.trim().trim_start_matches('v');
    (!version.is_empty()).then(|| version.to_string())
}
