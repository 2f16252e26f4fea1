//! Installer output filtering.
//!
//! luarocks relays everything the native toolchain prints. On Windows that
//! includes MSVC banners for every object file, which buries the one line
//! that matters. Only lines carrying one of [`KEEP_MARKERS`] survive, after
//! dropping anything that matches [`DROP_PATTERNS`].

/// Lowercase substrings marking toolchain chatter.
pub const DROP_PATTERNS: &[&str] = &[
    "microsoft (r) incremental linker",
    "copyright (c) microsoft corporation",
    "creating library",
    "cl /nologo",
    "link -dll",
    "no existing manifest",
    "visual studio",
    "vcvarsall.bat",
    "environment initialized",
];

/// Lowercase substrings marking lines worth showing.
pub const KEEP_MARKERS: &[&str] = &["error", "warning", "installing", "is now installed", "failed"];

/// Reduce raw installer output to the lines a user needs to see.
///
/// # Example
///
/// ```
/// use patty_core::installer::filter_output;
///
/// let raw = "Creating library lfs.lib and object lfs.exp\nlfs.c(12): error C2065: undeclared identifier\n";
/// assert_eq!(filter_output(raw), "lfs.c(12): error C2065: undeclared identifier");
/// ```
pub fn filter_output(raw: &str) -> String {
    raw.lines()
        .filter(|line| !is_noise(line))
        .filter(|line| {
            let lower = line.to_lowercase();
            KEEP_MARKERS.iter().any(|m| lower.contains(m))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_noise(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("**") {
        return true;
    }
    let lower = line.to_lowercase();
    DROP_PATTERNS.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_msvc_banners() {
        let raw = "\
**********************************************************************
** Visual Studio 2022 Developer Command Prompt v17.8.3
** Copyright (c) 2022 Microsoft Corporation
**********************************************************************
[vcvarsall.bat] Environment initialized for: 'x64'
cl /nologo /MD /O2 -c -Fosrc/lfs.obj -IC:/lua/include src/lfs.c
link -dll -def:lfs.def -out:lfs.dll C:/lua/lua54.lib src/lfs.obj
   Creating library lfs.lib and object lfs.exp
Microsoft (R) Incremental Linker Version 14.38.33133.0
Copyright (C) Microsoft Corporation.  All rights reserved.
No existing manifest. Attempting to rebuild...
luafilesystem 1.8.0-1 is now installed in .patty (license: MIT/X11)
";
        assert_eq!(
            filter_output(raw),
            "luafilesystem 1.8.0-1 is now installed in .patty (license: MIT/X11)"
        );
    }

    #[test]
    fn test_keeps_markers_case_insensitively() {
        let raw = "Installing https://luarocks.org/lpeg-1.1.0-1.src.rock\n\
                   WARNING: unsupported Lua version\n\
                   Build FAILED\n\
                   some unrelated line\n";
        assert_eq!(
            filter_output(raw),
            "Installing https://luarocks.org/lpeg-1.1.0-1.src.rock\n\
             WARNING: unsupported Lua version\n\
             Build FAILED"
        );
    }

    #[test]
    fn test_drop_wins_over_keep() {
        // Mentions "error" but is toolchain chatter.
        let raw = "Copyright (c) Microsoft Corporation. error reporting enabled\n";
        assert_eq!(filter_output(raw), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(filter_output(""), "");
        assert_eq!(filter_output("\n\n   \n"), "");
    }
}
