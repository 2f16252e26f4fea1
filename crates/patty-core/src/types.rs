//! Package identifiers and version constraints.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::str::FromStr;

use crate::error::PattyError;

/// Version sentinel meaning "no pinned version".
pub const LATEST: &str = "latest";

/// A luarocks package name, kept verbatim.
///
/// Ordering is plain byte order of the name, which is the order used for
/// install runs and for the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Wrap a package name.
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for PackageName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PackageName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PackageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PackageName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A version constraint as the user wrote it.
///
/// `"latest"` (or an empty string) means no explicit version is passed to
/// the installer; anything else is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionReq(String);

impl VersionReq {
    /// Wrap a constraint string.
    pub fn new(v: &str) -> Self {
        Self(v.to_string())
    }

    /// The `"latest"` sentinel.
    pub fn latest() -> Self {
        Self(LATEST.to_string())
    }

    /// True for `"latest"` and for the empty string.
    pub fn is_latest(&self) -> bool {
        self.0.is_empty() || self.0 == LATEST
    }

    /// The explicit version to hand to the installer, if any.
    pub fn explicit(&self) -> Option<&str> {
        if self.is_latest() {
            None
        } else {
            Some(&self.0)
        }
    }

    /// Return the constraint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VersionReq {
    fn default() -> Self {
        Self::latest()
    }
}

impl std::fmt::Display for VersionReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for VersionReq {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for VersionReq {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VersionReq {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for VersionReq {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VersionReq {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A positional `install` argument: `name` or `name@version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Package to declare.
    pub name: PackageName,
    /// Requested version, `"latest"` when none was given.
    pub version: VersionReq,
}

impl PackageSpec {
    /// Parse `name` or `name@version`, splitting on the first `@`.
    ///
    /// # Errors
    ///
    /// Returns [`PattyError::InvalidPackageArgument`] if the name part is
    /// empty.
    ///
    /// # Example
    ///
    /// ```
    /// use patty_core::PackageSpec;
    ///
    /// let spec = PackageSpec::parse("lua-cjson@2.1.0-1").unwrap();
    /// assert_eq!(spec.name, "lua-cjson");
    /// assert_eq!(spec.version, "2.1.0-1");
    ///
    /// let spec = PackageSpec::parse("luasocket").unwrap();
    /// assert!(spec.version.is_latest());
    /// ```
    pub fn parse(arg: &str) -> Result<Self, PattyError> {
        let (name, version) = match arg.split_once('@') {
            Some((name, version)) => (name.trim(), version.trim()),
            None => (arg.trim(), ""),
        };

        if name.is_empty() {
            return Err(PattyError::InvalidPackageArgument {
                argument: arg.to_string(),
            });
        }

        let version = if version.is_empty() {
            VersionReq::latest()
        } else {
            VersionReq::new(version)
        };

        Ok(Self {
            name: PackageName::new(name),
            version,
        })
    }
}

impl FromStr for PackageSpec {
    type Err = PattyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
