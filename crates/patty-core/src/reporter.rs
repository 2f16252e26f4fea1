//! Reporter trait for dependency injection
//!
//! Operations report progress through this trait so they stay independent of
//! how (or whether) anything is drawn.

use crate::progress::Spinner;
use crate::types::{PackageName, VersionReq};

/// Receives user-facing progress from operations.
pub trait Reporter: Send + Sync {
    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// A dependency was declared in the manifest.
    fn added(&self, name: &PackageName, version: &VersionReq);

    /// A dependency was removed from the manifest.
    fn removed(&self, name: &PackageName);

    /// The installer is about to run for a package.
    fn installing(&self, name: &PackageName, version: &VersionReq);

    /// A package installed successfully.
    fn installed(&self, name: &PackageName, version: &VersionReq);

    /// A package failed to install. `output` is the filtered installer output.
    fn failed(&self, name: &PackageName, version: &VersionReq, output: &str);

    /// Start an activity indicator, if this reporter draws one.
    ///
    /// The indicator runs until the returned value is stopped or dropped.
    fn activity(&self, label: &str) -> Option<Spinner>;
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn added(&self, name: &PackageName, version: &VersionReq) {
        (**self).added(name, version);
    }
    fn removed(&self, name: &PackageName) {
        (**self).removed(name);
    }
    fn installing(&self, name: &PackageName, version: &VersionReq) {
        (**self).installing(name, version);
    }
    fn installed(&self, name: &PackageName, version: &VersionReq) {
        (**self).installed(name, version);
    }
    fn failed(&self, name: &PackageName, version: &VersionReq, output: &str) {
        (**self).failed(name, version, output);
    }
    fn activity(&self, label: &str) -> Option<Spinner> {
        (**self).activity(label)
    }
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn added(&self, _: &PackageName, _: &VersionReq) {}
    fn removed(&self, _: &PackageName) {}
    fn installing(&self, _: &PackageName, _: &VersionReq) {}
    fn installed(&self, _: &PackageName, _: &VersionReq) {}
    fn failed(&self, _: &PackageName, _: &VersionReq, _: &str) {}
    fn activity(&self, _: &str) -> Option<Spinner> {
        None
    }
}
