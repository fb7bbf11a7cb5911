//! The two-tier artifact write primitive.
//!
//! Every emitted file belongs to one of two tiers. Base artifacts hold the
//! machinery derived from the specification and are rewritten on every run;
//! hand edits there are lost by design. Derived artifacts are the extension
//! points: written once when absent, then left alone forever so user
//! customizations survive regeneration.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Regeneration tier of an emitted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Regenerated on every run; overwrites unconditionally.
    Base,
    /// Created once; an existing file is never touched.
    Derived,
}

/// Write one artifact according to its tier, creating parent directories
/// as needed. Returns whether the file was actually written.
pub fn write_artifact(path: &Path, tier: Tier, contents: &str) -> Result<bool> {
    if tier == Tier::Derived && path.exists() {
        debug!(path = %path.display(), "skipping existing derived artifact");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    debug!(path = %path.display(), tier = ?tier, "wrote artifact");

    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn write_artifact___base_tier___overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen/base/BaseThing.h");

        assert!(write_artifact(&path, Tier::Base, "first").unwrap());
        assert!(write_artifact(&path, Tier::Base, "second").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_artifact___derived_tier___preserves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen/Thing.h");

        assert!(write_artifact(&path, Tier::Derived, "original").unwrap());
        assert!(!write_artifact(&path, Tier::Derived, "regenerated").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn write_artifact___missing_parents___are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/d.cpp");

        assert!(write_artifact(&path, Tier::Derived, "x").unwrap());
        assert!(path.exists());
    }
}
