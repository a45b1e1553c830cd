//! `Cache.fetch`, the external collaborator interface consulted both
//! before fetching a POM and before publishing (invariant 6). Grounded on
//! this codebase's `LocalCache`, simplified to the one lookup the core
//! needs: "does this Savant artifact file already exist?"

use std::path::{Path, PathBuf};

/// Narrow interface the core consumes; `FsCache` below is the default
/// concrete implementation shipped with the binary.
pub trait Cache {
    fn fetch(&self, savant_artifact_file_name: &str) -> Option<PathBuf>;
}

/// Flat filesystem-backed cache rooted at the bridge's `<directory>`
/// argument: every Savant artifact file lives directly under the root,
/// keyed by file name (the unit the core's pre-checks key on, per
/// invariant 6).
pub struct FsCache {
    root: PathBuf,
}

impl FsCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Cache for FsCache {
    fn fetch(&self, savant_artifact_file_name: &str) -> Option<PathBuf> {
        let path = self.root.join(savant_artifact_file_name);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_returns_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        assert!(cache.fetch("widget-1.2.3.jar").is_none());
    }

    #[test]
    fn fetch_returns_path_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("widget-1.2.3.jar"), b"bytes").unwrap();
        let cache = FsCache::new(dir.path());
        assert!(cache.fetch("widget-1.2.3.jar").is_some());
    }
}
