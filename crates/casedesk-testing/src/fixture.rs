//! Throwaway data-directory fixture.
//!
//! The auth service persists its stores as JSON files under a data directory.
//! Tests get a unique directory per fixture so they can run in parallel
//! without sharing state.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A unique temporary data directory, removed when the fixture is dropped.
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    /// Create a fresh directory under the system temp dir.
    ///
    /// Panics if the directory cannot be created — tests cannot proceed
    /// without it.
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("casedesk-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("failed to create temp data dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        // Ignore cleanup failures; the OS temp dir is reaped eventually.
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
