//! Tool cache for resolved release binaries
//!
//! Extracted binaries are stored per `(org/repo, version)` key so repeated
//! launches of the same release never download it twice.
//!
//! # Entry States
//!
//! | State | On disk | Description |
//! |-------|---------|-------------|
//! | Miss | nothing | Never stored |
//! | Building | directory without a valid marker or binary | Unusable, replaced on next store |
//! | Complete | directory + marker + binary | Usable, returned by `find` |
//!
//! Concurrent launches with the same key may both miss and both download.
//! The first store to finish wins; later stores return the existing entry
//! and never touch a binary that has already been handed out.

pub mod tool_dir;

pub use tool_dir::{CacheMarker, CacheState, DirToolCache, MARKER_FILE};

use crate::error::LauncherResult;
use crate::release::CacheKey;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Keyed storage for resolved binaries
#[async_trait]
pub trait ToolCache: Send + Sync {
    /// Directory holding the binary `name` for `key`, if a complete entry has it
    async fn find(&self, key: &CacheKey, name: &str) -> LauncherResult<Option<PathBuf>>;

    /// Copy `file` into the cache as `name` under `key`, returning the entry directory
    async fn store(&self, file: &Path, name: &str, key: &CacheKey) -> LauncherResult<PathBuf>;
}
