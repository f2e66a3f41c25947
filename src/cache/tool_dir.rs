//! Directory-backed tool cache
//!
//! Layout follows the runner tool cache convention:
//! `{root}/{org}/{repo}/{version}/x64/` holds the binary next to a
//! `.complete` marker naming it. Entries are assembled in a staging
//! directory beside the entry and renamed into place, so an entry path never
//! exposes a partly written binary.

use crate::cache::ToolCache;
use crate::error::{LauncherError, LauncherResult};
use crate::platform::ARCH;
use crate::release::CacheKey;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Marker file inside a finished entry
pub const MARKER_FILE: &str = ".complete";

/// State of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// Nothing stored for this key
    Miss,
    /// Directory exists but has no valid marker or lost its binary
    Building,
    /// Entry is finalized and usable
    Complete,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Miss => write!(f, "miss"),
            Self::Building => write!(f, "building"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Contents of the completion marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMarker {
    /// File name of the cached binary
    pub binary: String,
    /// When the entry was stored
    pub stored_at: DateTime<Utc>,
}

/// Tool cache rooted at a local directory
#[derive(Debug, Clone)]
pub struct DirToolCache {
    root: PathBuf,
}

impl DirToolCache {
    /// Create a cache rooted at `root` (created lazily on first store)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default cache root when neither the runner nor the config provide one
    pub fn default_root() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("actions-launcher")
            .join("tools")
    }

    /// Directory an entry lives in
    pub fn entry_dir(&self, key: &CacheKey) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in key.slug.split('/') {
            dir.push(segment);
        }
        dir.join(key.version.to_string()).join(ARCH)
    }

    fn marker_path(&self, key: &CacheKey) -> PathBuf {
        self.entry_dir(key).join(MARKER_FILE)
    }

    /// Current state of the entry for `key`
    pub async fn state(&self, key: &CacheKey) -> LauncherResult<CacheState> {
        let dir = self.entry_dir(key);
        if !exists(&dir).await? {
            return Ok(CacheState::Miss);
        }
        match self.marker(key).await? {
            Some(marker) if exists(&dir.join(&marker.binary)).await? => Ok(CacheState::Complete),
            _ => Ok(CacheState::Building),
        }
    }

    /// Read the completion marker for `key`. An unreadable marker counts as absent.
    pub async fn marker(&self, key: &CacheKey) -> LauncherResult<Option<CacheMarker>> {
        let path = self.marker_path(key);
        if !exists(&path).await? {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| LauncherError::io(format!("reading {}", path.display()), e))?;
        match serde_json::from_str(&raw) {
            Ok(marker) => Ok(Some(marker)),
            Err(e) => {
                debug!("Ignoring unreadable marker {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Whether a complete entry for `key` holds the binary `name`
    async fn holds(&self, key: &CacheKey, name: &str) -> LauncherResult<bool> {
        if self.state(key).await? != CacheState::Complete {
            return Ok(false);
        }
        Ok(self
            .marker(key)
            .await?
            .is_some_and(|marker| marker.binary == name))
    }

    /// Build a finished entry for `file` in a fresh staging directory below `parent`
    async fn stage(&self, file: &Path, name: &str, parent: &Path) -> LauncherResult<tempfile::TempDir> {
        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(parent)
            .map_err(|e| LauncherError::io(format!("creating staging dir in {}", parent.display()), e))?;

        let dest = staging.path().join(name);
        fs::copy(file, &dest).await.map_err(|e| {
            LauncherError::io(format!("copying {} into the cache", file.display()), e)
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755))
                .await
                .map_err(|e| LauncherError::io(format!("making {} executable", dest.display()), e))?;
        }

        let record = CacheMarker {
            binary: name.to_string(),
            stored_at: Utc::now(),
        };
        let marker = staging.path().join(MARKER_FILE);
        fs::write(&marker, serde_json::to_string(&record)?)
            .await
            .map_err(|e| LauncherError::io(format!("writing {}", marker.display()), e))?;

        Ok(staging)
    }

    /// Move an unusable entry out of the way. Its files are deleted once
    /// the returned directory is dropped.
    async fn evict(&self, dir: &Path, parent: &Path) -> LauncherResult<tempfile::TempDir> {
        let trash = tempfile::Builder::new()
            .prefix(".stale-")
            .tempdir_in(parent)
            .map_err(|e| LauncherError::io(format!("creating trash dir in {}", parent.display()), e))?;

        match fs::rename(dir, trash.path().join(ARCH)).await {
            Ok(()) => debug!("Evicted stale entry {}", dir.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(LauncherError::io(format!("evicting {}", dir.display()), e)),
        }
        Ok(trash)
    }
}

#[async_trait]
impl ToolCache for DirToolCache {
    async fn find(&self, key: &CacheKey, name: &str) -> LauncherResult<Option<PathBuf>> {
        let dir = self.entry_dir(key);
        match self.state(key).await? {
            CacheState::Complete => {
                if !self.holds(key, name).await? {
                    debug!(%key, "Cached entry does not hold {}", name);
                    return Ok(None);
                }
                debug!(%key, "Found cached tool in {}", dir.display());
                Ok(Some(dir))
            }
            CacheState::Building => {
                warn!(%key, "Ignoring incomplete cache entry");
                Ok(None)
            }
            CacheState::Miss => Ok(None),
        }
    }

    async fn store(&self, file: &Path, name: &str, key: &CacheKey) -> LauncherResult<PathBuf> {
        let dir = self.entry_dir(key);

        // A finished entry is never rewritten; someone may be running it
        if self.holds(key, name).await? {
            debug!(%key, "Entry already complete, keeping {}", dir.display());
            return Ok(dir);
        }

        let parent = dir
            .parent()
            .ok_or_else(|| LauncherError::Internal(format!("{} has no parent", dir.display())))?
            .to_path_buf();
        fs::create_dir_all(&parent)
            .await
            .map_err(|e| LauncherError::io(format!("creating {}", parent.display()), e))?;

        let staging = self.stage(file, name, &parent).await?;

        let _trash = if exists(&dir).await? && !self.holds(key, name).await? {
            Some(self.evict(&dir, &parent).await?)
        } else {
            None
        };

        if let Err(e) = fs::rename(staging.path(), &dir).await {
            // Another launch finished the same entry first
            if self.holds(key, name).await? {
                debug!(%key, "Entry completed concurrently, keeping {}", dir.display());
                return Ok(dir);
            }
            return Err(LauncherError::io(
                format!("moving {} into place", dir.display()),
                e,
            ));
        }

        info!(%key, "Cached {} in {}", name, dir.display());
        Ok(dir)
    }
}

async fn exists(path: &Path) -> LauncherResult<bool> {
    fs::try_exists(path).await.map_err(|e| LauncherError::Cache {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
