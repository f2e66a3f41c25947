//! CLI command implementations

pub mod action;
pub mod exec;
pub mod resolve;

pub use action::execute as action;
pub use exec::execute as exec;
pub use resolve::execute as resolve;

use crate::cache::DirToolCache;
use crate::config::Config;
use crate::download::HttpDownloader;
use crate::error::LauncherResult;
use crate::launcher::{Launcher, SystemProcessRunner};
use crate::manifest::PackageDescriptor;
use crate::ui::{DownloadSpinner, UiContext};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tool cache root: explicit flag or `RUNNER_TOOL_CACHE`, then the
/// configured directory, then the per-user cache directory
pub fn cache_root(cache_dir: Option<&Path>, config: &Config) -> PathBuf {
    cache_dir
        .map(Path::to_path_buf)
        .or_else(|| config.cache.dir.clone())
        .unwrap_or_else(DirToolCache::default_root)
}

/// Load the manifest and wire a launcher with the production seams
pub async fn build_launcher(
    manifest: &Path,
    cache_dir: Option<&Path>,
    config: &Config,
    ctx: &UiContext,
) -> LauncherResult<Launcher> {
    let descriptor = PackageDescriptor::load(manifest).await?;
    let root = cache_root(cache_dir, config);
    debug!("Tool cache root: {}", root.display());

    Ok(Launcher::new(
        descriptor,
        Box::new(DirToolCache::new(root)),
        Box::new(HttpDownloader::from_env()),
        Box::new(SystemProcessRunner::new()),
    )
    .with_base_url(config.download.base_url.clone())
    .with_progress(Box::new(DownloadSpinner::new(ctx))))
}
