//! Resolve a release binary through the tool cache and launch it
//!
//! One procedure serves every action: the caller supplies an
//! [`ArgsBuilder`] and the launcher handles platform checks, cache lookup,
//! download, extraction and execution.

mod process;

pub use process::{ProcessRunner, SystemProcessRunner};

use crate::cache::ToolCache;
use crate::download::{sha256_file, Downloader};
use crate::error::{LauncherError, LauncherResult};
use crate::extract::{extract_tar_gz, find_binary};
use crate::inputs::ActionInputs;
use crate::manifest::PackageDescriptor;
use crate::platform::Platform;
use crate::release::{ReleaseArtifact, DEFAULT_BASE_URL};
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::{debug, info};

/// Produces the command-line arguments for one launch
pub trait ArgsBuilder: Send + Sync {
    /// Build the argument list from the action's inputs
    fn build(&self, inputs: &dyn ActionInputs) -> LauncherResult<Vec<String>>;
}

impl<F> ArgsBuilder for F
where
    F: Fn(&dyn ActionInputs) -> LauncherResult<Vec<String>> + Send + Sync,
{
    fn build(&self, inputs: &dyn ActionInputs) -> LauncherResult<Vec<String>> {
        self(inputs)
    }
}

/// Arguments known up front, independent of inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedArgs(pub Vec<String>);

impl ArgsBuilder for FixedArgs {
    fn build(&self, _inputs: &dyn ActionInputs) -> LauncherResult<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Observes archive downloads, e.g. to show a spinner
pub trait DownloadProgress: Send + Sync {
    /// A download of `artifact` is starting
    fn started(&self, artifact: &ReleaseArtifact);

    /// The download of `artifact` ended
    fn finished(&self, artifact: &ReleaseArtifact, success: bool);
}

/// Outcome of resolving the binary for a platform
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The archive the binary comes from
    pub artifact: ReleaseArtifact,
    /// Executable inside the cache entry
    pub binary_path: PathBuf,
    /// Whether the binary was already cached
    pub cache_hit: bool,
}

/// Resolves and launches the tool described by a manifest
pub struct Launcher {
    descriptor: PackageDescriptor,
    cache: Box<dyn ToolCache>,
    downloader: Box<dyn Downloader>,
    runner: Box<dyn ProcessRunner>,
    base_url: String,
    os: String,
    scratch_root: Option<PathBuf>,
    progress: Option<Box<dyn DownloadProgress>>,
}

impl Launcher {
    /// Create a launcher for the current operating system
    pub fn new(
        descriptor: PackageDescriptor,
        cache: Box<dyn ToolCache>,
        downloader: Box<dyn Downloader>,
        runner: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            descriptor,
            cache,
            downloader,
            runner,
            base_url: DEFAULT_BASE_URL.to_string(),
            os: std::env::consts::OS.to_string(),
            scratch_root: std::env::var_os("RUNNER_TEMP").map(PathBuf::from),
            progress: None,
        }
    }

    /// Download archives from `base_url` instead of github.com
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve for operating system `os` instead of the running one
    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = os.into();
        self
    }

    /// Create download and extraction scratch directories below `dir`
    pub fn with_scratch_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(dir.into());
        self
    }

    /// Report downloads to `progress`
    pub fn with_progress(mut self, progress: Box<dyn DownloadProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The package being launched
    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    /// Platform this launcher resolves for
    pub fn platform(&self) -> LauncherResult<Platform> {
        Platform::from_os(&self.os)
    }

    /// Locate the binary for `platform`, downloading it on a cache miss
    pub async fn resolve(&self, platform: Platform) -> LauncherResult<Resolution> {
        let artifact = ReleaseArtifact::new(&self.descriptor, platform, &self.base_url)?;

        if let Some(dir) = self
            .cache
            .find(&artifact.key, &artifact.binary_file_name)
            .await?
        {
            info!(key = %artifact.key, "Using cached {}", artifact.binary_file_name);
            return Ok(Resolution {
                binary_path: dir.join(&artifact.binary_file_name),
                artifact,
                cache_hit: true,
            });
        }

        info!(key = %artifact.key, %platform, "Tool not cached, fetching release");

        let scratch = self.scratch_dir()?;
        let archive_path = scratch.path().join(&artifact.archive_name);
        if let Some(progress) = &self.progress {
            progress.started(&artifact);
        }
        let downloaded = self.downloader.download(&artifact.url, &archive_path).await;
        if let Some(progress) = &self.progress {
            progress.finished(&artifact, downloaded.is_ok());
        }
        downloaded?;
        let sha256 = sha256_file(&archive_path).await?;
        debug!(%sha256, "Downloaded {}", artifact.archive_name);

        let extract_dir = scratch.path().join("extracted");
        let file_name = artifact.binary_file_name.clone();
        let archive_name = artifact.archive_name.clone();
        let binary = tokio::task::spawn_blocking(move || -> LauncherResult<PathBuf> {
            extract_tar_gz(&archive_path, &extract_dir)?;
            find_binary(&extract_dir, &file_name, &archive_name)
        })
        .await
        .map_err(|e| LauncherError::Internal(format!("extraction task failed: {}", e)))??;

        let dir = self
            .cache
            .store(&binary, &artifact.binary_file_name, &artifact.key)
            .await?;

        Ok(Resolution {
            binary_path: dir.join(&artifact.binary_file_name),
            artifact,
            cache_hit: false,
        })
    }

    /// Build arguments, resolve the binary and run it.
    ///
    /// The platform check and argument building happen before any network or
    /// filesystem access. A non-zero exit of the tool is an error carrying
    /// its exit code.
    pub async fn invoke(
        &self,
        builder: &dyn ArgsBuilder,
        inputs: &dyn ActionInputs,
    ) -> LauncherResult<()> {
        let platform = self.platform()?;
        let args = builder.build(inputs)?;
        debug!(?args, "Built arguments for {}", self.descriptor.name);

        let resolution = self.resolve(platform).await?;

        let code = self.runner.run(&resolution.binary_path, &args).await?;
        if code != 0 {
            return Err(LauncherError::ProcessExit {
                command: resolution.artifact.binary_file_name,
                code,
            });
        }

        Ok(())
    }

    fn scratch_dir(&self) -> LauncherResult<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("actions-launcher-");
        match &self.scratch_root {
            Some(root) => {
                std::fs::create_dir_all(root)
                    .map_err(|e| LauncherError::io(format!("creating {}", root.display()), e))?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| LauncherError::io("creating scratch directory", e))
    }
}
