//! Package manifest parsing
//!
//! The launched tool is described by a Cargo-style manifest: `[package]`
//! carries the name, version and source repository, and the first `[[bin]]`
//! entry names the executable shipped in release archives.

use crate::error::{LauncherError, LauncherResult};
use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw manifest as it appears on disk
#[derive(Debug, Deserialize)]
struct RawManifest {
    package: Option<RawPackage>,

    #[serde(default)]
    bin: Vec<RawBinary>,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: Option<String>,
    version: Option<String>,
    repository: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBinary {
    name: Option<String>,
}

/// Immutable description of the tool to launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Package name, used in archive names
    pub name: String,
    /// Released version
    pub version: Version,
    /// Source repository URL (release host)
    pub repository: String,
    /// Name of the executable inside release archives
    pub binary_name: String,
}

impl PackageDescriptor {
    /// Load a descriptor from a manifest file on disk
    pub async fn load(path: &Path) -> LauncherResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            LauncherError::io(format!("reading manifest {}", path.display()), e)
        })?;
        Self::from_toml_str(path, &raw)
    }

    /// Parse a descriptor from manifest contents. `path` is only used in errors.
    pub fn from_toml_str(path: &Path, raw: &str) -> LauncherResult<Self> {
        let manifest: RawManifest =
            toml::from_str(raw).map_err(|e| LauncherError::manifest(path, e.to_string()))?;

        let package = manifest
            .package
            .ok_or_else(|| LauncherError::manifest(path, "missing [package] table"))?;

        let name = required(path, "package.name", package.name)?;
        let version = required(path, "package.version", package.version)?;
        let repository = required(path, "package.repository", package.repository)?;

        let version = Version::parse(&version).map_err(|e| {
            LauncherError::manifest(path, format!("package.version {:?}: {}", version, e))
        })?;

        // First declared binary wins
        let binary_name = match manifest.bin.into_iter().next() {
            Some(bin) => required(path, "bin.name", bin.name)?,
            None => name.clone(),
        };

        debug!(%name, %version, %binary_name, "Parsed manifest {}", path.display());

        Ok(Self {
            name,
            version,
            repository,
            binary_name,
        })
    }
}

fn required(path: &Path, field: &str, value: Option<String>) -> LauncherResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LauncherError::ManifestInvalid {
            path: PathBuf::from(path),
            reason: format!("missing {}", field),
        })
}
