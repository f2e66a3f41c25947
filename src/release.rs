//! Release artifact naming
//!
//! Maps a package descriptor and platform onto the archive published with a
//! GitHub release and onto the key it is cached under.

use crate::error::{LauncherError, LauncherResult};
use crate::manifest::PackageDescriptor;
use crate::platform::{Platform, ARCH};
use semver::Version;
use std::fmt;

/// Host release archives are downloaded from unless configured otherwise
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Derive `org/repo` from a repository URL.
///
/// Handles `https://host/org/repo(.git)`, `git+https://...` and scp-style
/// `git@host:org/repo.git` remotes.
pub fn repository_slug(url: &str) -> LauncherResult<String> {
    let trimmed = url.trim();

    let path = if let Some((_, rest)) = trimmed.split_once("://") {
        // Drop the host (and any credentials/port that come with it)
        rest.split_once('/').map(|(_, path)| path).unwrap_or("")
    } else if let Some((_, path)) = trimmed.split_once(':') {
        path
    } else {
        trimmed
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path).trim_end_matches('/');

    let mut segments = path.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(org), Some(repo), None) if !org.is_empty() && !repo.is_empty() => {
            Ok(format!("{}/{}", org, repo))
        }
        _ => Err(LauncherError::InvalidRepository(url.to_string())),
    }
}

/// Identifies one resolved artifact in the tool cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// `org/repo` the release belongs to
    pub slug: String,
    /// Released version
    pub version: Version,
}

impl CacheKey {
    /// Build the key for a package descriptor
    pub fn for_package(descriptor: &PackageDescriptor) -> LauncherResult<Self> {
        Ok(Self {
            slug: repository_slug(&descriptor.repository)?,
            version: descriptor.version.clone(),
        })
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.slug, self.version)
    }
}

/// A platform-specific release archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArtifact {
    /// Cache key the extracted binary is stored under
    pub key: CacheKey,
    /// Download URL of the archive
    pub url: String,
    /// File name of the archive (last URL segment)
    pub archive_name: String,
    /// Executable file name expected inside the archive
    pub binary_file_name: String,
}

impl ReleaseArtifact {
    /// Describe the archive for `descriptor` on `platform`, hosted at `base_url`
    pub fn new(
        descriptor: &PackageDescriptor,
        platform: Platform,
        base_url: &str,
    ) -> LauncherResult<Self> {
        let key = CacheKey::for_package(descriptor)?;
        let version = &descriptor.version;

        let archive_name = format!(
            "{}-v{}-{}-{}.tar.gz",
            descriptor.name,
            version,
            platform.as_asset_segment(),
            ARCH
        );
        let url = format!(
            "{}/{}/releases/download/v{}/{}",
            base_url.trim_end_matches('/'),
            key.slug,
            version,
            archive_name
        );

        Ok(Self {
            key,
            url,
            archive_name,
            binary_file_name: platform.binary_file_name(&descriptor.binary_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mycli() -> PackageDescriptor {
        PackageDescriptor {
            name: "mycli".to_string(),
            version: Version::new(1, 2, 3),
            repository: "https://github.com/acme/mycli.git".to_string(),
            binary_name: "mycli".to_string(),
        }
    }

    #[test]
    fn slug_from_well_formed_urls() {
        for url in [
            "https://github.com/acme/mycli",
            "https://github.com/acme/mycli.git",
            "https://github.com/acme/mycli/",
            "http://ghe.example.com:8443/acme/mycli.git",
            "git+https://github.com/acme/mycli.git",
            "git@github.com:acme/mycli.git",
        ] {
            assert_eq!(repository_slug(url).unwrap(), "acme/mycli", "{url}");
        }
    }

    #[test]
    fn slug_rejects_urls_without_org_and_repo() {
        for url in [
            "https://github.com/acme",
            "https://github.com/",
            "https://github.com/acme/mycli/tree/main",
            "",
        ] {
            assert!(
                matches!(repository_slug(url), Err(LauncherError::InvalidRepository(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn linux_release_url() {
        let artifact = ReleaseArtifact::new(&mycli(), Platform::Linux, DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            artifact.url,
            "https://github.com/acme/mycli/releases/download/v1.2.3/mycli-v1.2.3-linux-x64.tar.gz"
        );
        assert_eq!(artifact.archive_name, "mycli-v1.2.3-linux-x64.tar.gz");
        assert_eq!(artifact.binary_file_name, "mycli");
        assert_eq!(artifact.key.to_string(), "acme/mycli@1.2.3");
    }

    #[test]
    fn windows_release_url() {
        let artifact = ReleaseArtifact::new(&mycli(), Platform::Windows, DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            artifact.url,
            "https://github.com/acme/mycli/releases/download/v1.2.3/mycli-v1.2.3-win32-x64.tar.gz"
        );
        assert_eq!(artifact.binary_file_name, "mycli.exe");
    }

    #[test]
    fn url_is_deterministic_and_honours_base_url() {
        let a = ReleaseArtifact::new(&mycli(), Platform::MacOS, "https://ghe.example.com/").unwrap();
        let b = ReleaseArtifact::new(&mycli(), Platform::MacOS, "https://ghe.example.com").unwrap();
        assert_eq!(a, b);
        assert!(a.url.starts_with("https://ghe.example.com/acme/mycli/releases/download/v1.2.3/"));
        assert!(a.url.ends_with("mycli-v1.2.3-darwin-x64.tar.gz"));
    }

    #[test]
    fn archive_uses_package_name_and_binary_uses_bin_name() {
        let mut descriptor = mycli();
        descriptor.binary_name = "actions".to_string();
        let artifact = ReleaseArtifact::new(&descriptor, Platform::Windows, DEFAULT_BASE_URL).unwrap();
        assert_eq!(artifact.archive_name, "mycli-v1.2.3-win32-x64.tar.gz");
        assert_eq!(artifact.binary_file_name, "actions.exe");
    }
}
