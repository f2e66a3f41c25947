//! Platform detection for release artifacts
//!
//! Release archives are published per operating system and always for x64.

use crate::error::{LauncherError, LauncherResult};
use std::fmt;

/// Architecture segment used in every archive name
pub const ARCH: &str = "x64";

/// Operating system a release archive is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Windows - binaries carry an `.exe` suffix
    Windows,
    /// macOS
    MacOS,
    /// Linux
    Linux,
}

impl Platform {
    /// Detect the current platform
    pub fn detect() -> LauncherResult<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Parse an operating system identifier.
    ///
    /// Accepts both Rust's `std::env::consts::OS` names and the names used in
    /// release archives.
    pub fn from_os(os: &str) -> LauncherResult<Self> {
        match os {
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::MacOS),
            "linux" => Ok(Self::Linux),
            other => Err(LauncherError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Platform segment of a release archive name
    pub fn as_asset_segment(&self) -> &'static str {
        match self {
            Self::Windows => "win32",
            Self::MacOS => "darwin",
            Self::Linux => "linux",
        }
    }

    /// File name of an executable on this platform
    pub fn binary_file_name(&self, name: &str) -> String {
        match self {
            Self::Windows => format!("{}.exe", name),
            Self::MacOS | Self::Linux => name.to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_asset_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Platform; 3] = [Platform::Windows, Platform::MacOS, Platform::Linux];

    #[test]
    fn exe_suffix_only_on_windows() {
        for platform in ALL {
            let file_name = platform.binary_file_name("mycli");
            assert_eq!(
                file_name.ends_with(".exe"),
                platform == Platform::Windows,
                "{platform}: {file_name}"
            );
        }
        assert_eq!(Platform::Windows.binary_file_name("mycli"), "mycli.exe");
        assert_eq!(Platform::Linux.binary_file_name("mycli"), "mycli");
    }

    #[test]
    fn parses_rust_and_asset_names() {
        assert_eq!(Platform::from_os("windows").unwrap(), Platform::Windows);
        assert_eq!(Platform::from_os("win32").unwrap(), Platform::Windows);
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::MacOS);
        assert_eq!(Platform::from_os("darwin").unwrap(), Platform::MacOS);
        assert_eq!(Platform::from_os("linux").unwrap(), Platform::Linux);
    }

    #[test]
    fn rejects_other_systems() {
        let err = Platform::from_os("freebsd").unwrap_err();
        assert!(matches!(err, LauncherError::UnsupportedPlatform(ref os) if os == "freebsd"));
    }

    #[test]
    fn asset_segment_round_trips() {
        for platform in ALL {
            assert_eq!(Platform::from_os(platform.as_asset_segment()).unwrap(), platform);
        }
    }

    #[test]
    fn detect_matches_running_system() {
        assert_eq!(
            Platform::detect().ok(),
            Platform::from_os(std::env::consts::OS).ok()
        );
    }
}
