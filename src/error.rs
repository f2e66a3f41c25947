//! Error types for the launcher
//!
//! All modules use `LauncherResult<T>` as their return type. Errors are only
//! ever handled once, at the top of `main`, where they become the action's
//! single failure message.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for launcher operations
pub type LauncherResult<T> = Result<T, LauncherError>;

/// All errors that can occur while resolving and launching a tool
#[derive(Error, Debug)]
pub enum LauncherError {
    // Environment errors
    #[error("Unsupported platform: {0}. Supported platforms are win32, darwin and linux.")]
    UnsupportedPlatform(String),

    // Manifest errors
    #[error("Invalid manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Repository URL {0} does not point at an organization/repository")]
    InvalidRepository(String),

    // Input errors
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    #[error("Invalid value for input {name}: {reason}")]
    InvalidInput { name: String, reason: String },

    // Resolution errors
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to extract {archive}: {reason}")]
    Extraction { archive: PathBuf, reason: String },

    #[error("Binary {name} not found in {archive}")]
    BinaryNotFound { name: String, archive: String },

    #[error("Tool cache error at {path}: {reason}")]
    Cache { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Failed to start {command}")]
    ProcessSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed with exit code {code}")]
    ProcessExit { command: String, code: i32 },

    #[error("{0} was terminated by a signal")]
    ProcessSignaled(String),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LauncherError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a manifest validation error
    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ManifestInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Download {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an extraction error
    pub fn extraction(archive: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Extraction {
            archive: archive.into(),
            reason: reason.to_string(),
        }
    }

    /// Exit code the process should terminate with for this error.
    ///
    /// A launched tool that exits non-zero hands its own status back to the
    /// workflow; everything else is a generic failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ProcessExit { code, .. } => u8::try_from(*code)
                .ok()
                .filter(|c| *c != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingInput(_) => Some("Add the input under `with:` in the workflow step"),
            Self::Download { .. } => {
                Some("Check that the release exists, or set GITHUB_TOKEN for private repositories")
            }
            Self::BinaryNotFound { .. } => {
                Some("The release archive must contain the binary declared in the manifest")
            }
            _ => None,
        }
    }
}
