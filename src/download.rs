//! Release archive download
//!
//! A single blocking HTTP GET per archive, run on the blocking pool so the
//! async runtime stays free. No retries: a failed download fails the launch.

use crate::error::{LauncherError, LauncherResult};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fetches a URL into a local file
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` into `dest`, replacing any existing file
    async fn download(&self, url: &str, dest: &Path) -> LauncherResult<()>;
}

/// Host that always receives the token
pub const GITHUB_HOST: &str = "github.com";

/// Downloader backed by `ureq`
#[derive(Clone)]
pub struct HttpDownloader {
    token: Option<String>,
    trusted_hosts: Vec<String>,
}

impl std::fmt::Debug for HttpDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDownloader")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("trusted_hosts", &self.trusted_hosts)
            .finish()
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self {
            token: None,
            trusted_hosts: vec![GITHUB_HOST.to_string()],
        }
    }
}

impl HttpDownloader {
    /// Create a downloader that sends no credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a downloader authenticating with `GITHUB_TOKEN` or `GH_TOKEN`
    /// when set. The host of `GITHUB_SERVER_URL` is trusted alongside github.com.
    pub fn from_env() -> Self {
        let token = ["GITHUB_TOKEN", "GH_TOKEN"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|token| !token.trim().is_empty());

        let mut downloader = Self {
            token,
            ..Self::default()
        };
        if let Some(host) = std::env::var("GITHUB_SERVER_URL")
            .ok()
            .as_deref()
            .and_then(https_host)
        {
            downloader = downloader.with_trusted_host(host);
        }
        downloader
    }

    /// Use `token` as a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Also send the token to `host`
    pub fn with_trusted_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into().to_ascii_lowercase();
        if !self.trusted_hosts.contains(&host) {
            self.trusted_hosts.push(host);
        }
        self
    }

    /// Token to send with a request for `url`. Only https URLs on a trusted
    /// host get one.
    fn token_for(&self, url: &str) -> Option<&str> {
        let token = self.token.as_deref()?;
        let host = https_host(url)?;
        if self.trusted_hosts.iter().any(|trusted| *trusted == host) {
            Some(token)
        } else {
            debug!("Not sending token to {}", host);
            None
        }
    }

    fn fetch(url: &str, token: Option<&str>, dest: &Path) -> LauncherResult<u64> {
        let mut request = ureq::get(url).header("User-Agent", user_agent());
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => LauncherError::download(url, format!("HTTP {}", status)),
            other => LauncherError::download(url, other),
        })?;

        let mut reader = response.into_body().into_reader();
        let file = File::create(dest)
            .map_err(|e| LauncherError::io(format!("creating {}", dest.display()), e))?;
        let mut writer = BufWriter::new(file);

        let bytes = io::copy(&mut reader, &mut writer).map_err(|e| LauncherError::download(url, e))?;
        writer
            .flush()
            .map_err(|e| LauncherError::io(format!("writing {}", dest.display()), e))?;

        Ok(bytes)
    }
}

/// Lower-cased host of an https URL, `None` for any other scheme
fn https_host(url: &str) -> Option<String> {
    let uri: ureq::http::Uri = url.parse().ok()?;
    if uri.scheme_str() != Some("https") {
        return None;
    }
    uri.host().map(str::to_ascii_lowercase)
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> LauncherResult<()> {
        info!("Downloading {}", url);

        let owned_url = url.to_string();
        let token = self.token_for(url).map(str::to_string);
        let dest_path = dest.to_path_buf();
        let bytes = tokio::task::spawn_blocking(move || {
            Self::fetch(&owned_url, token.as_deref(), &dest_path)
        })
        .await
        .map_err(|e| LauncherError::Internal(format!("download task failed: {}", e)))??;

        debug!(bytes, "Downloaded {} to {}", url, dest.display());
        Ok(())
    }
}

fn user_agent() -> String {
    format!("actions-launcher/{}", env!("CARGO_PKG_VERSION"))
}

/// SHA-256 of a file as lowercase hex
pub async fn sha256_file(path: &Path) -> LauncherResult<String> {
    let path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> LauncherResult<String> {
        let mut file = File::open(&path)
            .map_err(|e| LauncherError::io(format!("opening {}", path.display()), e))?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];
        loop {
            let n = file
                .read(&mut buffer)
                .map_err(|e| LauncherError::io(format!("reading {}", path.display()), e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    })
    .await
    .map_err(|e| LauncherError::Internal(format!("hash task failed: {}", e)))?
}
