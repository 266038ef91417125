//! HTTP access to the release manifest and package archives

use crate::config::Config;
use crate::core::{CobbleError, CobbleResult};
use crate::manifest::ReleaseManifest;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{header, Client as HttpClient};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("cobble/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where releases come from
///
/// Abstracted so the workflow can be exercised without network access.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch and validate the current release manifest
    async fn fetch_manifest(&self) -> CobbleResult<ReleaseManifest>;

    /// Download `url` to `dest`, returning the number of bytes written
    async fn download(&self, url: &str, dest: &Path) -> CobbleResult<u64>;
}

/// reqwest-backed release source
pub struct HttpReleaseSource {
    http_client: HttpClient,
    manifest_url: String,
    show_progress: bool,
}

impl HttpReleaseSource {
    pub fn new(config: &Config, show_progress: bool) -> CobbleResult<Self> {
        Self::with_manifest_url(config.manifest_url.clone(), show_progress)
    }

    pub fn with_manifest_url(manifest_url: String, show_progress: bool) -> CobbleResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        // No overall timeout: it would cap large archive downloads. The
        // connect timeout still catches an unreachable host.
        let http_client = HttpClient::builder()
            .default_headers(headers)
            .connect_timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CobbleError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            manifest_url,
            show_progress,
        })
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("Downloading... {percent}% {bar:40.cyan/blue} {bytes}/{total_bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} Downloading... {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        }
    }

    async fn write_body(
        &self,
        mut response: reqwest::Response,
        dest: &Path,
    ) -> CobbleResult<u64> {
        let pb = self.progress_bar(response.content_length());
        let mut file = File::create(dest).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            pb.set_position(written);
        }
        file.flush().await?;
        pb.finish_and_clear();

        Ok(written)
    }
}

#[async_trait]
impl ReleaseSource for HttpReleaseSource {
    async fn fetch_manifest(&self) -> CobbleResult<ReleaseManifest> {
        debug!(url = %self.manifest_url, "fetching release manifest");
        let body = self
            .http_client
            .get(&self.manifest_url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        ReleaseManifest::parse(&body)
    }

    async fn download(&self, url: &str, dest: &Path) -> CobbleResult<u64> {
        info!(%url, dest = %dest.display(), "downloading package");
        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        match self.write_body(response, dest).await {
            Ok(bytes) => {
                debug!(bytes, "download finished");
                Ok(bytes)
            }
            Err(e) => {
                // Never leave a truncated archive behind
                let _ = tokio::fs::remove_file(dest).await;
                Err(e)
            }
        }
    }
}
