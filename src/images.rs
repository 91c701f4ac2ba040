//! Thumbnail downloads.
//!
//! Result thumbnails are referenced through a `srcset` attribute; the first
//! whitespace-separated token is the image URL. Images are saved as
//! `<n>_challenge.png` in the output directory.

use crate::error::{HarvestError, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

/// Something that can fetch a URL into a local file.
#[allow(async_fn_in_trait)]
pub trait ImageDownloader {
    /// Download `url` to `dest`, overwriting any existing file.
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`ImageDownloader`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

impl ImageDownloader for HttpDownloader {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        fs::write(dest, &bytes).await?;
        debug!(
            bytes = bytes.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Downloaded image"
        );
        Ok(())
    }
}

/// Filename for the `counter`-th accepted result.
pub fn thumbnail_name(counter: u32) -> String {
    format!("{counter}_challenge.png")
}

/// The image URL from a `srcset` value: its first whitespace-delimited token.
///
/// The token must parse as an absolute URL and is returned exactly as written.
pub fn srcset_url(srcset: &str) -> Result<&str> {
    let first = srcset
        .split_whitespace()
        .next()
        .ok_or_else(|| HarvestError::InvalidSrcset(srcset.to_string()))?;
    Url::parse(first).map_err(|_| HarvestError::InvalidSrcset(srcset.to_string()))?;
    Ok(first)
}

/// Download the thumbnail referenced by `srcset` and return its filename.
pub async fn save_thumbnail<D: ImageDownloader>(
    downloader: &D,
    srcset: &str,
    counter: u32,
    output_dir: &Path,
) -> Result<String> {
    let url = srcset_url(srcset)?;
    let name = thumbnail_name(counter);
    downloader
        .download(url, &output_dir.join(&name))
        .await?;
    info!(%url, file = %name, "Saved thumbnail");
    Ok(name)
}
