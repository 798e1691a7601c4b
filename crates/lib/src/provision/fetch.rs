//! Archive downloads.
//!
//! Archives are downloaded whole into a caller-provided location and
//! optionally checked against a pinned SHA256.

use std::path::Path;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Errors that can occur while downloading an archive.
#[derive(Debug, Error)]
pub enum FetchError {
  /// The HTTP request failed or returned a non-success status.
  #[error("fetch failed for {url}: {message}")]
  Http { url: String, message: String },

  /// SHA256 hash mismatch after download.
  #[error("hash mismatch for {url}: expected {expected}, got {actual}")]
  HashMismatch {
    url: String,
    expected: String,
    actual: String,
  },

  /// Writing or reading the downloaded file failed.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Fetches a URL into a local file.
#[allow(async_fn_in_trait)]
pub trait Downloader {
  /// Download `url` to `dest`, returning the number of bytes written.
  async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// Downloads over HTTP(S) with `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
  client: reqwest::Client,
}

impl HttpDownloader {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Downloader for HttpDownloader {
  async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
    info!(url = %url, "fetching URL");

    let http_err = |e: reqwest::Error| FetchError::Http {
      url: url.to_string(),
      message: e.to_string(),
    };

    let response = self.client.get(url).send().await.map_err(http_err)?;

    if !response.status().is_success() {
      return Err(FetchError::Http {
        url: url.to_string(),
        message: format!("HTTP {}", response.status()),
      });
    }

    let bytes = response.bytes().await.map_err(http_err)?;

    let mut file = fs::File::create(dest).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;

    info!(path = ?dest, size = bytes.len(), "download complete");

    Ok(bytes.len() as u64)
  }
}

/// Compute the lowercase hex SHA256 of a file.
pub async fn hash_file(path: &Path) -> Result<String, std::io::Error> {
  let bytes = fs::read(path).await?;
  let mut hasher = Sha256::new();
  hasher.update(&bytes);
  Ok(hex::encode(hasher.finalize()))
}

/// Verify a downloaded file against an expected SHA256.
pub async fn verify_sha256(url: &str, path: &Path, expected: &str) -> Result<(), FetchError> {
  let actual = hash_file(path).await?;
  if !actual.eq_ignore_ascii_case(expected) {
    return Err(FetchError::HashMismatch {
      url: url.to_string(),
      expected: expected.to_string(),
      actual,
    });
  }
  Ok(())
}
