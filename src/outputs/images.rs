//! Article image export.
//!
//! Each record's image is looked up by its title and written as
//! `<row>.<ext>` so the file name matches the record's spreadsheet row. The
//! extension follows the image bytes; unrecognized data is saved as `png`.
//!
//! Row-named images left by an earlier export are removed first, so a row
//! never keeps another article's picture. A record without a matching image
//! is reported and skipped. Any other failure stops the export.

use crate::browser::Browser;
use crate::error::{Error, Result};
use crate::models::IndexedRecord;
use futures::stream::{self, TryStreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Extensions [`image_extension`] can produce.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "gif", "webp"];

/// Outcome of an image export.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageReport {
    pub written: usize,
    /// Rows whose article had no image on the page.
    pub missing: Vec<u32>,
}

/// Fetch and save the image of every row, one at a time, in row order.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), rows = rows.len()))]
pub async fn write_images<B: Browser>(
    browser: &B,
    rows: &[IndexedRecord],
    dir: &Path,
) -> Result<ImageReport> {
    fs::create_dir_all(dir).await?;
    remove_stale_images(dir).await?;

    let report = stream::iter(rows.iter().map(Ok::<_, Error>))
        .try_fold(ImageReport::default(), |mut report, indexed| async move {
            match save_image(browser, indexed, dir).await {
                Ok(path) => {
                    debug!(row = indexed.row, path = %path.display(), "Saved article image");
                    report.written += 1;
                }
                Err(Error::ImageNotFound { title }) => {
                    warn!(row = indexed.row, %title, "No image for article; skipping");
                    report.missing.push(indexed.row);
                }
                Err(e) => return Err(e),
            }
            Ok(report)
        })
        .await?;

    info!(
        written = report.written,
        missing = report.missing.len(),
        "Wrote article images"
    );
    Ok(report)
}

/// Delete `<row>.<ext>` files from a previous export. Other files are left alone.
async fn remove_stale_images(dir: &Path) -> Result<()> {
    let mut entries = fs::read_dir(dir).await?;
    let mut removed = 0usize;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_row_image(&path) && entry.file_type().await?.is_file() {
            fs::remove_file(&path).await?;
            removed += 1;
        }
    }
    if removed > 0 {
        info!(removed, "Removed images from previous export");
    }
    Ok(())
}

fn is_row_image(path: &Path) -> bool {
    let stem_is_row = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.parse::<u32>().is_ok());
    let known_ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext));
    stem_is_row && known_ext
}

async fn save_image<B: Browser>(browser: &B, indexed: &IndexedRecord, dir: &Path) -> Result<PathBuf> {
    let bytes = browser.screenshot(indexed.record.title()).await?;
    let path = dir.join(format!("{}.{}", indexed.row, image_extension(&bytes)));
    fs::write(&path, bytes).await?;
    Ok(path)
}

/// File extension for image data, judged by its magic number.
pub fn image_extension(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "webp"
    } else {
        "png"
    }
}
