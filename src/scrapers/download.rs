use crate::models::DownloadResult;
use crate::scrapers::traits::{get_ok, PageClient};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// File extension for an image response, defaulting to `jpg`
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
    if content_type.contains("jpeg") || content_type.contains("jpg") {
        "jpg"
    } else if content_type.contains("png") {
        "png"
    } else if content_type.contains("webp") {
        "webp"
    } else {
        "jpg"
    }
}

/// Download each URL in order into `output_dir` as `image_NN.<ext>`.
///
/// A failed image is recorded and skipped; files already written stay on disk.
pub async fn download_images<C>(
    client: &C,
    urls: &[String],
    output_dir: &Path,
    timeout: Duration,
) -> Vec<DownloadResult>
where
    C: PageClient + ?Sized,
{
    let total = urls.len();
    let mut results = Vec::with_capacity(total);

    for (idx, url) in urls.iter().enumerate() {
        let index = idx + 1;
        print!("⬇️  Downloading image {index}/{total}... ");
        let _ = std::io::stdout().flush();

        match download_one(client, url, index, output_dir, timeout).await {
            Ok((path, bytes)) => {
                println!("✅ Saved ({:.1} KB)", bytes as f64 / 1024.0);
                debug!(url = %url, path = %path.display(), bytes, "Image saved");
                results.push(DownloadResult::Saved {
                    url: url.clone(),
                    path,
                    bytes,
                });
            }
            Err(e) => {
                println!("❌ Failed: {e:#}");
                warn!(url = %url, error = %format!("{e:#}"), "Image download failed");
                results.push(DownloadResult::Failed {
                    url: url.clone(),
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    results
}

async fn download_one<C>(
    client: &C,
    url: &str,
    index: usize,
    output_dir: &Path,
    timeout: Duration,
) -> Result<(PathBuf, usize)>
where
    C: PageClient + ?Sized,
{
    let response = get_ok(client, url, timeout).await?;
    let ext = extension_for(response.content_type.as_deref());
    let path = output_dir.join(format!("image_{index:02}.{ext}"));

    tokio::fs::write(&path, &response.body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok((path, response.body.len()))
}
