//! Reading an image from disk into a data URL.

use anyhow::{bail, Context, Result};
use inference_client::encode_data_url;
use std::path::Path;
use tracing::debug;

use crate::views::LoadedImage;

/// MIME type for an image file extension; `None` for anything that is not
/// an image.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// Read an image file and encode it for the image panel.
pub async fn load_image(path: &Path) -> Result<LoadedImage> {
    let Some(mime_type) = mime_for_path(path) else {
        bail!("{} is not a supported image file", path.display());
    };

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    debug!(file = %file_name, mime_type, bytes = bytes.len(), "Image loaded");

    Ok(LoadedImage {
        file_name,
        byte_len: bytes.len(),
        data_url: encode_data_url(mime_type, &bytes),
    })
}
