use crate::{Error, Result, llm::ImagePayload};
use image::{GenericImageView, ImageFormat};
use std::io::Cursor;
use tracing::debug;

pub const DEFAULT_PREVIEW_MAX_SIDE: u32 = 512;

/// Decodes an uploaded image and re-encodes it as a PNG no larger than
/// `max_side` on its longest edge. Smaller images keep their size.
pub fn render_thumbnail(upload: &ImagePayload, max_side: u32) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory_with_format(&upload.bytes, upload.mime_type.image_format())?;
    let (width, height) = decoded.dimensions();

    let thumbnail = if width > max_side || height > max_side {
        decoded.thumbnail(max_side, max_side)
    } else {
        decoded
    };

    debug!(
        "Rendered preview {}x{} -> {}x{}",
        width,
        height,
        thumbnail.width(),
        thumbnail.height()
    );

    let mut png = Vec::new();
    thumbnail
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| Error::internal(format!("Failed to encode preview: {e}")))?;
    Ok(png)
}
