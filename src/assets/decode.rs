use std::io::Cursor;

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::foundation::error::{BearError, BearResult};

/// Default JPEG quality for composed bears.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decode member bytes into an owned RGB raster.
///
/// The format is sniffed from the bytes, so a PNG saved under a `.jpg` name still decodes.
/// `origin` only feeds the error message.
pub fn decode_member(bytes: &[u8], origin: &str) -> BearResult<RgbImage> {
    let dyn_img = image::load_from_memory(bytes).map_err(|source| BearError::Decode {
        origin: origin.to_string(),
        source,
    })?;
    Ok(dyn_img.to_rgb8())
}

/// Serialize a raster as baseline JPEG.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> BearResult<Vec<u8>> {
    if img.width() == 0 || img.height() == 0 {
        return Err(BearError::encode(format!(
            "cannot encode an empty {}x{} image",
            img.width(),
            img.height()
        )));
    }

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    img.write_with_encoder(encoder)
        .map_err(|e| BearError::encode(format!("jpeg: {e}")))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
