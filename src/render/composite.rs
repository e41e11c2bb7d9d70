use image::{Rgb, RgbImage, imageops};

use crate::foundation::error::{BearError, BearResult};

/// Canvas color left visible where an input is narrower than the output.
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Top-left placement of each input inside a vertical stack.
///
/// Returns the `y` offset of every input plus the `(width, height)` of the stack.
pub fn stack_layout(sizes: &[(u32, u32)]) -> BearResult<(Vec<u32>, u32, u32)> {
    if sizes.is_empty() {
        return Err(BearError::validation("compose needs at least one image"));
    }

    let width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut y = 0u32;
    for &(_, h) in sizes {
        offsets.push(y);
        y = y
            .checked_add(h)
            .ok_or_else(|| BearError::validation("stacked height overflows u32"))?;
    }
    Ok((offsets, width, y))
}

/// Stack `images` top to bottom, left-aligned at `x = 0`.
///
/// The output is as wide as the widest input and as tall as all inputs together. Pixels
/// are copied as-is; nothing is scaled or blended.
pub fn compose(images: impl IntoIterator<Item = RgbImage>) -> BearResult<RgbImage> {
    let images: Vec<RgbImage> = images.into_iter().collect();
    let sizes: Vec<(u32, u32)> = images.iter().map(RgbImage::dimensions).collect();
    let (offsets, width, height) = stack_layout(&sizes)?;

    let mut out = RgbImage::from_pixel(width, height, BACKGROUND);
    for (img, y) in images.iter().zip(offsets) {
        imageops::replace(&mut out, img, 0, i64::from(y));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
