//! Quarter-turn rotation of pixel buffers.
//!
//! The packer only ever rotates clockwise; [`rotate_ccw`] is its exact
//! inverse and is what a consumer applies to an extracted rotated image to get
//! the original orientation back.

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Rotates `src` 90° clockwise.
///
/// A `w×h` buffer becomes `h×w`, and source pixel `(x, y)` lands at
/// `(h - 1 - y, x)`. Channels are copied verbatim, so an opaque source pixel
/// stays fully opaque in the result.
pub fn rotate_cw(src: &PixelBuffer) -> Result<PixelBuffer> {
    let (w, h) = src.dimensions();
    let mut dst = PixelBuffer::new(h, w);
    for y in 0..h {
        for x in 0..w {
            if let Some(px) = src.get(x, y) {
                dst.set(h - 1 - y, x, px)?;
            }
        }
    }
    Ok(dst)
}

/// Rotates `src` 90° counter-clockwise; undoes [`rotate_cw`].
///
/// A `w×h` buffer becomes `h×w`, and source pixel `(x, y)` lands at
/// `(y, w - 1 - x)`.
pub fn rotate_ccw(src: &PixelBuffer) -> Result<PixelBuffer> {
    let (w, h) = src.dimensions();
    let mut dst = PixelBuffer::new(h, w);
    for y in 0..h {
        for x in 0..w {
            if let Some(px) = src.get(x, y) {
                dst.set(y, w - 1 - x, px)?;
            }
        }
    }
    Ok(dst)
}
