use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::model::Rect;
use crate::rotate::rotate_cw;

/// Writes `src` into `canvas` with its top-left corner at `(dx, dy)`,
/// rotating it 90° clockwise first when `rotated` is set.
///
/// Pixels are overwritten, not blended, and nothing outside the returned
/// rectangle is touched. `src` (and the rotated copy, if any) is dropped once
/// it has been written.
pub fn compose(
    canvas: &mut PixelBuffer,
    src: PixelBuffer,
    dx: u32,
    dy: u32,
    rotated: bool,
) -> Result<Rect> {
    if rotated {
        let turned = rotate_cw(&src)?;
        drop(src);
        canvas.blit(&turned, dx, dy)
    } else {
        canvas.blit(&src, dx, dy)
    }
}
