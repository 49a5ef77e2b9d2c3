//! Bounds-checked RGBA8 pixel storage.
//!
//! Pixels are stored row-major with an explicit row stride (in bytes), so
//! pitch-padded rows coming out of a decoder can be taken as-is. Every access
//! goes through coordinate checks against the stored width/height; there is no
//! unchecked offset arithmetic anywhere in the crate.

use crate::error::{AtlasError, Result};
use crate::model::Rect;
use image::RgbaImage;

/// Bytes per pixel (8-bit R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// One RGBA pixel.
pub type Pixel = [u8; 4];

#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Transparent black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Buffer of the given size with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: Pixel) -> Self {
        let stride = width as usize * BYTES_PER_PIXEL;
        let data = px.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Wraps tightly packed RGBA8 rows.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_raw_with_stride(width, height, width as usize * BYTES_PER_PIXEL, data)
    }

    /// Wraps RGBA8 rows that are `stride` bytes apart. Bytes past
    /// `width * 4` in each row are padding and are never read.
    pub fn from_raw_with_stride(
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AtlasError::InvalidDimensions { width, height });
        }
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let expected = stride.saturating_mul(height as usize);
        if stride < row_bytes || data.len() != expected {
            return Err(AtlasError::InvalidBuffer {
                width,
                height,
                stride,
                expected: expected.max(row_bytes * height as usize),
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row pitch in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The whole buffer as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        let i = self.offset(x, y)?;
        let mut px = [0u8; BYTES_PER_PIXEL];
        px.copy_from_slice(self.data.get(i..i + BYTES_PER_PIXEL)?);
        Some(px)
    }

    /// Overwrites the pixel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, px: Pixel) -> Result<()> {
        let i = self
            .offset(x, y)
            .ok_or_else(|| AtlasError::PixelOutOfBounds {
                region: Rect::new(x, y, 1, 1),
                width: self.width,
                height: self.height,
            })?;
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&px);
        Ok(())
    }

    /// The `width * 4` pixel bytes of row `y`, without stride padding.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let start = self.offset(0, y)?;
        self.data.get(start..start + self.width as usize * BYTES_PER_PIXEL)
    }

    /// Iterates over the pixel bytes of every row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Copies `region` out into a new, tightly packed buffer.
    /// Returns `None` if the region is empty or not fully inside the buffer.
    pub fn crop(&self, region: Rect) -> Option<PixelBuffer> {
        if region.is_empty() || !self.bounds().contains(&region) {
            return None;
        }
        let row_bytes = region.w as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_bytes * region.h as usize);
        for y in region.y..region.y + region.h {
            let start = self.offset(region.x, y)?;
            data.extend_from_slice(self.data.get(start..start + row_bytes)?);
        }
        Some(PixelBuffer {
            width: region.w,
            height: region.h,
            stride: row_bytes,
            data,
        })
    }

    /// Overwrites the pixels under `src` placed with its top-left at `(x, y)`.
    ///
    /// No blending: destination pixels are replaced. The whole destination
    /// rectangle is checked first, so an out-of-bounds blit writes nothing.
    pub fn blit(&mut self, src: &PixelBuffer, x: u32, y: u32) -> Result<Rect> {
        let region = Rect::new(x, y, src.width, src.height);
        if !self.bounds().contains(&region) {
            return Err(AtlasError::PixelOutOfBounds {
                region,
                width: self.width,
                height: self.height,
            });
        }
        let row_bytes = src.width as usize * BYTES_PER_PIXEL;
        for (sy, src_row) in src.rows().enumerate() {
            let start = (y as usize + sy) * self.stride + x as usize * BYTES_PER_PIXEL;
            self.data[start..start + row_bytes].copy_from_slice(src_row);
        }
        Ok(region)
    }

    /// Tightly packed RGBA8 bytes (stride padding removed).
    pub fn to_packed_vec(&self) -> Vec<u8> {
        let len = self.width as usize * self.height as usize * BYTES_PER_PIXEL;
        let mut out = Vec::with_capacity(len);
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        // Length is width * height * 4 by construction.
        RgbaImage::from_raw(self.width, self.height, self.to_packed_vec())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            stride: width as usize * BYTES_PER_PIXEL,
            data: img.into_raw(),
        }
    }
}
