use crate::atlas::PackedAtlas;
use crate::buffer::PixelBuffer;
use crate::compositing::compose;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::model::{Placement, Rect};
use crate::packer::PackingTree;
use crate::table::PlacementTable;
use image::RgbaImage;
use tracing::debug;

/// In-memory image to pack (key + decoded RGBA8 pixels).
pub struct InputImage {
    pub key: String,
    pub pixels: PixelBuffer,
}

impl InputImage {
    pub fn new(key: impl Into<String>, pixels: PixelBuffer) -> Self {
        Self {
            key: key.into(),
            pixels,
        }
    }

    /// Wraps tightly packed RGBA8 bytes.
    pub fn from_raw(
        key: impl Into<String>,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Self> {
        Ok(Self::new(key, PixelBuffer::from_raw(width, height, data)?))
    }

    pub fn from_rgba(key: impl Into<String>, image: RgbaImage) -> Self {
        Self::new(key, PixelBuffer::from(image))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Finds a slot for a `width × height` rectangle, upright first and then
/// (if allowed) with the sides swapped.
///
/// Returns the destination rectangle, sized to the requested (possibly
/// swapped) dimensions, and whether it is rotated.
pub(crate) fn allocate_slot(
    tree: &mut PackingTree,
    cfg: &AtlasConfig,
    key: &str,
    width: u32,
    height: u32,
) -> Result<(Rect, bool)> {
    if width == 0 || height == 0 {
        return Err(AtlasError::InvalidDimensions { width, height });
    }
    if let Some(id) = tree.allocate(width, height)? {
        let b = tree[id].bounds();
        return Ok((Rect::new(b.x, b.y, width, height), false));
    }
    if cfg.allow_rotation && width != height {
        if let Some(id) = tree.allocate(height, width)? {
            debug!(key, width, height, "upright placement failed, rotating");
            let b = tree[id].bounds();
            return Ok((Rect::new(b.x, b.y, height, width), true));
        }
    }
    Err(AtlasError::ImageTooLarge {
        key: key.to_string(),
        width,
        height,
        side: cfg.side,
    })
}

/// Owns the atlas while it is being composed.
///
/// Images are placed one at a time in the order they are handed in; sorting
/// the batch is the caller's job (see [`crate::pack_images`]). A failed
/// placement leaves the atlas pixels untouched, but the builder is meant to be
/// dropped on error: [`AtlasBuilder::finish`] is the only way to obtain a
/// [`PackedAtlas`], and that atlas can no longer be modified.
pub struct AtlasBuilder {
    cfg: AtlasConfig,
    tree: PackingTree,
    canvas: PixelBuffer,
    table: PlacementTable,
}

impl AtlasBuilder {
    pub fn new(cfg: AtlasConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            tree: PackingTree::new(cfg.side, cfg.side, cfg.padding),
            canvas: PixelBuffer::filled(cfg.side, cfg.side, cfg.background),
            table: PlacementTable::new(),
            cfg,
        })
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.cfg
    }

    pub fn tree(&self) -> &PackingTree {
        &self.tree
    }

    /// Pixels composed so far.
    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn placements(&self) -> &PlacementTable {
        &self.table
    }

    /// Allocates a slot for `input`, writes its pixels into the atlas and
    /// records the placement. `input` is consumed and freed here.
    pub fn place(&mut self, input: InputImage) -> Result<Placement> {
        let InputImage { key, pixels } = input;
        if self.table.contains(&key) {
            return Err(AtlasError::DuplicateKey(key));
        }
        let (width, height) = pixels.dimensions();
        let (frame, rotated) = allocate_slot(&mut self.tree, &self.cfg, &key, width, height)?;
        compose(&mut self.canvas, pixels, frame.x, frame.y, rotated)?;
        debug!(%key, x = frame.x, y = frame.y, w = frame.w, h = frame.h, rotated, "placed");
        let placement = Placement {
            key,
            frame,
            rotated,
        };
        self.table.insert(placement.clone())?;
        Ok(placement)
    }

    /// Freezes the atlas.
    pub fn finish(self) -> PackedAtlas {
        PackedAtlas::new_unchecked(self.cfg.side, self.canvas, self.table)
    }
}
