use crate::buffer::PixelBuffer;
use crate::error::{AtlasError, Result};
use crate::model::{AtlasStats, Placement};
use crate::table::PlacementTable;

/// A finished atlas: the composed square buffer plus where every image went.
///
/// Read-only once built; share it by reference.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    side: u32,
    pixels: PixelBuffer,
    table: PlacementTable,
}

impl PackedAtlas {
    pub(crate) fn new_unchecked(side: u32, pixels: PixelBuffer, table: PlacementTable) -> Self {
        Self {
            side,
            pixels,
            table,
        }
    }

    /// Reassembles an atlas from a previously composed buffer and its table
    /// (e.g. an atlas PNG and its manifest).
    ///
    /// The buffer must be square, every placement must lie inside it and no
    /// two placements may overlap.
    pub fn from_parts(pixels: PixelBuffer, table: PlacementTable) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width != height || width == 0 {
            return Err(AtlasError::InvalidDimensions { width, height });
        }
        let bounds = pixels.bounds();
        for p in &table {
            if !bounds.contains(&p.frame) {
                return Err(AtlasError::PixelOutOfBounds {
                    region: p.frame,
                    width,
                    height,
                });
            }
        }
        let placed: Vec<&Placement> = table.iter().collect();
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                if a.frame.intersects(&b.frame) {
                    return Err(AtlasError::OverlappingPlacements {
                        first: a.key.clone(),
                        second: b.key.clone(),
                    });
                }
            }
        }
        Ok(Self::new_unchecked(width, pixels, table))
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// The composed `side × side` buffer.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn placements(&self) -> &PlacementTable {
        &self.table
    }

    pub fn lookup(&self, key: &str) -> Option<&Placement> {
        self.table.lookup(key)
    }

    /// Copies the image stored under `key` out of the atlas, in its stored
    /// orientation. `None` for unknown keys.
    pub fn extract(&self, key: &str) -> Option<PixelBuffer> {
        self.table.extract(key, &self.pixels)
    }

    /// Like [`PackedAtlas::extract`], but an unknown key is an error.
    pub fn try_extract(&self, key: &str) -> Result<PixelBuffer> {
        self.extract(key)
            .ok_or_else(|| AtlasError::UnknownIdentifier(key.to_string()))
    }

    /// Computes packing statistics for this atlas.
    pub fn stats(&self) -> AtlasStats {
        AtlasStats::from_placements(self.side, &self.table)
    }

    pub fn into_parts(self) -> (PixelBuffer, PlacementTable) {
        (self.pixels, self.table)
    }
}
