use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`), widened so it cannot overflow.
    pub fn x2(&self) -> u64 {
        self.x as u64 + self.w as u64
    }
    /// Exclusive bottom edge (`y + h`), widened so it cannot overflow.
    pub fn y2(&self) -> u64 {
        self.y as u64 + self.h as u64
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.x2() <= self.x2() && r.y2() <= self.y2()
    }
    /// Returns true if the two rectangles share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.is_empty()
            || r.is_empty()
            || self.x as u64 >= r.x2()
            || r.x as u64 >= self.x2()
            || self.y as u64 >= r.y2()
            || r.y as u64 >= self.y2())
    }
}

/// Where one input image ended up inside the atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    /// Caller-supplied identifier (e.g. a file-name-derived key).
    pub key: String,
    /// Destination rectangle in atlas pixels. When `rotated` is set the
    /// width/height are already swapped relative to the source image.
    pub frame: Rect,
    /// True if the image was rotated 90° clockwise when it was composed.
    pub rotated: bool,
}

impl Placement {
    /// Width/height of the image as it was supplied, before any rotation.
    pub fn source_size(&self) -> (u32, u32) {
        if self.rotated {
            (self.frame.h, self.frame.w)
        } else {
            (self.frame.w, self.frame.h)
        }
    }
}

/// Statistics about atlas packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AtlasStats {
    /// Number of images packed.
    pub num_placements: usize,
    /// Number of images stored rotated.
    pub num_rotated: usize,
    /// Sum of placement areas (padding excluded).
    pub used_area: u64,
    /// `side * side`.
    pub total_area: u64,
    /// used_area / total_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl AtlasStats {
    pub(crate) fn from_placements<'a>(
        side: u32,
        placements: impl IntoIterator<Item = &'a Placement>,
    ) -> Self {
        let mut num_placements = 0;
        let mut num_rotated = 0;
        let mut used_area = 0u64;
        for p in placements {
            num_placements += 1;
            used_area += p.frame.area();
            if p.rotated {
                num_rotated += 1;
            }
        }
        let total_area = side as u64 * side as u64;
        let occupancy = if total_area > 0 {
            used_area as f64 / total_area as f64
        } else {
            0.0
        };
        Self {
            num_placements,
            num_rotated,
            used_area,
            total_area,
            occupancy,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Images: {}, Rotated: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_placements,
            self.num_rotated,
            self.occupancy * 100.0,
            self.total_area,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.total_area > 0 {
            (self.wasted_area() as f64 / self.total_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
