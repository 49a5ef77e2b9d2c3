//! Packs a batch of RGBA images into one fixed-size square atlas.
//!
//! - Packing: a binary space-partition tree ([`PackingTree`]) hands out
//!   slots; an image that does not fit upright is retried rotated 90°.
//! - Ordering: the batch is stably sorted (tallest first by default) before
//!   packing, so identical input gives an identical layout.
//! - Output: a [`PackedAtlas`] holding the composed pixels and a
//!   [`PlacementTable`] for lookup and extraction by key.
//!
//! Decoding/encoding image files and any metadata format are left to the
//! caller (see the CLI crate).
//!
//! Quick example:
//! ```ignore
//! use sprite_atlas_core::{AtlasConfig, InputImage, PixelBuffer, pack_images};
//! # fn main() -> sprite_atlas_core::Result<()> {
//! let inputs = vec![
//!     InputImage::new("a", PixelBuffer::filled(10, 4, [255, 0, 0, 255])),
//!     InputImage::new("b", PixelBuffer::filled(4, 10, [0, 0, 255, 255])),
//! ];
//! let cfg = AtlasConfig { side: 64, ..Default::default() };
//! let atlas = pack_images(inputs, cfg)?;
//! let a = atlas.extract("a").expect("packed");
//! assert_eq!(a.dimensions(), (10, 4));
//! # Ok(()) }
//! ```

pub mod atlas;
pub mod buffer;
pub mod builder;
pub mod compositing;
pub mod config;
pub mod error;
pub mod model;
pub mod ordering;
pub mod packer;
pub mod pipeline;
pub mod rotate;
pub mod table;

pub use atlas::*;
pub use buffer::*;
pub use builder::*;
pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;
pub use table::*;

/// Convenience prelude for common types and functions.
/// Importing `sprite_atlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::atlas::PackedAtlas;
    pub use crate::buffer::{Pixel, PixelBuffer};
    pub use crate::builder::{AtlasBuilder, InputImage};
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder, SortOrder};
    pub use crate::model::{AtlasStats, Placement, Rect};
    pub use crate::packer::{NodeId, PackingTree, PlacementNode};
    pub use crate::rotate::{rotate_ccw, rotate_cw};
    pub use crate::table::PlacementTable;
    pub use crate::{pack_images, pack_layout};
}
