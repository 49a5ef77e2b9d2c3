use thiserror::Error;

use crate::model::Rect;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Invalid dimensions: {width}x{height} (both sides must be non-zero)")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(
        "Invalid pixel buffer: {width}x{height} with stride {stride} needs {expected} bytes, got {actual}"
    )]
    InvalidBuffer {
        width: u32,
        height: u32,
        stride: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Nothing to pack")]
    Empty,
    #[error("Image '{key}' ({width}x{height}) does not fit the {side}x{side} atlas in either orientation")]
    ImageTooLarge {
        key: String,
        width: u32,
        height: u32,
        side: u32,
    },
    #[error("Invalid split of node {node:?} for a {width}x{height} allocation (padding {padding})")]
    InvalidSplitGeometry {
        node: Rect,
        width: u32,
        height: u32,
        padding: u32,
    },
    #[error("Region {region:?} lies outside the {width}x{height} buffer")]
    PixelOutOfBounds { region: Rect, width: u32, height: u32 },
    #[error("Placements '{first}' and '{second}' overlap")]
    OverlappingPlacements { first: String, second: String },
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
