use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Orders in which a batch is fed to the packing tree.
///
/// Every order is stable: inputs that compare equal keep their original
/// relative order, so identical batches always produce identical layouts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Tallest first. Tall images claim the left edge early and the shorter
    /// ones fill the horizontal strips left beside them.
    #[default]
    HeightDesc,
    AreaDesc,
    MaxSideDesc,
    /// Keep input order.
    None,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "height_desc" => Ok(Self::HeightDesc),
            "area_desc" => Ok(Self::AreaDesc),
            "max_side_desc" => Ok(Self::MaxSideDesc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Side length of the square atlas in pixels.
    pub side: u32,
    /// Gap kept between a placed image and the free space carved next to it.
    /// Dropped on an axis whose leftover is smaller than the padding.
    pub padding: u32,
    /// Retry with width/height swapped when the upright size does not fit.
    pub allow_rotation: bool,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// RGBA fill for atlas pixels no image covers.
    #[serde(default)]
    pub background: [u8; 4],
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            side: 300,
            padding: 4,
            allow_rotation: true,
            sort_order: SortOrder::HeightDesc,
            background: [0, 0, 0, 0],
        }
    }
}

impl AtlasConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if the side is zero or the padding would swallow the
    /// whole atlas.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.side == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.side,
                height: self.side,
            });
        }
        if self.padding >= self.side {
            return Err(AtlasError::InvalidConfig(format!(
                "padding ({}) must be smaller than the atlas side ({})",
                self.padding, self.side
            )));
        }
        Ok(())
    }

    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn side(mut self, v: u32) -> Self {
        self.cfg.side = v;
        self
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn background(mut self, v: [u8; 4]) -> Self {
        self.cfg.background = v;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}
