use crate::atlas::PackedAtlas;
use crate::builder::{AtlasBuilder, InputImage, allocate_slot};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::model::Placement;
use crate::ordering::sort_batch;
use crate::packer::PackingTree;
use crate::table::PlacementTable;
use std::collections::HashSet;
use tracing::{debug, instrument};

#[instrument(skip_all, fields(count = inputs.len(), side = cfg.side))]
/// Packs `inputs` into one square atlas and returns the composed pixels and
/// the placement table.
///
/// Notes:
/// - Inputs are ordered by `cfg.sort_order` (stable) before packing.
/// - The whole batch is checked for empty images and duplicate keys before
///   anything is composed.
/// - The build is all-or-nothing: if any image fails to fit, the partially
///   composed atlas is dropped and the error names the offending key.
pub fn pack_images(mut inputs: Vec<InputImage>, cfg: AtlasConfig) -> Result<PackedAtlas> {
    cfg.validate()?;
    check_batch(inputs.iter().map(|i| {
        let (w, h) = i.dimensions();
        (i.key.as_str(), w, h)
    }))?;

    sort_batch(&mut inputs, cfg.sort_order, InputImage::dimensions);

    let mut builder = AtlasBuilder::new(cfg)?;
    for input in inputs {
        builder.place(input)?;
    }
    let atlas = builder.finish();
    debug!(stats = %atlas.stats().summary(), "atlas packed");
    Ok(atlas)
}

/// Packs sizes without compositing pixel data.
/// Inputs are (key, width, height); placements match what [`pack_images`]
/// produces for images of the same sizes.
#[instrument(skip_all, fields(count = inputs.len(), side = cfg.side))]
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: AtlasConfig,
) -> Result<PlacementTable> {
    cfg.validate()?;
    let mut items: Vec<(String, u32, u32)> = inputs
        .into_iter()
        .map(|(k, w, h)| (k.into(), w, h))
        .collect();
    check_batch(items.iter().map(|(k, w, h)| (k.as_str(), *w, *h)))?;
    sort_batch(&mut items, cfg.sort_order, |(_, w, h)| (*w, *h));

    let mut tree = PackingTree::new(cfg.side, cfg.side, cfg.padding);
    let mut table = PlacementTable::new();
    for (key, w, h) in items {
        let (frame, rotated) = allocate_slot(&mut tree, &cfg, &key, w, h)?;
        table.insert(Placement {
            key,
            frame,
            rotated,
        })?;
    }
    Ok(table)
}

fn check_batch<'a>(items: impl IntoIterator<Item = (&'a str, u32, u32)>) -> Result<()> {
    let mut seen = HashSet::new();
    for (key, w, h) in items {
        if w == 0 || h == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        if !seen.insert(key) {
            return Err(AtlasError::DuplicateKey(key.to_string()));
        }
    }
    if seen.is_empty() {
        return Err(AtlasError::Empty);
    }
    Ok(())
}
