use crate::buffer::PixelBuffer;
use crate::error::{AtlasError, Result};
use crate::model::Placement;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier → [`Placement`] map, in packing order.
///
/// Keys are matched exactly; callers normalise identifiers before inserting
/// and before looking them up. Serialises as a plain array of placements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Placement>", into = "Vec<Placement>")]
pub struct PlacementTable {
    placements: Vec<Placement>,
    index: HashMap<String, usize>,
}

impl PlacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, placement: Placement) -> Result<()> {
        if self.index.contains_key(&placement.key) {
            return Err(AtlasError::DuplicateKey(placement.key));
        }
        self.index.insert(placement.key.clone(), self.placements.len());
        self.placements.push(placement);
        Ok(())
    }

    /// Placement recorded for `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<&Placement> {
        self.index.get(key).and_then(|&i| self.placements.get(i))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements in the order they were packed.
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }

    /// Copies the pixels stored for `key` out of `atlas`.
    ///
    /// The copy keeps the stored orientation: a rotated placement comes back
    /// rotated, and [`crate::rotate::rotate_ccw`] restores it. Unknown keys
    /// (or a placement that does not fit `atlas`) give `None`.
    pub fn extract(&self, key: &str, atlas: &PixelBuffer) -> Option<PixelBuffer> {
        let placement = self.lookup(key)?;
        atlas.crop(placement.frame)
    }
}

impl TryFrom<Vec<Placement>> for PlacementTable {
    type Error = AtlasError;

    fn try_from(placements: Vec<Placement>) -> Result<Self> {
        let mut table = PlacementTable::new();
        for p in placements {
            table.insert(p)?;
        }
        Ok(table)
    }
}

impl From<PlacementTable> for Vec<Placement> {
    fn from(table: PlacementTable) -> Self {
        table.placements
    }
}

impl<'a> IntoIterator for &'a PlacementTable {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
