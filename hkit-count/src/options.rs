#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use hkit_core::models::PairMap;
use hkit_core::packing::validate_radius;

use crate::consts::DEFAULT_RADIUS;
use crate::errors::Result;
use crate::{count_contained, count_neighbors};

///
/// Options for a counting run over a [`PairMap`].
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountOptions {
    /// Half-width of the neighbor box, in base pairs.
    pub radius: u32,
    /// Sort pairs by chromosome pair and position before containment counting. Turn off
    /// only when the input is known to be sorted.
    pub sort: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        CountOptions {
            radius: DEFAULT_RADIUS,
            sort: true,
        }
    }
}

impl CountOptions {
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_radius(self.radius as u64)?;
        Ok(())
    }

    ///
    /// Containment counting over a whole pairs map, sorting it first if requested.
    ///
    pub fn count_contained(&self, map: &mut PairMap) {
        if self.sort && !map.is_sorted() {
            log::info!("sorting {} pairs before containment counting", map.len());
            map.sort();
        }
        count_contained(&mut map.pairs);
    }

    ///
    /// Neighbor counting over a whole pairs map with the configured radius.
    ///
    pub fn count_neighbors(&self, map: &mut PairMap) -> Result<()> {
        self.validate()?;
        count_neighbors(&mut map.pairs, self.radius)
    }
}
