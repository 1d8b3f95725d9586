#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};
use crate::models::SeqDict;
use crate::packing::pack_checked;

/// A coarse-grained 3D-model unit covering `[st, en)` on one chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bead {
    pub chr: u32,
    pub st: u32,
    pub en: u32,
}

/// A pairing between two beads.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeadPair {
    pub bid: [u32; 2],
    /// Number of contacts supporting this pair.
    pub n: u32,
    /// Number of neighboring bead pairs.
    pub n_nei: u32,
    pub phase: [Option<u8>; 2],
    pub p: f32,
}

impl BeadPair {
    pub fn new(bid1: u32, bid2: u32) -> Self {
        BeadPair {
            bid: [bid1, bid2],
            ..Default::default()
        }
    }
}

///
/// Beads and bead pairs of a 3D structure.
///
#[derive(Debug, Clone, Default)]
pub struct BeadMap {
    pub dict: SeqDict,
    pub beads: Vec<Bead>,
    pub pairs: Vec<BeadPair>,
}

impl BeadMap {
    pub fn new(dict: SeqDict, beads: Vec<Bead>, pairs: Vec<BeadPair>) -> Self {
        BeadMap { dict, beads, pairs }
    }

    ///
    /// Packed `chr << 32 | st` anchor key of a bead.
    ///
    /// # Arguments
    /// - bid: the bead id
    ///
    pub fn anchor(&self, bid: u32) -> Result<u64> {
        let bead = self
            .beads
            .get(bid as usize)
            .ok_or(CoreError::BeadOutOfRange(bid, self.beads.len()))?;
        pack_checked(bead.chr, bead.st as u64)
    }

    ///
    /// Build fixed-size beads tiling every chromosome of the dictionary.
    ///
    pub fn tile(dict: SeqDict, size: u32) -> Self {
        let size = size.max(1);
        let mut beads = Vec::new();
        for (chr, (_, len)) in dict.iter().enumerate() {
            let mut st = 0;
            while st < len {
                let en = st.saturating_add(size).min(len);
                beads.push(Bead {
                    chr: chr as u32,
                    st,
                    en,
                });
                st = en;
            }
        }
        BeadMap {
            dict,
            beads,
            pairs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::packing::{MAX_COORD, pack};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_tile_and_anchor() {
        let dict: SeqDict = vec![("chr1", 250), ("chr2", 100)].into_iter().collect();
        let map = BeadMap::tile(dict, 100);
        assert_eq!(map.beads.len(), 4);
        assert_eq!(map.beads[2], Bead { chr: 0, st: 200, en: 250 });
        assert_eq!(map.beads[3], Bead { chr: 1, st: 0, en: 100 });

        assert_eq!(map.anchor(1), Ok(pack(0, 100)));
        assert_eq!(map.anchor(3), Ok(pack(1, 0)));
        assert_eq!(map.anchor(9), Err(CoreError::BeadOutOfRange(9, 4)));
    }

    #[rstest]
    fn test_anchor_rejects_coordinates_past_max_coord() {
        let mut map = BeadMap::tile(SeqDict::new(), 100);
        map.beads.push(Bead {
            chr: 0,
            st: MAX_COORD + 1,
            en: u32::MAX,
        });
        assert_eq!(
            map.anchor(0),
            Err(CoreError::CoordinateOverflow(MAX_COORD as u64 + 1, MAX_COORD))
        );
    }
}
