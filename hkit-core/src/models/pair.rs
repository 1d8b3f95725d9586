use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::packing::{hi, lo, pack};

/// Largest value the 31-bit count field can hold.
pub const MAX_COUNT: u32 = (1u32 << 31) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(format!("invalid strand: '{}'", other)),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// Four-slot probability payload carried by every pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PairPayload {
    /// Probabilities of the four phase combinations (00, 01, 10, 11).
    PhaseProbs([f32; 4]),
    /// A single derived phasing probability.
    PhasedProb(f32),
}

impl Default for PairPayload {
    fn default() -> Self {
        PairPayload::PhaseProbs([0.0; 4])
    }
}

///
/// A contact pair: two genomic anchors believed to be in physical proximity.
///
/// Both the chromosome pair and the coordinate pair are stored as packed 64-bit keys
/// (`first << 32 | second`) so that sorting by `(chr, pos)` groups pairs by chromosome
/// pair and orders them by the first anchor.
///
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPair {
    pub chr: u64,
    pub pos: u64,
    pub strand: [Strand; 2],
    pub phase: [Option<u8>; 2],
    /// Derived count, at most [`MAX_COUNT`].
    pub n: u32,
    pub tad_marked: bool,
    pub payload: PairPayload,
}

impl ContactPair {
    pub fn new(chr1: u32, pos1: u32, chr2: u32, pos2: u32) -> Self {
        ContactPair {
            chr: pack(chr1, chr2),
            pos: pack(pos1, pos2),
            ..Default::default()
        }
    }

    #[inline]
    pub fn chr1(&self) -> u32 {
        hi(self.chr)
    }

    #[inline]
    pub fn chr2(&self) -> u32 {
        lo(self.chr)
    }

    #[inline]
    pub fn pos1(&self) -> u32 {
        hi(self.pos)
    }

    #[inline]
    pub fn pos2(&self) -> u32 {
        lo(self.pos)
    }

    /// Whether both anchors lie on the same chromosome.
    #[inline]
    pub fn is_intra(&self) -> bool {
        self.chr1() == self.chr2()
    }
}

///
/// Sort pairs by chromosome pair, then by the first and second anchor.
///
/// This is the order the containment count expects.
///
pub fn sort_pairs(pairs: &mut [ContactPair]) {
    pairs.sort_by_key(|p| (p.chr, p.pos));
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_accessors() {
        let p = ContactPair::new(1, 100, 2, 300);
        assert_eq!(p.chr1(), 1);
        assert_eq!(p.chr2(), 2);
        assert_eq!(p.pos1(), 100);
        assert_eq!(p.pos2(), 300);
        assert!(!p.is_intra());
        assert_eq!(p.n, 0);
        assert_eq!(p.phase, [None, None]);
    }

    #[rstest]
    fn test_sort_groups_by_chromosome_pair() {
        let mut pairs = vec![
            ContactPair::new(1, 5, 1, 50),
            ContactPair::new(0, 30, 1, 10),
            ContactPair::new(0, 20, 0, 40),
            ContactPair::new(0, 10, 0, 90),
        ];
        sort_pairs(&mut pairs);
        let keys: Vec<(u32, u32, u32)> = pairs
            .iter()
            .map(|p| (p.chr1(), p.chr2(), p.pos1()))
            .collect();
        assert_eq!(keys, vec![(0, 0, 10), (0, 0, 20), (0, 1, 30), (1, 1, 5)]);
    }

    #[rstest]
    #[case("+", Strand::Forward)]
    #[case("-", Strand::Reverse)]
    fn test_strand_parse(#[case] s: &str, #[case] expected: Strand) {
        assert_eq!(s.parse::<Strand>(), Ok(expected));
        assert_eq!(expected.to_string(), s);
    }

    #[rstest]
    fn test_strand_parse_invalid() {
        assert!("x".parse::<Strand>().is_err());
    }
}
