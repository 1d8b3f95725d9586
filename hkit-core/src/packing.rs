//! Packing of (chromosome, coordinate) into a single 64-bit ordered key.
//!
//! The chromosome id lives in the high [`COORD_BITS`] bits and the coordinate in the low
//! bits, so sorting packed keys sorts by chromosome first and coordinate second. Because
//! coordinates are capped at [`MAX_COORD`], two keys on different chromosomes are always
//! more than [`MAX_RADIUS`] apart, which lets a single linear sweep stand in for a
//! per-chromosome one.

use crate::errors::{CoreError, Result};

/// Width of the coordinate half of a packed key.
pub const COORD_BITS: u32 = 32;

/// Mask selecting the coordinate half of a packed key.
pub const COORD_MASK: u64 = (1u64 << COORD_BITS) - 1;

/// Largest coordinate that can be packed.
pub const MAX_COORD: u32 = (1u32 << 31) - 1;

/// Largest radius that cannot bridge two chromosomes.
///
/// Keys on adjacent chromosomes differ by at least `2^32 - MAX_COORD`, which is strictly
/// greater than this value, and `MAX_COORD + MAX_RADIUS < 2^32` keeps a query box from
/// spilling into the next chromosome.
pub const MAX_RADIUS: u32 = (1u32 << 31) - 1;

#[inline]
pub fn pack(hi: u32, lo: u32) -> u64 {
    (hi as u64) << COORD_BITS | lo as u64
}

#[inline]
pub fn hi(key: u64) -> u32 {
    (key >> COORD_BITS) as u32
}

#[inline]
pub fn lo(key: u64) -> u32 {
    (key & COORD_MASK) as u32
}

///
/// Pack a chromosome id and a coordinate, checking that the coordinate stays below
/// [`MAX_COORD`].
///
pub fn pack_checked(chr: u32, coord: u64) -> Result<u64> {
    if coord > MAX_COORD as u64 {
        return Err(CoreError::CoordinateOverflow(coord, MAX_COORD));
    }
    Ok(pack(chr, coord as u32))
}

///
/// Check that a neighbor radius is usable with packed keys.
///
/// # Arguments
/// - radius: the half-width of the neighbor box
///
/// # Returns
/// The radius narrowed to `u32` on success.
///
pub fn validate_radius(radius: u64) -> Result<u32> {
    if radius == 0 {
        return Err(CoreError::ZeroRadius);
    }
    if radius > MAX_RADIUS as u64 {
        return Err(CoreError::InvalidRadius(radius, MAX_RADIUS));
    }
    Ok(radius as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(3, 12345)]
    #[case(u32::MAX, MAX_COORD)]
    fn test_pack_unpack(#[case] chr: u32, #[case] coord: u32) {
        let key = pack(chr, coord);
        assert_eq!(hi(key), chr);
        assert_eq!(lo(key), coord);
    }

    #[rstest]
    fn test_chromosome_dominates_order() {
        assert!(pack(1, 0) > pack(0, MAX_COORD));
        assert!(pack(1, 0) - pack(0, MAX_COORD) > MAX_RADIUS as u64);
    }

    #[rstest]
    fn test_pack_checked_rejects_large_coordinates() {
        assert_eq!(pack_checked(2, 100), Ok(pack(2, 100)));
        assert_eq!(
            pack_checked(2, MAX_COORD as u64 + 1),
            Err(CoreError::CoordinateOverflow(MAX_COORD as u64 + 1, MAX_COORD))
        );
    }

    #[rstest]
    #[case(1, true)]
    #[case(10_000, true)]
    #[case(MAX_RADIUS as u64, true)]
    #[case(0, false)]
    #[case(MAX_RADIUS as u64 + 1, false)]
    #[case(u64::MAX, false)]
    fn test_validate_radius(#[case] radius: u64, #[case] ok: bool) {
        assert_eq!(validate_radius(radius).is_ok(), ok);
    }
}
