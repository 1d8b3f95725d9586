//! Windowed neighbor-density counting.
//!
//! Every record is a point with a primary and a secondary packed key. For each point the
//! sweep counts the other points with `|Δprimary| < radius` and `|Δsecondary| <= radius`.
//! Points are visited in primary order while a [`RankTree`] keyed on the secondary key
//! holds the window of points less than `radius` behind the current one. A point counts
//! the window members inside its secondary range when it enters, and counts them again
//! when it leaves, so every neighboring pair is seen once from each side.

use hkit_core::models::{BeadMap, ContactPair, MAX_COUNT};
use hkit_core::packing::{hi, lo, pack, pack_checked, validate_radius};

use crate::errors::{CountError, Result};
use crate::pool::NodeId;
use crate::sort::radix_sort_by_key;
use crate::tree::RankTree;

/// A record projected onto the two sweep axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborPoint {
    /// Packed `chr << 32 | coordinate` key the sweep advances along.
    pub primary: u64,
    /// Packed key used for range queries within the window.
    pub secondary: u64,
    /// Index of the originating record.
    pub idx: u32,
    /// Accumulated neighbor count.
    pub n: u32,
}

impl NeighborPoint {
    pub fn new(primary: u64, secondary: u64, idx: u32) -> Self {
        NeighborPoint {
            primary,
            secondary,
            idx,
            n: 0,
        }
    }
}

// keys are (secondary, position in the sorted slice)
type Window = RankTree<(u64, u32), ()>;

///
/// Count the window members whose secondary key lies within `radius` of `secondary`,
/// boundaries included.
///
/// The lower bound is clamped to the start of `secondary`'s chromosome. Sentinel indices
/// `0` and `u32::MAX` bracket every stored entry at the two boundary keys.
///
fn count_in_window(window: &Window, secondary: u64, radius: u32) -> usize {
    if window.is_empty() {
        return 0;
    }
    let low = pack(hi(secondary), lo(secondary).saturating_sub(radius));
    let high = secondary.saturating_add(radius as u64);
    window.rank_inclusive(&(high, u32::MAX)) - window.rank(&(low, 0))
}

///
/// Run the sliding-window sweep over points sorted by `primary`.
///
/// Results are accumulated into each point's `n`. Panics if `points` is not sorted, which
/// shows up as a window whose size disagrees with the eviction cursor.
///
/// # Arguments
/// - points: points in ascending primary order
/// - radius: half-width of the neighbor box, already validated against the packing
///   boundary
///
pub fn count_neighbors_sorted(points: &mut [NeighborPoint], radius: u32) {
    if points.is_empty() {
        return;
    }
    assert!(
        points.len() < u32::MAX as usize,
        "too many points for the neighbor sweep"
    );
    let radius_key = radius as u64;
    let mut window: Window = RankTree::with_capacity(64);
    let mut ids: Vec<Option<NodeId>> = vec![None; points.len()];
    let mut left = 0;

    for i in 0..points.len() {
        while left < i {
            let gap = points[i].primary.checked_sub(points[left].primary);
            let Some(gap) = gap else {
                panic!(
                    "neighbor sweep input is not sorted at position {} ({} < {})",
                    i, points[i].primary, points[left].primary
                );
            };
            if gap < radius_key {
                break;
            }
            evict(&mut window, &mut ids, points, left, radius);
            left += 1;
        }
        assert_eq!(
            i - left,
            window.len(),
            "neighbor window out of sync with the sweep cursor"
        );
        points[i].n = count_in_window(&window, points[i].secondary, radius) as u32;
        let (id, _) = window.insert((points[i].secondary, i as u32), ());
        ids[i] = Some(id);
    }
    for j in left..points.len() {
        evict(&mut window, &mut ids, points, j, radius);
    }
    debug_assert!(window.is_empty());
}

fn evict(
    window: &mut Window,
    ids: &mut [Option<NodeId>],
    points: &mut [NeighborPoint],
    j: usize,
    radius: u32,
) {
    let Some(id) = ids[j].take() else {
        panic!("point {} left the neighbor window twice", j);
    };
    window.remove(id);
    let later = count_in_window(window, points[j].secondary, radius) as u32;
    points[j].n = points[j].n.saturating_add(later).min(MAX_COUNT);
}

fn check_len(len: usize) -> Result<()> {
    if len >= u32::MAX as usize {
        return Err(CountError::TooManyRecords(len));
    }
    Ok(())
}

///
/// Count, for every contact pair, the pairs whose anchors both lie within `radius`.
///
/// The primary key is `chr1 << 32 | pos1` and the secondary key `chr2 << 32 | pos2`, so
/// pairs on different chromosomes are never neighbors. The input needs no particular
/// order; results are written into each pair's `n`.
///
/// # Examples
///
/// ```
/// use hkit_core::models::ContactPair;
/// use hkit_count::count_neighbors;
///
/// let mut pairs = vec![
///     ContactPair::new(0, 100, 0, 10),
///     ContactPair::new(0, 101, 0, 12),
///     ContactPair::new(0, 102, 0, 50),
/// ];
/// count_neighbors(&mut pairs, 5).unwrap();
/// let n: Vec<u32> = pairs.iter().map(|p| p.n).collect();
/// assert_eq!(n, vec![1, 1, 0]);
/// ```
///
pub fn count_neighbors(pairs: &mut [ContactPair], radius: u32) -> Result<()> {
    let radius = validate_radius(radius as u64)?;
    check_len(pairs.len())?;

    let mut points = Vec::with_capacity(pairs.len());
    for (i, p) in pairs.iter().enumerate() {
        points.push(NeighborPoint::new(
            pack_checked(p.chr1(), p.pos1() as u64)?,
            pack_checked(p.chr2(), p.pos2() as u64)?,
            i as u32,
        ));
    }
    radix_sort_by_key(&mut points, |p| p.primary);
    count_neighbors_sorted(&mut points, radius);

    for p in &points {
        pairs[p.idx as usize].n = p.n;
    }
    log::debug!(
        "counted neighbors of {} pairs within radius {}",
        pairs.len(),
        radius
    );
    Ok(())
}

///
/// Count neighboring bead pairs of a 3D model.
///
/// Anchors are the packed `chr << 32 | st` of each pair's two beads. Bead pairs are
/// usually generated in anchor order; they are only sorted when they are not. Results
/// are written into each pair's `n_nei`.
///
pub fn count_bead_neighbors(map: &mut BeadMap, radius: u32) -> Result<()> {
    let radius = validate_radius(radius as u64)?;
    check_len(map.pairs.len())?;

    let mut points = Vec::with_capacity(map.pairs.len());
    for (i, p) in map.pairs.iter().enumerate() {
        let primary = map.anchor(p.bid[0])?;
        let secondary = map.anchor(p.bid[1])?;
        points.push(NeighborPoint::new(primary, secondary, i as u32));
    }
    if !points.is_sorted_by_key(|p| p.primary) {
        radix_sort_by_key(&mut points, |p| p.primary);
    }
    count_neighbors_sorted(&mut points, radius);

    for p in &points {
        map.pairs[p.idx as usize].n_nei = p.n;
    }
    log::debug!(
        "counted neighbors of {} bead pairs within radius {}",
        map.pairs.len(),
        radius
    );
    Ok(())
}
