//! Containment counting over same-chromosome contact pairs.
//!
//! Each intra-chromosomal pair is read as the interval `[pos1, pos2]`. Sweeping pairs in
//! start order, a pair is "closed" once the sweep reaches a start at or past its end. A
//! pair's count is the number of pairs closed between its own insertion and its own
//! closure, minus those that were already open with a smaller end when it was inserted,
//! plus one for itself: the number of pairs nested inside it, itself included.

use hkit_core::models::{ContactPair, MAX_COUNT};

use crate::tree::RankTree;

/// State captured when a pair enters the sweep.
#[derive(Debug, Clone, Copy)]
struct OpenPair {
    /// Pairs closed before this one was inserted.
    closed_at_insert: usize,
    /// Open pairs with a smaller end at insertion time.
    rank: usize,
}

///
/// Count contained pairs for every same-chromosome run of `pairs`.
///
/// `pairs` must be grouped into contiguous runs sharing the same chromosome pair and,
/// within each intra-chromosomal run, sorted ascending by `pos1` (see
/// [`hkit_core::models::sort_pairs`]). The order is not checked; out-of-order input
/// produces meaningless counts. Inter-chromosomal pairs keep their current `n`.
///
/// # Examples
///
/// ```
/// use hkit_core::models::ContactPair;
/// use hkit_count::count_contained;
///
/// let mut pairs = vec![
///     ContactPair::new(0, 0, 0, 10),
///     ContactPair::new(0, 2, 0, 5),
///     ContactPair::new(0, 3, 0, 4),
/// ];
/// count_contained(&mut pairs);
/// let n: Vec<u32> = pairs.iter().map(|p| p.n).collect();
/// assert_eq!(n, vec![3, 2, 1]);
/// ```
///
pub fn count_contained(pairs: &mut [ContactPair]) {
    let mut n_runs = 0;
    let mut n_counted = 0;
    let mut st = 0;
    for i in 1..=pairs.len() {
        if i == pairs.len() || pairs[i].chr != pairs[i - 1].chr {
            if pairs[st].is_intra() {
                count_contained_run(&mut pairs[st..i]);
                n_runs += 1;
                n_counted += i - st;
            }
            st = i;
        }
    }
    log::debug!(
        "counted contained pairs for {} of {} pairs in {} intra-chromosomal runs",
        n_counted,
        pairs.len(),
        n_runs
    );
}

///
/// Containment sweep over one run of pairs on a single chromosome, sorted by `pos1`.
///
pub fn count_contained_run(pairs: &mut [ContactPair]) {
    // keyed by (end, index) so that equal ends stay distinct
    let mut open: RankTree<(u32, u32), OpenPair> = RankTree::new();
    let mut closed = 0usize;

    for i in 0..pairs.len() {
        let start = pairs[i].pos1();
        while let Some((_, &(end, _), _)) = open.first() {
            if end > start {
                break;
            }
            close_first(&mut open, pairs, &mut closed);
        }
        let (id, rank) = open.insert(
            (pairs[i].pos2(), i as u32),
            OpenPair {
                closed_at_insert: closed,
                rank: 0,
            },
        );
        // the rank is only known once the node is placed
        open.value_mut(id).rank = rank;
    }
    while !open.is_empty() {
        close_first(&mut open, pairs, &mut closed);
    }
}

fn close_first(
    open: &mut RankTree<(u32, u32), OpenPair>,
    pairs: &mut [ContactPair],
    closed: &mut usize,
) {
    let Some(((_, idx), state)) = open.pop_first() else {
        return;
    };
    let n = *closed as i64 - state.closed_at_insert as i64 - state.rank as i64 + 1;
    assert!(n >= 0, "negative containment count {} for pair {}", n, idx);
    pairs[idx as usize].n = (n as u32).min(MAX_COUNT);
    *closed += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    use hkit_core::models::sort_pairs;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn intra(chr: u32, st: u32, en: u32) -> ContactPair {
        ContactPair::new(chr, st, chr, en)
    }

    fn counts(pairs: &[ContactPair]) -> Vec<u32> {
        pairs.iter().map(|p| p.n).collect()
    }

    // a pair contains every later pair of its run that ends strictly before it
    fn brute_force(pairs: &[ContactPair]) -> Vec<u32> {
        (0..pairs.len())
            .map(|i| {
                if !pairs[i].is_intra() {
                    return pairs[i].n;
                }
                let nested = pairs[i + 1..]
                    .iter()
                    .take_while(|q| q.chr == pairs[i].chr)
                    .filter(|q| q.pos2() < pairs[i].pos2())
                    .count();
                nested as u32 + 1
            })
            .collect()
    }

    #[rstest]
    fn test_nested_intervals() {
        let mut pairs = vec![intra(0, 0, 10), intra(0, 2, 5), intra(0, 3, 4)];
        count_contained(&mut pairs);
        assert_eq!(counts(&pairs), vec![3, 2, 1]);
    }

    #[rstest]
    #[case(vec![intra(0, 0, 5), intra(0, 3, 8)], vec![1, 1])]
    #[case(vec![intra(0, 0, 5), intra(0, 5, 8)], vec![1, 1])]
    #[case(vec![intra(0, 0, 10), intra(0, 0, 10)], vec![1, 1])]
    #[case(vec![intra(0, 0, 10), intra(0, 0, 4), intra(0, 6, 9)], vec![3, 1, 1])]
    #[case(vec![intra(0, 0, 100), intra(0, 10, 20), intra(0, 30, 200), intra(0, 40, 50)], vec![3, 1, 2, 1])]
    fn test_run_counts(#[case] mut pairs: Vec<ContactPair>, #[case] expected: Vec<u32>) {
        count_contained(&mut pairs);
        assert_eq!(counts(&pairs), expected);
    }

    #[rstest]
    fn test_cross_chromosome_pairs_are_untouched() {
        let mut pairs = vec![
            intra(0, 0, 10),
            intra(0, 2, 5),
            ContactPair::new(0, 1, 1, 3),
            ContactPair::new(0, 4, 1, 2),
            intra(1, 0, 10),
        ];
        pairs[2].n = 99;
        pairs[3].n = 7;
        count_contained(&mut pairs);
        assert_eq!(counts(&pairs), vec![2, 1, 99, 7, 1]);
    }

    #[rstest]
    fn test_runs_are_independent() {
        let mut pairs = vec![intra(0, 0, 10), intra(1, 2, 5), intra(1, 3, 4)];
        count_contained(&mut pairs);
        assert_eq!(counts(&pairs), vec![1, 2, 1]);
    }

    #[rstest]
    fn test_empty_and_single() {
        let mut empty: Vec<ContactPair> = vec![];
        count_contained(&mut empty);

        let mut one = vec![intra(3, 10, 20)];
        count_contained(&mut one);
        assert_eq!(counts(&one), vec![1]);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn test_random_runs_match_brute_force(#[case] seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pairs: Vec<ContactPair> = (0..300)
            .map(|_| {
                let chr1 = rng.random_range(0..3);
                let chr2 = if rng.random_bool(0.8) { chr1 } else { rng.random_range(0..3) };
                let st = rng.random_range(0..500);
                let en = st + rng.random_range(0..200);
                ContactPair::new(chr1, st, chr2, en)
            })
            .collect();
        sort_pairs(&mut pairs);

        let expected = brute_force(&pairs);
        count_contained(&mut pairs);
        assert_eq!(counts(&pairs), expected);
        assert!(pairs.iter().filter(|p| p.is_intra()).all(|p| p.n >= 1));
    }
}
