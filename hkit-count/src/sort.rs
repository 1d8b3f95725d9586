use crate::consts::{RADIX_BITS, RADIX_PASSES, RADIX_SIZE};

///
/// Stable least-significant-digit radix sort on a 64-bit key.
///
/// Sorts 8 bits per pass through a scratch buffer. Passes whose digit is identical for
/// every item (common for the chromosome half of packed keys) are skipped.
///
/// # Arguments
/// - items: the slice to sort in place
/// - key: extracts the sort key from an item
///
/// # Examples
///
/// ```
/// use hkit_count::sort::radix_sort_by_key;
///
/// let mut v = vec![(3u64, 'a'), (1 << 40, 'b'), (1, 'c'), (3, 'd')];
/// radix_sort_by_key(&mut v, |x| x.0);
/// assert_eq!(v, vec![(1, 'c'), (3, 'a'), (3, 'd'), (1 << 40, 'b')]);
/// ```
///
pub fn radix_sort_by_key<T, F>(items: &mut [T], key: F)
where
    T: Copy,
    F: Fn(&T) -> u64,
{
    if items.len() < 2 {
        return;
    }
    let mut buf: Vec<T> = items.to_vec();
    // whether the current order lives in `items` (true) or `buf` (false)
    let mut in_items = true;

    for pass in 0..RADIX_PASSES {
        let shift = pass * RADIX_BITS;
        let digit = |x: &T| ((key(x) >> shift) as usize) & (RADIX_SIZE - 1);

        let (src, dst): (&[T], &mut [T]) = if in_items {
            (&*items, &mut buf[..])
        } else {
            (&buf[..], &mut *items)
        };

        let mut counts = [0usize; RADIX_SIZE];
        for x in src {
            counts[digit(x)] += 1;
        }
        if counts.contains(&src.len()) {
            continue;
        }

        let mut offsets = [0usize; RADIX_SIZE];
        let mut sum = 0;
        for (offset, count) in offsets.iter_mut().zip(counts.iter()) {
            *offset = sum;
            sum += count;
        }
        for x in src {
            let d = digit(x);
            dst[offsets[d]] = *x;
            offsets[d] += 1;
        }
        in_items = !in_items;
    }

    if !in_items {
        items.copy_from_slice(&buf);
    }
}
