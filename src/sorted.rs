// SPDX-License-Identifier: Apache-2.0

//! Binary search over sorted slices.

use core::cmp::Ordering;

/// Locate `target` in an ascending-sorted slice.
///
/// Returns `Ok(index)` of a matching element (any one of them when
/// duplicates are present) or `Err(index)` naming the insertion point that
/// keeps the slice sorted.
pub(crate) fn binary_search<T: Ord>(haystack: &[T], target: &T) -> Result<usize, usize> {
    binary_search_by(haystack, |probe| probe.cmp(target))
}

/// [`binary_search`] with a caller-supplied comparator. The comparator must
/// be consistent with the slice's sort order.
pub(crate) fn binary_search_by<T, F>(haystack: &[T], mut compare: F) -> Result<usize, usize>
where
    F: FnMut(&T) -> Ordering,
{
    let mut lo = 0usize;
    let mut hi = haystack.len();
    while lo < hi {
        // Slice lengths are bounded by isize::MAX, so this sum cannot wrap.
        let mid = (lo + hi) >> 1;
        match compare(&haystack[mid]) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return Ok(mid),
        }
    }
    Err(lo)
}
