// SPDX-License-Identifier: Apache-2.0

//! # Dispatch layer
//!
//! Public entry points for every scan, comparison, and bulk operation. Each
//! function validates its arguments, detects hardware capabilities once, and
//! hands off to the per-width kernels behind [`FindWord`](crate::search::FindWord)
//! and [`BulkWord`](crate::bulk::BulkWord). Tier selection is manual
//! threshold-based dispatching: a vector tier is entered only when the input
//! is at least one full register long, otherwise the scalar path runs.

use log::trace;

use core::cmp::Ordering;

#[cfg(target_arch = "aarch64")]
use std::arch::is_aarch64_feature_detected;

use crate::bulk;
use crate::bulk::BulkWord;
use crate::compare::{eq_bytes, first_mismatch};
use crate::negate::{ExcludeValues, MatchValues, ScanNegator};
use crate::search;
use crate::search::FindWord;
use crate::types::{as_bytes, as_words, as_words_mut, words_of, Result, ScanElement, ScanError};
use crate::{sequence, sorted};

// =============================================================================
//  HARDWARE DETECTION & SIMD CAPABILITIES
// =============================================================================

/// Hardware capability detection used by the dispatch layer
pub struct HardwareCapabilities {
    pub has_avx512: bool,
    pub has_avx2: bool,
    pub has_sse2: bool,
    pub has_neon: bool,
}

/// Detect SIMD capabilities at runtime.
///
/// This checks for the presence of SIMD instruction sets in the target
/// architecture and returns a `HardwareCapabilities` struct with the
/// following fields:
///
/// - `has_avx512`: True if AVX-512F and AVX-512BW are supported (requires the
///   `avx512` crate feature)
/// - `has_avx2`: True if AVX2 instructions are supported
/// - `has_sse2`: True if SSE2 instructions are supported
/// - `has_neon`: True if NEON instructions are supported
///
/// The kernels consult the tiers in order of priority, widest first.
impl HardwareCapabilities {
    #[inline]
    pub fn detect() -> Self {
        HardwareCapabilities {
            has_avx512: Self::detect_avx512(),
            has_avx2: Self::detect_avx2(),
            has_sse2: Self::detect_sse2(),
            has_neon: Self::detect_neon(),
        }
    }

    fn detect_avx512() -> bool {
        #[allow(unused_mut)]
        let mut detected_avx512 = false;

        #[cfg(target_arch = "x86_64")]
        #[cfg(feature = "avx512")]
        if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw") {
            detected_avx512 = true;
        }

        detected_avx512
    }

    fn detect_avx2() -> bool {
        #[allow(unused_mut)]
        let mut detected_avx2 = false;

        #[cfg(target_arch = "x86_64")]
        if is_x86_feature_detected!("avx2") {
            detected_avx2 = true;
        }

        detected_avx2
    }

    fn detect_sse2() -> bool {
        #[allow(unused_mut)]
        let mut detected_sse2 = false;

        #[cfg(target_arch = "x86_64")]
        if is_x86_feature_detected!("sse2") {
            detected_sse2 = true;
        }

        detected_sse2
    }

    fn detect_neon() -> bool {
        #[allow(unused_mut)]
        let mut detected_neon = false;

        #[cfg(target_arch = "aarch64")]
        if is_aarch64_feature_detected!("neon") {
            detected_neon = true;
        }

        detected_neon
    }
}

// All dispatch functions use the manual threshold-based dispatching pattern.
// This provides better clarity and maintainability than complex macros.

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Get information about available SIMD capabilities
#[inline]
pub fn get_hw_capabilities() -> HardwareCapabilities {
    HardwareCapabilities::detect()
}

/// Check if a specific SIMD instruction set is available
#[inline]
pub fn has_hw_support(instruction_set: &str) -> bool {
    match instruction_set {
        "avx512" => {
            #[cfg(target_arch = "x86_64")]
            {
                #[cfg(feature = "avx512")]
                return is_x86_feature_detected!("avx512f")
                    && is_x86_feature_detected!("avx512bw");
                #[cfg(not(feature = "avx512"))]
                return false;
            }
            #[cfg(not(target_arch = "x86_64"))]
            return false;
        }
        "avx2" => {
            #[cfg(target_arch = "x86_64")]
            return is_x86_feature_detected!("avx2");
            #[cfg(not(target_arch = "x86_64"))]
            return false;
        }
        "sse2" => {
            #[cfg(target_arch = "x86_64")]
            return is_x86_feature_detected!("sse2");
            #[cfg(not(target_arch = "x86_64"))]
            return false;
        }
        "neon" => {
            #[cfg(target_arch = "aarch64")]
            return true;
            #[cfg(not(target_arch = "aarch64"))]
            return false;
        }
        _ => false,
    }
}

/// Multi-value scans handle up to five candidates in the vector tiers; the
/// runtime count is matched to a monomorphized kernel call here. Larger sets
/// and the empty set run the scalar nested scan, whose semantics (no values
/// means nothing matches, so an exclude scan accepts everything) fall out of
/// the `any` combinator.
fn find_any_fwd<T: ScanElement, NEG: ScanNegator>(
    haystack: &[T],
    values: &[T],
    caps: &HardwareCapabilities,
) -> Option<usize> {
    let words = as_words(haystack);
    match values.len() {
        1 => T::Word::find_fwd::<1, NEG>(words, &words_of([values[0]]), caps),
        2 => T::Word::find_fwd::<2, NEG>(words, &words_of([values[0], values[1]]), caps),
        3 => T::Word::find_fwd::<3, NEG>(
            words,
            &words_of([values[0], values[1], values[2]]),
            caps,
        ),
        4 => T::Word::find_fwd::<4, NEG>(
            words,
            &words_of([values[0], values[1], values[2], values[3]]),
            caps,
        ),
        5 => T::Word::find_fwd::<5, NEG>(
            words,
            &words_of([values[0], values[1], values[2], values[3], values[4]]),
            caps,
        ),
        _ => search::scalar_find_fwd::<T, NEG>(haystack, values),
    }
}

fn find_any_rev<T: ScanElement, NEG: ScanNegator>(
    haystack: &[T],
    values: &[T],
    caps: &HardwareCapabilities,
) -> Option<usize> {
    let words = as_words(haystack);
    match values.len() {
        1 => T::Word::find_rev::<1, NEG>(words, &words_of([values[0]]), caps),
        2 => T::Word::find_rev::<2, NEG>(words, &words_of([values[0], values[1]]), caps),
        3 => T::Word::find_rev::<3, NEG>(
            words,
            &words_of([values[0], values[1], values[2]]),
            caps,
        ),
        4 => T::Word::find_rev::<4, NEG>(
            words,
            &words_of([values[0], values[1], values[2], values[3]]),
            caps,
        ),
        5 => T::Word::find_rev::<5, NEG>(
            words,
            &words_of([values[0], values[1], values[2], values[3], values[4]]),
            caps,
        ),
        _ => search::scalar_find_rev::<T, NEG>(haystack, values),
    }
}

fn find_in_range<T: ScanElement + Ord, NEG: ScanNegator>(
    haystack: &[T],
    lo: T,
    hi: T,
    caps: &HardwareCapabilities,
) -> Option<usize> {
    // Empty range: nothing is inside it, everything is outside it.
    if lo > hi {
        return if NEG::NEGATE && !haystack.is_empty() {
            Some(0)
        } else {
            None
        };
    }
    if T::IS_UNSIGNED {
        T::Word::find_in_range::<NEG>(as_words(haystack), lo.to_word(), hi.to_word(), caps)
    } else {
        // A signed range does not map onto the unsigned word kernels without
        // re-biasing both bounds, so it stays on the two-sided scalar scan.
        search::scalar_find_in_range::<T, NEG>(haystack, lo, hi)
    }
}

// =============================================================================
// ELEMENT SEARCH
// =============================================================================

/// Find the first occurrence of `value` in `haystack`.
///
/// # Returns
/// * `Some(index)` - Lowest index holding `value`
/// * `None` - `value` does not occur (always for an empty haystack)
///
/// # Examples
/// ```rust
/// use scanx::index_of;
///
/// let data = [5u8, 3, 8, 1, 9];
/// assert_eq!(index_of(&data, 8), Some(2));
/// assert_eq!(index_of(&data, 7), None);
/// ```
///
/// # Performance
/// - Small buffers (< one vector register): unrolled scalar scan
/// - Large buffers: SIMD-accelerated, widest available tier first
#[inline]
pub fn index_of<T: ScanElement>(haystack: &[T], value: T) -> Option<usize> {
    trace!("INDEX_OF DISPATCH: haystack.len()={}", haystack.len());
    let caps = get_hw_capabilities();
    T::Word::find_fwd::<1, MatchValues>(as_words(haystack), &words_of([value]), &caps)
}

/// Find the last occurrence of `value` in `haystack`.
///
/// # Examples
/// ```rust
/// use scanx::last_index_of;
///
/// let data = [5u8, 3, 8, 3, 9];
/// assert_eq!(last_index_of(&data, 3), Some(3));
/// ```
#[inline]
pub fn last_index_of<T: ScanElement>(haystack: &[T], value: T) -> Option<usize> {
    trace!("LAST_INDEX_OF DISPATCH: haystack.len()={}", haystack.len());
    let caps = get_hw_capabilities();
    T::Word::find_rev::<1, MatchValues>(as_words(haystack), &words_of([value]), &caps)
}

/// True if `value` occurs anywhere in `haystack`.
#[inline]
pub fn contains<T: ScanElement>(haystack: &[T], value: T) -> bool {
    trace!("CONTAINS DISPATCH: haystack.len()={}", haystack.len());
    let caps = get_hw_capabilities();
    T::Word::find_fwd::<1, MatchValues>(as_words(haystack), &words_of([value]), &caps).is_some()
}

/// Find the first element equal to any of `values`.
///
/// Up to five candidate values run in the vector tiers; larger sets fall back
/// to a scalar nested scan. An empty value set never matches.
///
/// # Examples
/// ```rust
/// use scanx::index_of_any;
///
/// let data = [5u8, 3, 8, 1, 9];
/// assert_eq!(index_of_any(&data, &[1, 8]), Some(2));
/// assert_eq!(index_of_any(&data, &[]), None);
/// ```
#[inline]
pub fn index_of_any<T: ScanElement>(haystack: &[T], values: &[T]) -> Option<usize> {
    trace!(
        "INDEX_OF_ANY DISPATCH: haystack.len()={}, values.len()={}",
        haystack.len(),
        values.len()
    );
    let caps = get_hw_capabilities();
    find_any_fwd::<T, MatchValues>(haystack, values, &caps)
}

/// Find the last element equal to any of `values`.
#[inline]
pub fn last_index_of_any<T: ScanElement>(haystack: &[T], values: &[T]) -> Option<usize> {
    trace!(
        "LAST_INDEX_OF_ANY DISPATCH: haystack.len()={}, values.len()={}",
        haystack.len(),
        values.len()
    );
    let caps = get_hw_capabilities();
    find_any_rev::<T, MatchValues>(haystack, values, &caps)
}

/// Find the first element NOT equal to any of `values`.
///
/// With an empty value set every element qualifies, so a non-empty haystack
/// answers index 0.
///
/// # Examples
/// ```rust
/// use scanx::index_of_any_except;
///
/// let data = [7u8, 7, 7, 2, 7];
/// assert_eq!(index_of_any_except(&data, &[7]), Some(3));
/// assert_eq!(index_of_any_except(&[7u8, 7], &[7]), None);
/// ```
#[inline]
pub fn index_of_any_except<T: ScanElement>(haystack: &[T], values: &[T]) -> Option<usize> {
    trace!(
        "INDEX_OF_ANY_EXCEPT DISPATCH: haystack.len()={}, values.len()={}",
        haystack.len(),
        values.len()
    );
    let caps = get_hw_capabilities();
    find_any_fwd::<T, ExcludeValues>(haystack, values, &caps)
}

/// Find the last element NOT equal to any of `values`.
#[inline]
pub fn last_index_of_any_except<T: ScanElement>(haystack: &[T], values: &[T]) -> Option<usize> {
    trace!(
        "LAST_INDEX_OF_ANY_EXCEPT DISPATCH: haystack.len()={}, values.len()={}",
        haystack.len(),
        values.len()
    );
    let caps = get_hw_capabilities();
    find_any_rev::<T, ExcludeValues>(haystack, values, &caps)
}

/// Find the first element inside the inclusive range `[lo, hi]`.
///
/// The range is empty when `lo > hi`; an empty range contains nothing.
/// Unsigned element types use the vector tiers via the single wrapping
/// compare `(x - lo) <= (hi - lo)`; signed types scan scalar.
///
/// # Examples
/// ```rust
/// use scanx::index_of_any_in_range;
///
/// let data = [50u8, 3, 20, 90];
/// assert_eq!(index_of_any_in_range(&data, 10, 40), Some(2));
/// assert_eq!(index_of_any_in_range(&data, 40, 10), None);
/// ```
#[inline]
pub fn index_of_any_in_range<T: ScanElement + Ord>(haystack: &[T], lo: T, hi: T) -> Option<usize> {
    trace!("INDEX_OF_ANY_IN_RANGE DISPATCH: haystack.len()={}", haystack.len());
    let caps = get_hw_capabilities();
    find_in_range::<T, MatchValues>(haystack, lo, hi, &caps)
}

/// Find the first element outside the inclusive range `[lo, hi]`.
///
/// An empty range (`lo > hi`) excludes nothing, so the first element of a
/// non-empty haystack is the answer.
#[inline]
pub fn index_of_any_except_in_range<T: ScanElement + Ord>(
    haystack: &[T],
    lo: T,
    hi: T,
) -> Option<usize> {
    trace!(
        "INDEX_OF_ANY_EXCEPT_IN_RANGE DISPATCH: haystack.len()={}",
        haystack.len()
    );
    let caps = get_hw_capabilities();
    find_in_range::<T, ExcludeValues>(haystack, lo, hi, &caps)
}

// =============================================================================
// SEQUENCE SEARCH
// =============================================================================

/// Find the first start index of `needle` inside `haystack`.
///
/// An empty needle matches at index 0. The scan vector-searches for the
/// needle's first element and verifies the remainder bytewise, so overlapping
/// occurrences are found at the earliest start.
///
/// # Examples
/// ```rust
/// use scanx::index_of_seq;
///
/// let text = b"the quick brown fox";
/// assert_eq!(index_of_seq(text, b"brown"), Some(10));
/// assert_eq!(index_of_seq(text, b""), Some(0));
/// assert_eq!(index_of_seq(text, b"wolf"), None);
/// ```
#[inline]
pub fn index_of_seq<T: ScanElement>(haystack: &[T], needle: &[T]) -> Option<usize> {
    trace!(
        "INDEX_OF_SEQ DISPATCH: haystack.len()={}, needle.len()={}",
        haystack.len(),
        needle.len()
    );
    let caps = get_hw_capabilities();
    sequence::seq_index_of(haystack, needle, &caps)
}

/// Find the last start index of `needle` inside `haystack`.
///
/// An empty needle matches at index `haystack.len()`.
#[inline]
pub fn last_index_of_seq<T: ScanElement>(haystack: &[T], needle: &[T]) -> Option<usize> {
    trace!(
        "LAST_INDEX_OF_SEQ DISPATCH: haystack.len()={}, needle.len()={}",
        haystack.len(),
        needle.len()
    );
    let caps = get_hw_capabilities();
    sequence::seq_last_index_of(haystack, needle, &caps)
}

// =============================================================================
// SEQUENCE COMPARISON
// =============================================================================

/// True if both slices have the same length and equal elements.
///
/// # Examples
/// ```rust
/// use scanx::sequence_equal;
///
/// assert!(sequence_equal(&[1u32, 2, 3], &[1, 2, 3]));
/// assert!(!sequence_equal(&[1u32, 2, 3], &[1, 2]));
/// ```
#[inline]
pub fn sequence_equal<T: ScanElement>(a: &[T], b: &[T]) -> bool {
    trace!("SEQUENCE_EQUAL DISPATCH: a.len()={}, b.len()={}", a.len(), b.len());
    if a.len() != b.len() {
        return false;
    }
    let caps = get_hw_capabilities();
    eq_bytes(as_bytes(a), as_bytes(b), &caps)
}

/// [`sequence_equal`] with a caller-supplied element predicate. Runs scalar.
#[inline]
pub fn sequence_equal_by<T, F>(a: &[T], b: &[T], mut eq: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    trace!(
        "SEQUENCE_EQUAL_BY DISPATCH: a.len()={}, b.len()={}",
        a.len(),
        b.len()
    );
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| eq(x, y))
}

/// Lexicographic comparison of two slices.
///
/// The first differing element decides; when one slice is a prefix of the
/// other, the shorter slice orders first. The mismatch position is located
/// bytewise in the vector tiers, then the ordering at that position is taken
/// from the element type so signed and multi-byte types order correctly.
///
/// # Examples
/// ```rust
/// use core::cmp::Ordering;
/// use scanx::sequence_compare;
///
/// assert_eq!(sequence_compare(&[1u8, 2, 3], &[1, 2, 4]), Ordering::Less);
/// assert_eq!(sequence_compare(&[1u8, 2], &[1, 2, 0]), Ordering::Less);
/// assert_eq!(sequence_compare(&[9i16], &[-9]), Ordering::Greater);
/// ```
#[inline]
pub fn sequence_compare<T: ScanElement + Ord>(a: &[T], b: &[T]) -> Ordering {
    trace!(
        "SEQUENCE_COMPARE DISPATCH: a.len()={}, b.len()={}",
        a.len(),
        b.len()
    );
    let caps = get_hw_capabilities();
    let common = a.len().min(b.len());
    match first_mismatch(as_bytes(&a[..common]), as_bytes(&b[..common]), &caps) {
        Some(byte_idx) => {
            let i = byte_idx / core::mem::size_of::<T>();
            a[i].cmp(&b[i])
        }
        None => a.len().cmp(&b.len()),
    }
}

/// [`sequence_compare`] with a caller-supplied comparator. Runs scalar.
#[inline]
pub fn sequence_compare_by<T, F>(a: &[T], b: &[T], mut compare: F) -> Ordering
where
    F: FnMut(&T, &T) -> Ordering,
{
    trace!(
        "SEQUENCE_COMPARE_BY DISPATCH: a.len()={}, b.len()={}",
        a.len(),
        b.len()
    );
    for (x, y) in a.iter().zip(b.iter()) {
        match compare(x, y) {
            Ordering::Equal => continue,
            non_eq => return non_eq,
        }
    }
    a.len().cmp(&b.len())
}

// =============================================================================
// BULK OPERATIONS
// =============================================================================

/// Set every element of `buf` to `value`.
///
/// # Examples
/// ```rust
/// use scanx::fill;
///
/// let mut buf = [0u16; 5];
/// fill(&mut buf, 7);
/// assert_eq!(buf, [7; 5]);
/// ```
#[inline]
pub fn fill<T: ScanElement>(buf: &mut [T], value: T) {
    trace!("FILL DISPATCH: buf.len()={}", buf.len());
    let caps = get_hw_capabilities();
    T::Word::fill(as_words_mut(buf), value.to_word(), &caps);
}

/// [`fill`] for arbitrary cloneable element types. Runs scalar.
#[inline]
pub fn fill_any<T: Clone>(buf: &mut [T], value: T) {
    trace!("FILL_ANY DISPATCH: buf.len()={}", buf.len());
    bulk::scalar_fill(buf, value);
}

/// Copy `src` into the front of `dst`, substituting `new` for every element
/// equal to `old`. Elements of `dst` past `src.len()` are left untouched.
///
/// # Errors
/// * Returns [`ScanError::DestinationTooShort`] when `dst` cannot hold `src`
///
/// # Examples
/// ```rust
/// use scanx::replace;
///
/// let src = [1u8, 0, 2, 0];
/// let mut dst = [9u8; 5];
/// replace(&src, &mut dst, 0, 7)?;
/// assert_eq!(dst, [1, 7, 2, 7, 9]);
/// # Ok::<(), scanx::ScanError>(())
/// ```
#[inline]
pub fn replace<T: ScanElement>(src: &[T], dst: &mut [T], old: T, new: T) -> Result<()> {
    trace!(
        "REPLACE DISPATCH: src.len()={}, dst.len()={}",
        src.len(),
        dst.len()
    );
    if dst.len() < src.len() {
        return Err(ScanError::DestinationTooShort {
            needed: src.len(),
            actual: dst.len(),
        });
    }
    let caps = get_hw_capabilities();
    let len = src.len();
    // Kernels take raw pointers so this entry and the in-place one share
    // them; the borrow checker has already proven src and dst disjoint here.
    unsafe {
        T::Word::replace(
            as_words(src).as_ptr(),
            as_words_mut(dst).as_mut_ptr(),
            len,
            old.to_word(),
            new.to_word(),
            &caps,
        );
    }
    Ok(())
}

/// Substitute `new` for every element of `buf` equal to `old`, in place.
///
/// # Examples
/// ```rust
/// use scanx::replace_in_place;
///
/// let mut buf = [1u8, 0, 2, 0];
/// replace_in_place(&mut buf, 0, 7);
/// assert_eq!(buf, [1, 7, 2, 7]);
/// ```
#[inline]
pub fn replace_in_place<T: ScanElement>(buf: &mut [T], old: T, new: T) {
    trace!("REPLACE_IN_PLACE DISPATCH: buf.len()={}", buf.len());
    let caps = get_hw_capabilities();
    let len = buf.len();
    let ptr = as_words_mut(buf).as_mut_ptr();
    // Full aliasing (src == dst) is within the kernel contract.
    unsafe {
        T::Word::replace(ptr, ptr, len, old.to_word(), new.to_word(), &caps);
    }
}

/// Reverse the order of elements in `buf`.
///
/// # Examples
/// ```rust
/// use scanx::reverse;
///
/// let mut buf = [1u32, 2, 3, 4, 5];
/// reverse(&mut buf);
/// assert_eq!(buf, [5, 4, 3, 2, 1]);
/// ```
#[inline]
pub fn reverse<T: ScanElement>(buf: &mut [T]) {
    trace!("REVERSE DISPATCH: buf.len()={}", buf.len());
    let caps = get_hw_capabilities();
    T::Word::reverse(as_words_mut(buf), &caps);
}

/// [`reverse`] for arbitrary element types. Runs scalar.
#[inline]
pub fn reverse_any<T>(buf: &mut [T]) {
    trace!("REVERSE_ANY DISPATCH: buf.len()={}", buf.len());
    bulk::scalar_reverse(buf);
}

/// Count the occurrences of `value` in `haystack`.
///
/// # Examples
/// ```rust
/// use scanx::count;
///
/// assert_eq!(count(&[1u8, 2, 1, 1, 3], 1), 3);
/// assert_eq!(count(&[] as &[u8], 1), 0);
/// ```
#[inline]
pub fn count<T: ScanElement>(haystack: &[T], value: T) -> usize {
    trace!("COUNT DISPATCH: haystack.len()={}", haystack.len());
    let caps = get_hw_capabilities();
    T::Word::count_eq(as_words(haystack), value.to_word(), &caps)
}

// =============================================================================
// SORTED SEARCH
// =============================================================================

/// Binary search in an ascending-sorted slice.
///
/// # Returns
/// * `Ok(index)` - Position of a matching element (any one, when duplicates
///   are present)
/// * `Err(index)` - Insertion point that keeps the slice sorted
///
/// # Examples
/// ```rust
/// use scanx::binary_search;
///
/// let sorted = [10u32, 20, 30];
/// assert_eq!(binary_search(&sorted, &20), Ok(1));
/// assert_eq!(binary_search(&sorted, &25), Err(2));
/// ```
#[inline]
pub fn binary_search<T: Ord>(haystack: &[T], target: &T) -> core::result::Result<usize, usize> {
    trace!("BINARY_SEARCH DISPATCH: haystack.len()={}", haystack.len());
    sorted::binary_search(haystack, target)
}

/// [`binary_search`] with a caller-supplied comparator. The comparator must
/// be consistent with the slice's sort order.
#[inline]
pub fn binary_search_by<T, F>(haystack: &[T], compare: F) -> core::result::Result<usize, usize>
where
    F: FnMut(&T) -> Ordering,
{
    trace!(
        "BINARY_SEARCH_BY DISPATCH: haystack.len()={}",
        haystack.len()
    );
    sorted::binary_search_by(haystack, compare)
}
