// SPDX-License-Identifier: Apache-2.0

//! Subsequence search over element slices.
//!
//! Both directions use the same plan: vector-scan for the needle's first
//! element, then verify the remaining elements with the byte comparator. The
//! candidate scan is restricted to positions where a full match could still
//! fit, so verification never reads past the haystack.

use crate::compare::eq_bytes;
use crate::dispatch::HardwareCapabilities;
use crate::negate::MatchValues;
use crate::search::FindWord;
use crate::types::{as_bytes, ScanElement};

/// First start index of `needle` inside `haystack`. An empty needle matches
/// at index 0.
pub(crate) fn seq_index_of<T: ScanElement>(
    haystack: &[T],
    needle: &[T],
    caps: &HardwareCapabilities,
) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }

    let first = [needle[0].to_word()];
    let words = crate::types::as_words(haystack);
    let rest = as_bytes(&needle[1..]);
    let limit = haystack.len() - (needle.len() - 1);

    let mut base = 0;
    while base < limit {
        let cand = T::Word::find_fwd::<1, MatchValues>(&words[base..limit], &first, caps)?;
        let at = base + cand;
        let tail = as_bytes(&haystack[at + 1..at + needle.len()]);
        if eq_bytes(tail, rest, caps) {
            return Some(at);
        }
        base = at + 1;
    }
    None
}

/// Last start index of `needle` inside `haystack`. An empty needle matches
/// at index `haystack.len()`.
pub(crate) fn seq_last_index_of<T: ScanElement>(
    haystack: &[T],
    needle: &[T],
    caps: &HardwareCapabilities,
) -> Option<usize> {
    if needle.is_empty() {
        return Some(haystack.len());
    }
    if needle.len() > haystack.len() {
        return None;
    }

    let first = [needle[0].to_word()];
    let words = crate::types::as_words(haystack);
    let rest = as_bytes(&needle[1..]);
    let limit = haystack.len() - (needle.len() - 1);

    let mut end = limit;
    while end > 0 {
        let at = T::Word::find_rev::<1, MatchValues>(&words[..end], &first, caps)?;
        let tail = as_bytes(&haystack[at + 1..at + needle.len()]);
        if eq_bytes(tail, rest, caps) {
            return Some(at);
        }
        end = at;
    }
    None
}
