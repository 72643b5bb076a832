// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use crate::dispatch::{index_of_seq, last_index_of_seq};
  use proptest::prelude::*;

  fn naive_index_of_seq<T: PartialEq>(h: &[T], n: &[T]) -> Option<usize> {
    if n.is_empty() {
      return Some(0);
    }
    if n.len() > h.len() {
      return None;
    }
    h.windows(n.len()).position(|w| w == n)
  }

  fn naive_last_index_of_seq<T: PartialEq>(h: &[T], n: &[T]) -> Option<usize> {
    if n.is_empty() {
      return Some(h.len());
    }
    if n.len() > h.len() {
      return None;
    }
    h.windows(n.len()).rposition(|w| w == n)
  }

  #[test]
  fn test_seq_basic() {
    let text = b"the quick brown fox";
    assert_eq!(index_of_seq(text, b"brown"), Some(10));
    assert_eq!(index_of_seq(text, b"the"), Some(0));
    assert_eq!(index_of_seq(text, b"fox"), Some(16));
    assert_eq!(index_of_seq(text, b"wolf"), None);
  }

  #[test]
  fn test_seq_empty_needle() {
    // An empty needle matches at the scan's starting end.
    assert_eq!(index_of_seq(b"abc", b""), Some(0));
    assert_eq!(last_index_of_seq(b"abc", b""), Some(3));
    assert_eq!(index_of_seq(b"", b""), Some(0));
    assert_eq!(last_index_of_seq(b"", b""), Some(0));
  }

  #[test]
  fn test_seq_needle_longer_than_haystack() {
    assert_eq!(index_of_seq(b"ab", b"abc"), None);
    assert_eq!(last_index_of_seq(b"", b"a"), None);
  }

  #[test]
  fn test_seq_whole_haystack() {
    assert_eq!(index_of_seq(b"needle", b"needle"), Some(0));
    assert_eq!(last_index_of_seq(b"needle", b"needle"), Some(0));
  }

  #[test]
  fn test_seq_overlapping_occurrences() {
    assert_eq!(index_of_seq(b"aaaa", b"aaa"), Some(0));
    assert_eq!(last_index_of_seq(b"aaaa", b"aaa"), Some(1));
    assert_eq!(index_of_seq(b"abababab", b"abab"), Some(0));
    assert_eq!(last_index_of_seq(b"abababab", b"abab"), Some(4));
  }

  #[test]
  fn test_seq_false_candidate_resume() {
    // The first element matches repeatedly before the real occurrence, so
    // verification has to fail and the candidate scan has to resume.
    assert_eq!(index_of_seq(b"ababc", b"abc"), Some(2));
    assert_eq!(index_of_seq(b"axaxaxay", b"axay"), Some(4));
    assert_eq!(last_index_of_seq(b"abcab", b"abc"), Some(0));
  }

  #[test]
  fn test_seq_last_tie_break() {
    let h = b"xxneedlexxneedlexx";
    assert_eq!(index_of_seq(h, b"needle"), Some(2));
    assert_eq!(last_index_of_seq(h, b"needle"), Some(10));
  }

  #[test]
  fn test_seq_wide_elements() {
    let h: Vec<u32> = vec![1, 2, 3, 4, 2, 3, 5];
    assert_eq!(index_of_seq(&h, &[2, 3]), Some(1));
    assert_eq!(last_index_of_seq(&h, &[2, 3]), Some(4));
    assert_eq!(index_of_seq(&h, &[2, 3, 5]), Some(4));
    assert_eq!(index_of_seq(&h, &[3, 2]), None);

    let h64: Vec<u64> = (0..40).map(|i| i % 5).collect();
    assert_eq!(index_of_seq(&h64, &[3, 4, 0]), Some(3));
    assert_eq!(last_index_of_seq(&h64, &[3, 4, 0]), Some(33));
  }

  #[test]
  fn test_seq_near_haystack_end() {
    // The candidate window must stop where a full match can no longer fit;
    // these needles end exactly at the haystack end.
    for len in [2usize, 16, 17, 32, 33, 64, 65] {
      let mut h = vec![9u8; len];
      h[len - 2] = 1;
      h[len - 1] = 2;
      assert_eq!(index_of_seq(&h, &[1, 2]), Some(len - 2), "len={}", len);
      assert_eq!(index_of_seq(&h, &[1, 2, 3]), None, "len={}", len);
    }
  }

  proptest! {
    #[test]
    fn prop_seq_matches_naive(
      h in proptest::collection::vec(0u8..4, 0..120),
      n in proptest::collection::vec(0u8..4, 0..6),
    ) {
      prop_assert_eq!(index_of_seq(&h, &n), naive_index_of_seq(&h, &n));
      prop_assert_eq!(last_index_of_seq(&h, &n), naive_last_index_of_seq(&h, &n));
    }

    #[test]
    fn prop_seq_found_slice_matches(
      h in proptest::collection::vec(any::<u16>(), 1..100),
      start in 0usize..99,
      nlen in 1usize..8,
    ) {
      let start = start % h.len();
      let nlen = nlen.min(h.len() - start);
      let needle = h[start..start + nlen].to_vec();
      let at = index_of_seq(&h, &needle).expect("embedded needle must be found");
      prop_assert!(at <= start);
      prop_assert_eq!(&h[at..at + nlen], needle.as_slice());
    }
  }
}
