// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use crate::dispatch::{
    contains, index_of, index_of_any, index_of_any_except, index_of_any_except_in_range,
    index_of_any_in_range, last_index_of, last_index_of_any, last_index_of_any_except,
  };
  use proptest::prelude::*;

  // =============================================================================
  // NAIVE REFERENCES
  // =============================================================================

  fn naive_index_of<T: PartialEq>(h: &[T], v: &T) -> Option<usize> {
    h.iter().position(|x| x == v)
  }

  fn naive_last_index_of<T: PartialEq>(h: &[T], v: &T) -> Option<usize> {
    h.iter().rposition(|x| x == v)
  }

  fn naive_index_of_any<T: PartialEq>(h: &[T], values: &[T]) -> Option<usize> {
    h.iter().position(|x| values.contains(x))
  }

  fn naive_index_of_any_except<T: PartialEq>(h: &[T], values: &[T]) -> Option<usize> {
    h.iter().position(|x| !values.contains(x))
  }

  fn naive_in_range<T: Copy + Ord>(h: &[T], lo: T, hi: T) -> Option<usize> {
    h.iter().position(|&x| lo <= x && x <= hi)
  }

  // =============================================================================
  // SINGLE-VALUE SEARCH - DUAL PATH (SCALAR + SIMD)
  // =============================================================================

  /// Plants `value` at every position of an otherwise-clean buffer and checks
  /// the reported index. The length list straddles each register width so the
  /// full-chunk loop, the overlapping tail, and the scalar path all run.
  fn check_single_value_positions_u8(filler: u8, value: u8) {
    for len in [1, 2, 7, 15, 16, 17, 31, 32, 33, 63, 64, 65, 127, 128, 129] {
      for pos in 0..len {
        let mut buf = vec![filler; len];
        buf[pos] = value;
        assert_eq!(
          index_of(&buf, value),
          Some(pos),
          "index_of failed - len={}, pos={}",
          len,
          pos
        );
        assert_eq!(
          last_index_of(&buf, value),
          Some(pos),
          "last_index_of failed - len={}, pos={}",
          len,
          pos
        );
        assert!(contains(&buf, value));
      }
    }
  }

  #[test]
  fn test_index_of_basic() {
    let data = [5u8, 3, 8, 1, 9];
    assert_eq!(index_of(&data, 8), Some(2));
    assert_eq!(index_of(&data, 5), Some(0));
    assert_eq!(index_of(&data, 9), Some(4));
    assert_eq!(index_of(&data, 7), None);
  }

  #[test]
  fn test_index_of_empty_haystack() {
    assert_eq!(index_of(&[] as &[u8], 1), None);
    assert_eq!(last_index_of(&[] as &[u32], 1), None);
    assert!(!contains(&[] as &[u64], 1));
  }

  #[test]
  fn test_index_of_first_match_wins() {
    let data = [4u8, 2, 4, 2, 4];
    assert_eq!(index_of(&data, 4), Some(0));
    assert_eq!(last_index_of(&data, 4), Some(4));
    assert_eq!(index_of(&data, 2), Some(1));
    assert_eq!(last_index_of(&data, 2), Some(3));
  }

  #[test]
  fn test_index_of_all_positions_u8() {
    check_single_value_positions_u8(0xAA, 0x55);
    check_single_value_positions_u8(0, 255);
  }

  #[test]
  fn test_index_of_all_positions_wide_elements() {
    for len in [1, 3, 4, 5, 7, 8, 9, 15, 16, 17, 33] {
      for pos in 0..len {
        let mut b16 = vec![0x1111u16; len];
        b16[pos] = 0xBEEF;
        assert_eq!(index_of(&b16, 0xBEEF), Some(pos), "u16 len={} pos={}", len, pos);
        assert_eq!(last_index_of(&b16, 0xBEEF), Some(pos));

        let mut b32 = vec![7u32; len];
        b32[pos] = 0xDEAD_BEEF;
        assert_eq!(index_of(&b32, 0xDEAD_BEEF), Some(pos), "u32 len={} pos={}", len, pos);

        let mut b64 = vec![1u64; len];
        b64[pos] = u64::MAX;
        assert_eq!(index_of(&b64, u64::MAX), Some(pos), "u64 len={} pos={}", len, pos);
        assert_eq!(last_index_of(&b64, u64::MAX), Some(pos));
      }
    }
  }

  #[test]
  fn test_index_of_signed_and_char() {
    let signed = [-3i32, 0, 7, -3];
    assert_eq!(index_of(&signed, -3), Some(0));
    assert_eq!(last_index_of(&signed, -3), Some(3));
    assert_eq!(index_of(&signed, 8), None);

    let chars: Vec<char> = "héllo wörld".chars().collect();
    assert_eq!(index_of(&chars, 'ö'), Some(7));
    assert_eq!(index_of(&chars, 'z'), None);

    let bools = [false, false, true, false];
    assert_eq!(index_of(&bools, true), Some(2));
    assert_eq!(last_index_of(&bools, false), Some(3));
  }

  #[test]
  fn test_index_of_length_sweep_matches_naive() {
    for len in 0..=80usize {
      let buf: Vec<u8> = (0..len).map(|i| (i % 7) as u8).collect();
      for v in 0..8u8 {
        assert_eq!(index_of(&buf, v), naive_index_of(&buf, &v), "len={} v={}", len, v);
        assert_eq!(last_index_of(&buf, v), naive_last_index_of(&buf, &v));
      }
    }
  }

  // =============================================================================
  // MULTI-VALUE SEARCH
  // =============================================================================

  #[test]
  fn test_index_of_any_basic() {
    let data = [5u8, 3, 8, 1, 9];
    assert_eq!(index_of_any(&data, &[1, 8]), Some(2));
    assert_eq!(index_of_any(&data, &[9]), Some(4));
    assert_eq!(index_of_any(&data, &[0, 2, 4]), None);
    assert_eq!(last_index_of_any(&data, &[5, 3]), Some(1));
  }

  #[test]
  fn test_index_of_any_empty_values() {
    // No candidates: nothing matches, everything is "except".
    let data = [1u8, 2, 3];
    assert_eq!(index_of_any(&data, &[]), None);
    assert_eq!(last_index_of_any(&data, &[]), None);
    assert_eq!(index_of_any_except(&data, &[]), Some(0));
    assert_eq!(last_index_of_any_except(&data, &[]), Some(2));
    assert_eq!(index_of_any_except(&[] as &[u8], &[]), None);
  }

  #[test]
  fn test_index_of_any_every_set_size() {
    // Value-set sizes 1 through 7 cover each monomorphized kernel and the
    // scalar fallback past five.
    let buf: Vec<u16> = (0..200).map(|i| (i * 13 % 251) as u16).collect();
    let candidates = [500u16, 26, 39, 52, 65, 78, 91];
    for n in 1..=candidates.len() {
      let values = &candidates[..n];
      assert_eq!(
        index_of_any(&buf, values),
        naive_index_of_any(&buf, values),
        "fwd set size {}",
        n
      );
      assert_eq!(
        last_index_of_any(&buf, values),
        buf.iter().rposition(|x| values.contains(x)),
        "rev set size {}",
        n
      );
    }
  }

  #[test]
  fn test_index_of_any_except_basic() {
    let data = [7u8, 7, 7, 2, 7];
    assert_eq!(index_of_any_except(&data, &[7]), Some(3));
    assert_eq!(last_index_of_any_except(&data, &[7]), Some(3));
    assert_eq!(index_of_any_except(&[7u8; 40], &[7]), None);
    assert_eq!(index_of_any_except(&data, &[7, 2]), None);
  }

  #[test]
  fn test_index_of_any_except_length_sweep() {
    for len in 0..=80usize {
      let buf: Vec<u8> = (0..len).map(|i| if i % 9 == 4 { 42 } else { 7 }).collect();
      assert_eq!(
        index_of_any_except(&buf, &[7]),
        naive_index_of_any_except(&buf, &[7]),
        "len={}",
        len
      );
      assert_eq!(
        last_index_of_any_except(&buf, &[7]),
        buf.iter().rposition(|x| *x != 7)
      );
      assert_eq!(
        index_of_any_except(&buf, &[7, 42]),
        None,
        "len={}",
        len
      );
    }
  }

  #[test]
  fn test_index_of_any_u64_wide() {
    let mut buf = vec![u64::MAX - 1; 50];
    buf[37] = 3;
    buf[49] = 9;
    assert_eq!(index_of_any(&buf, &[9, 3]), Some(37));
    assert_eq!(last_index_of_any(&buf, &[9, 3]), Some(49));
    assert_eq!(index_of_any_except(&buf, &[u64::MAX - 1]), Some(37));
  }

  // =============================================================================
  // RANGE SEARCH
  // =============================================================================

  #[test]
  fn test_in_range_basic() {
    let data = [50u8, 3, 20, 90];
    assert_eq!(index_of_any_in_range(&data, 10, 40), Some(2));
    assert_eq!(index_of_any_in_range(&data, 0, 255), Some(0));
    assert_eq!(index_of_any_in_range(&data, 91, 200), None);
    assert_eq!(index_of_any_except_in_range(&data, 0, 60), Some(3));
    assert_eq!(index_of_any_except_in_range(&data, 0, 255), None);
  }

  #[test]
  fn test_in_range_bounds_inclusive() {
    let data = [10u8, 40];
    assert_eq!(index_of_any_in_range(&data, 10, 10), Some(0));
    assert_eq!(index_of_any_in_range(&data, 40, 40), Some(1));
    assert_eq!(index_of_any_in_range(&data, 11, 39), None);
  }

  #[test]
  fn test_in_range_empty_range() {
    // lo > hi is the empty range: contains nothing, excludes everything.
    let data = [1u8, 2, 3];
    assert_eq!(index_of_any_in_range(&data, 40, 10), None);
    assert_eq!(index_of_any_except_in_range(&data, 40, 10), Some(0));
    assert_eq!(index_of_any_except_in_range(&[] as &[u8], 40, 10), None);
  }

  #[test]
  fn test_in_range_signed() {
    let data = [-50i32, -3, 20, 90];
    assert_eq!(index_of_any_in_range(&data, -10, 10), Some(1));
    assert_eq!(index_of_any_in_range(&data, i32::MIN, -40), Some(0));
    assert_eq!(index_of_any_except_in_range(&data, -50, 89), Some(3));
  }

  #[test]
  fn test_in_range_length_sweep() {
    for len in 0..=80usize {
      let buf: Vec<u8> = (0..len).map(|i| (i * 31 % 97) as u8).collect();
      for (lo, hi) in [(0u8, 255u8), (10, 40), (96, 96), (97, 255), (200, 100)] {
        let expected = if lo <= hi { naive_in_range(&buf, lo, hi) } else { None };
        assert_eq!(
          index_of_any_in_range(&buf, lo, hi),
          expected,
          "len={} lo={} hi={}",
          len,
          lo,
          hi
        );
      }
    }
  }

  #[test]
  fn test_in_range_wide_elements() {
    let b16: Vec<u16> = (0..100).map(|i| i * 600).collect();
    assert_eq!(index_of_any_in_range(&b16, 2000, 3000), Some(4));
    assert_eq!(index_of_any_in_range(&b16, 65_000, 65_535), naive_in_range(&b16, 65_000, 65_535));

    let b32: Vec<u32> = (0..60).map(|i| i * 70_000_000).collect();
    assert_eq!(index_of_any_in_range(&b32, 250_000_000, 350_000_000), Some(4));

    // u64 has no SSE2 range tier, so this exercises the AVX2-or-scalar split.
    let b64: Vec<u64> = (0..40).map(|i| i as u64 * u32::MAX as u64).collect();
    assert_eq!(
      index_of_any_in_range(&b64, u32::MAX as u64 * 10, u32::MAX as u64 * 11),
      Some(10)
    );
    assert_eq!(index_of_any_except_in_range(&b64, 0, u64::MAX), None);
  }

  // =============================================================================
  // PROPERTY TESTS
  // =============================================================================

  proptest! {
    #[test]
    fn prop_index_of_matches_naive(h in proptest::collection::vec(any::<u8>(), 0..200), v: u8) {
      prop_assert_eq!(index_of(&h, v), naive_index_of(&h, &v));
      prop_assert_eq!(last_index_of(&h, v), naive_last_index_of(&h, &v));
      prop_assert_eq!(contains(&h, v), h.contains(&v));
    }

    #[test]
    fn prop_index_of_any_matches_naive(
      h in proptest::collection::vec(any::<u8>(), 0..200),
      values in proptest::collection::vec(any::<u8>(), 0..7),
    ) {
      prop_assert_eq!(index_of_any(&h, &values), naive_index_of_any(&h, &values));
      prop_assert_eq!(
        index_of_any_except(&h, &values),
        naive_index_of_any_except(&h, &values)
      );
    }

    #[test]
    fn prop_in_range_matches_naive(
      h in proptest::collection::vec(any::<u16>(), 0..200),
      lo: u16,
      hi: u16,
    ) {
      let expected = if lo <= hi { naive_in_range(&h, lo, hi) } else { None };
      prop_assert_eq!(index_of_any_in_range(&h, lo, hi), expected);
    }

    #[test]
    fn prop_find_then_verify_u64(h in proptest::collection::vec(any::<u64>(), 0..80), v: u64) {
      prop_assert_eq!(index_of(&h, v), naive_index_of(&h, &v));
      prop_assert_eq!(last_index_of(&h, v), naive_last_index_of(&h, &v));
    }
  }
}
