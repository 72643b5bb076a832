// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use core::cmp::Ordering;

  use crate::dispatch::{
    sequence_compare, sequence_compare_by, sequence_equal, sequence_equal_by,
  };
  use proptest::prelude::*;

  #[test]
  fn test_sequence_equal_basic() {
    assert!(sequence_equal(&[1u32, 2, 3], &[1, 2, 3]));
    assert!(!sequence_equal(&[1u32, 2, 3], &[1, 2, 4]));
    assert!(!sequence_equal(&[1u32, 2, 3], &[1, 2]));
    assert!(sequence_equal(&[] as &[u8], &[]));
    assert!(!sequence_equal(&[] as &[u8], &[0]));
  }

  #[test]
  fn test_sequence_equal_every_length() {
    // Sweeps across the sub-word short paths (2/4/8/16 bytes) and the vector
    // chunks, flipping one byte at each position to catch a missed lane.
    for len in 0..=80usize {
      let a: Vec<u8> = (0..len).map(|i| (i * 17 % 251) as u8).collect();
      assert!(sequence_equal(&a, &a.clone()), "equal failed at len={}", len);
      for pos in 0..len {
        let mut b = a.clone();
        b[pos] ^= 0x40;
        assert!(
          !sequence_equal(&a, &b),
          "mismatch missed - len={}, pos={}",
          len,
          pos
        );
      }
    }
  }

  #[test]
  fn test_sequence_equal_wide_elements() {
    let a: Vec<u64> = (0..33).map(|i| i * 0x0101_0101).collect();
    assert!(sequence_equal(&a, &a.clone()));
    let mut b = a.clone();
    b[32] += 1;
    assert!(!sequence_equal(&a, &b));

    let chars: Vec<char> = "grüße".chars().collect();
    assert!(sequence_equal(&chars, &chars.clone()));
  }

  #[test]
  fn test_sequence_equal_by() {
    let a = ["Hello", "WORLD"];
    let b = ["hello", "world"];
    assert!(sequence_equal_by(&a, &b, |x, y| x.eq_ignore_ascii_case(y)));
    assert!(!sequence_equal_by(&a, &b[..1], |x, y| x.eq_ignore_ascii_case(y)));
  }

  #[test]
  fn test_sequence_compare_basic() {
    assert_eq!(sequence_compare(&[1u8, 2, 3], &[1, 2, 4]), Ordering::Less);
    assert_eq!(sequence_compare(&[1u8, 2, 4], &[1, 2, 3]), Ordering::Greater);
    assert_eq!(sequence_compare(&[1u8, 2, 3], &[1, 2, 3]), Ordering::Equal);
  }

  #[test]
  fn test_sequence_compare_prefix_rule() {
    // A strict prefix orders before the longer sequence.
    assert_eq!(sequence_compare(&[1u8, 2], &[1, 2, 0]), Ordering::Less);
    assert_eq!(sequence_compare(&[1u8, 2, 0], &[1, 2]), Ordering::Greater);
    assert_eq!(sequence_compare(&[] as &[u8], &[]), Ordering::Equal);
    assert_eq!(sequence_compare(&[] as &[u8], &[0]), Ordering::Less);
  }

  #[test]
  fn test_sequence_compare_element_order_not_byte_order() {
    // 0x0100 > 0x00FF numerically even though its little-endian low byte is
    // smaller; the ordering must come from the element, not its bytes.
    assert_eq!(sequence_compare(&[0x0100u16], &[0x00FFu16]), Ordering::Greater);
    assert_eq!(sequence_compare(&[9i16], &[-9i16]), Ordering::Greater);
    assert_eq!(sequence_compare(&[-1i32, 5], &[-1, 4]), Ordering::Greater);
  }

  #[test]
  fn test_sequence_compare_long_common_prefix() {
    let a: Vec<u8> = vec![7; 100];
    let mut b = a.clone();
    assert_eq!(sequence_compare(&a, &b), Ordering::Equal);
    b[99] = 8;
    assert_eq!(sequence_compare(&a, &b), Ordering::Less);
    b[0] = 6;
    assert_eq!(sequence_compare(&a, &b), Ordering::Greater);
  }

  #[test]
  fn test_sequence_compare_by() {
    let a = [3u32, 1];
    let b = [2u32, 9];
    assert_eq!(sequence_compare_by(&a, &b, |x, y| x.cmp(y)), Ordering::Greater);
    // Reversed comparator reverses the verdict on the first element.
    assert_eq!(sequence_compare_by(&a, &b, |x, y| y.cmp(x)), Ordering::Less);
    assert_eq!(
      sequence_compare_by(&a[..1], &[3u32, 0], |x, y| x.cmp(y)),
      Ordering::Less
    );
  }

  proptest! {
    #[test]
    fn prop_equal_matches_slice_eq(
      a in proptest::collection::vec(any::<u8>(), 0..150),
      b in proptest::collection::vec(any::<u8>(), 0..150),
    ) {
      prop_assert_eq!(sequence_equal(&a, &b), a == b);
      prop_assert_eq!(sequence_equal(&a, &a.clone()), true);
    }

    #[test]
    fn prop_compare_matches_slice_ord(
      a in proptest::collection::vec(any::<u32>(), 0..100),
      b in proptest::collection::vec(any::<u32>(), 0..100),
    ) {
      prop_assert_eq!(sequence_compare(&a, &b), a.as_slice().cmp(b.as_slice()));
    }

    #[test]
    fn prop_compare_signed_matches_slice_ord(
      a in proptest::collection::vec(any::<i16>(), 0..100),
      b in proptest::collection::vec(any::<i16>(), 0..100),
    ) {
      prop_assert_eq!(sequence_compare(&a, &b), a.as_slice().cmp(b.as_slice()));
    }
  }
}
