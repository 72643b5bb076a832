// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use crate::dispatch::{binary_search, binary_search_by};
  use proptest::prelude::*;

  #[test]
  fn test_binary_search_basic() {
    let sorted = [10u32, 20, 30];
    assert_eq!(binary_search(&sorted, &10), Ok(0));
    assert_eq!(binary_search(&sorted, &20), Ok(1));
    assert_eq!(binary_search(&sorted, &30), Ok(2));
  }

  #[test]
  fn test_binary_search_insertion_points() {
    let sorted = [10u32, 20, 30];
    assert_eq!(binary_search(&sorted, &5), Err(0));
    assert_eq!(binary_search(&sorted, &15), Err(1));
    assert_eq!(binary_search(&sorted, &25), Err(2));
    assert_eq!(binary_search(&sorted, &35), Err(3));
  }

  #[test]
  fn test_binary_search_empty_and_single() {
    assert_eq!(binary_search(&[] as &[i32], &1), Err(0));
    assert_eq!(binary_search(&[7u8], &7), Ok(0));
    assert_eq!(binary_search(&[7u8], &3), Err(0));
    assert_eq!(binary_search(&[7u8], &9), Err(1));
  }

  #[test]
  fn test_binary_search_duplicates() {
    // Any index holding the target is acceptable.
    let sorted = [1u8, 2, 2, 2, 3];
    let idx = binary_search(&sorted, &2).unwrap();
    assert_eq!(sorted[idx], 2);
  }

  #[test]
  fn test_binary_search_negative_values() {
    let sorted = [-30i64, -10, 0, 25];
    assert_eq!(binary_search(&sorted, &-10), Ok(1));
    assert_eq!(binary_search(&sorted, &-20), Err(1));
    assert_eq!(binary_search(&sorted, &i64::MIN), Err(0));
  }

  #[test]
  fn test_binary_search_by_key_projection() {
    let pairs = [(1u32, "one"), (4, "four"), (9, "nine")];
    assert_eq!(binary_search_by(&pairs, |p| p.0.cmp(&4)), Ok(1));
    assert_eq!(binary_search_by(&pairs, |p| p.0.cmp(&5)), Err(2));
  }

  proptest! {
    #[test]
    fn prop_binary_search_agrees_with_std(
      mut v in proptest::collection::vec(any::<u16>(), 0..120),
      target: u16,
    ) {
      v.sort_unstable();
      match binary_search(&v, &target) {
        Ok(i) => prop_assert_eq!(v[i], target),
        Err(i) => {
          // The insertion point keeps the slice sorted and the target absent.
          prop_assert!(!v.contains(&target));
          prop_assert!(i <= v.len());
          if i > 0 {
            prop_assert!(v[i - 1] < target);
          }
          if i < v.len() {
            prop_assert!(v[i] > target);
          }
        }
      }
    }
  }
}
