// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use crate::dispatch::{get_hw_capabilities, has_hw_support};
  use crate::test_utils::config_test_logger;

  #[test]
  fn test_capability_detection_is_stable() {
    config_test_logger();
    let a = get_hw_capabilities();
    let b = get_hw_capabilities();
    assert_eq!(a.has_avx512, b.has_avx512);
    assert_eq!(a.has_avx2, b.has_avx2);
    assert_eq!(a.has_sse2, b.has_sse2);
    assert_eq!(a.has_neon, b.has_neon);
  }

  #[test]
  fn test_capability_tiers_are_consistent() {
    let caps = get_hw_capabilities();
    // AVX2 implies the SSE2 baseline, and x86 tiers never coexist with NEON.
    if caps.has_avx2 {
      assert!(caps.has_sse2);
      assert!(!caps.has_neon);
    }
    if caps.has_neon {
      assert!(!caps.has_sse2);
    }
    #[cfg(target_arch = "x86_64")]
    assert!(caps.has_sse2);
  }

  #[test]
  fn test_has_hw_support_matches_detection() {
    let caps = get_hw_capabilities();
    assert_eq!(has_hw_support("avx512"), caps.has_avx512);
    assert_eq!(has_hw_support("avx2"), caps.has_avx2);
    assert_eq!(has_hw_support("sse2"), caps.has_sse2);
    assert_eq!(has_hw_support("neon"), caps.has_neon);
    assert!(!has_hw_support("altivec"));
    assert!(!has_hw_support(""));
  }

  #[test]
  fn test_every_entry_point_smoke() {
    // One pass through each public operation with inputs small enough for
    // the scalar tier and a second pass wide enough for a vector tier.
    config_test_logger();
    for scale in [1usize, 20] {
      let data: Vec<u8> = [5u8, 3, 8, 1, 9].repeat(scale);
      assert_eq!(crate::index_of(&data, 8), Some(2));
      assert_eq!(crate::last_index_of(&data, 9), Some(data.len() - 1));
      assert!(crate::contains(&data, 1));
      assert_eq!(crate::index_of_any(&data, &[1, 9]), Some(3));
      assert_eq!(crate::index_of_any_except(&data, &[5, 3]), Some(2));
      assert_eq!(crate::index_of_any_in_range(&data, 8, 9), Some(2));
      assert_eq!(crate::index_of_any_except_in_range(&data, 1, 9), None);
      assert_eq!(crate::index_of_seq(&data, &[8, 1, 9]), Some(2));
      assert_eq!(crate::count(&data, 3), scale);
      assert!(crate::sequence_equal(&data, &data.clone()));

      let mut buf = data.clone();
      crate::reverse(&mut buf);
      assert_eq!(buf[0], 9);
      crate::replace_in_place(&mut buf, 9, 0);
      assert_eq!(crate::count(&buf, 9), 0);
      crate::fill(&mut buf, 6);
      assert_eq!(crate::count(&buf, 6), buf.len());
    }
  }
}
