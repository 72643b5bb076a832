// SPDX-License-Identifier: Apache-2.0

//! SCANX library
//!
//! Vectorized scanning, comparison, and bulk-mutation primitives for slices
//! of machine-word-sized elements. Every operation has a scalar fallback and
//! SIMD backends selected at runtime.
//!
//! - Element search: first/last occurrence, multi-value sets, negated sets,
//!   inclusive numeric ranges
//! - Sequence search: first/last occurrence of a subsequence
//! - Sequence comparison: equality and lexicographic ordering
//! - Bulk mutation: fill, conditional replace, reverse, occurrence count
//! - Binary search over sorted slices
//!
//! ## Hardware support
//! - **SSE2 / AVX2 / NEON** are used on stable Rust where available
//! - **AVX-512** is available behind the `avx512` feature (nightly Rust)
//! - The `disable-simd` feature forces every operation onto the scalar paths
//!
//! ## Usage
//!
//! ```rust
//! use scanx;
//!
//! // Search operations (automatically select the best SIMD implementation)
//! let data = [5u8, 3, 8, 1, 9];
//! assert_eq!(scanx::index_of(&data, 8), Some(2));
//! assert_eq!(scanx::index_of_any(&data, &[1, 9]), Some(3));
//!
//! // Sequence search
//! assert_eq!(scanx::index_of_seq(b"the quick brown fox", b"brown"), Some(10));
//!
//! // Bulk mutation
//! let mut buf = [1u32, 2, 3, 4, 5];
//! scanx::reverse(&mut buf);
//! assert_eq!(buf, [5, 4, 3, 2, 1]);
//!
//! // Check available SIMD capabilities
//! let caps = scanx::get_hw_capabilities();
//! println!("Has AVX2: {}", caps.has_avx2);
//! ```

#![allow(clippy::missing_safety_doc)]

pub mod bulk;
pub mod compare;
pub mod constants;
pub mod dispatch;
pub mod negate;
pub mod search;
pub mod sequence;
pub mod sorted;
pub mod types;

pub use types::*;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
#[path = "tests/bulk_tests.rs"]
mod bulk_tests;
#[cfg(test)]
#[path = "tests/compare_tests.rs"]
mod compare_tests;
#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod dispatch_tests;
#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod search_tests;
#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod sequence_tests;
#[cfg(test)]
#[path = "tests/sorted_tests.rs"]
mod sorted_tests;

// Re-export the main API
pub use dispatch::*;
pub use negate::{ExcludeValues, MatchValues, ScanNegator};
