// SPDX-License-Identifier: Apache-2.0

//! Compile-time match/exclude strategy shared by every search kernel.
//!
//! A search for "any of these values" and a search for "anything but these
//! values" differ only in whether the per-lane match mask is complemented
//! before the bit scan. Encoding that choice as a zero-sized strategy type
//! lets one monomorphized kernel body serve both variants with no runtime
//! cost and exactly one tested code path.

/// Strategy applied to scalar predicates and reduced bit masks.
///
/// `all` is the set of valid mask bits for the current tier and element
/// width; complementing must never turn bits outside the register into
/// matches.
pub trait ScanNegator: 'static {
    const NEGATE: bool;

    #[inline(always)]
    fn matches(found: bool) -> bool {
        if Self::NEGATE {
            !found
        } else {
            found
        }
    }

    #[inline(always)]
    fn mask32(bits: u32, all: u32) -> u32 {
        if Self::NEGATE {
            !bits & all
        } else {
            bits
        }
    }

    #[inline(always)]
    fn mask64(bits: u64, all: u64) -> u64 {
        if Self::NEGATE {
            !bits & all
        } else {
            bits
        }
    }
}

/// Use the match mask as-is ("find matching").
pub struct MatchValues;

/// Complement the match mask ("find non-matching").
pub struct ExcludeValues;

impl ScanNegator for MatchValues {
    const NEGATE: bool = false;
}

impl ScanNegator for ExcludeValues {
    const NEGATE: bool = true;
}
