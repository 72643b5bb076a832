// SPDX-License-Identifier: Apache-2.0

// types.rs for scanx
use thiserror::Error;

use crate::bulk::BulkWord;
use crate::search::FindWord;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("destination too short: need {needed} elements, have {actual}")]
    DestinationTooShort { needed: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Element types whose equality is plain memory equality, making them safe to
/// reinterpret as unsigned machine words for lane-wise compares.
///
/// Implementations map each element to a word of identical size and alignment
/// (`u8`/`u16`/`u32`/`u64`); the vectorized kernels only ever see the word
/// form. Floats are deliberately absent: `NaN != NaN` and `-0.0 == 0.0` break
/// the bitwise-equality contract. Types outside this set go through the `_by`
/// entry points instead.
///
/// # Safety
///
/// Implementors must guarantee:
/// - `size_of::<Self>() == size_of::<Self::Word>()` and identical alignment,
///   with no padding bits;
/// - `a == b` if and only if `to_word(a) == to_word(b)`;
/// - when `IS_UNSIGNED` is true, `Ord` on `Self` agrees with `Ord` on the
///   word form (required by the vectorized range search).
pub unsafe trait ScanElement: Copy + PartialEq + 'static {
    /// Unsigned word the element is reinterpreted as inside kernels.
    type Word: FindWord + BulkWord;

    /// True when the element's ordering matches unsigned word ordering.
    const IS_UNSIGNED: bool;

    fn to_word(self) -> Self::Word;
}

macro_rules! scan_element {
    ($ty:ty, $word:ty, $unsigned:expr) => {
        unsafe impl ScanElement for $ty {
            type Word = $word;
            const IS_UNSIGNED: bool = $unsigned;

            #[inline(always)]
            fn to_word(self) -> $word {
                self as $word
            }
        }
    };
}

scan_element!(u8, u8, true);
scan_element!(i8, u8, false);
scan_element!(u16, u16, true);
scan_element!(i16, u16, false);
scan_element!(u32, u32, true);
scan_element!(i32, u32, false);
scan_element!(u64, u64, true);
scan_element!(i64, u64, false);

#[cfg(target_pointer_width = "64")]
scan_element!(usize, u64, true);
#[cfg(target_pointer_width = "64")]
scan_element!(isize, u64, false);
#[cfg(target_pointer_width = "32")]
scan_element!(usize, u32, true);
#[cfg(target_pointer_width = "32")]
scan_element!(isize, u32, false);

// char compares by code point, which is exactly its u32 representation.
unsafe impl ScanElement for char {
    type Word = u32;
    const IS_UNSIGNED: bool = true;

    #[inline(always)]
    fn to_word(self) -> u32 {
        self as u32
    }
}

// bool is a single byte holding 0 or 1.
unsafe impl ScanElement for bool {
    type Word = u8;
    const IS_UNSIGNED: bool = true;

    #[inline(always)]
    fn to_word(self) -> u8 {
        self as u8
    }
}

/// Reinterpret an element slice as its word form.
///
/// Sound per the `ScanElement` contract: identical size, alignment, and
/// bit-level equality semantics.
#[inline(always)]
pub(crate) fn as_words<T: ScanElement>(s: &[T]) -> &[T::Word] {
    unsafe { std::slice::from_raw_parts(s.as_ptr() as *const T::Word, s.len()) }
}

#[inline(always)]
pub(crate) fn as_words_mut<T: ScanElement>(s: &mut [T]) -> &mut [T::Word] {
    unsafe { std::slice::from_raw_parts_mut(s.as_mut_ptr() as *mut T::Word, s.len()) }
}

/// Reinterpret an element slice as raw bytes (for bitwise equality scans).
#[inline(always)]
pub(crate) fn as_bytes<T: ScanElement>(s: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(s.as_ptr() as *const u8, s.len() * std::mem::size_of::<T>())
    }
}

#[inline(always)]
pub(crate) fn words_of<T: ScanElement, const N: usize>(values: [T; N]) -> [T::Word; N] {
    values.map(T::to_word)
}
