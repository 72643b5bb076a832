// SPDX-License-Identifier: Apache-2.0

//! Element search: forward/backward scans for one or several candidate
//! values and numeric-range membership.
//!
//! Kernels are stamped per element width and vector tier. Every kernel body
//! is shared between the "match" and "exclude" variants through the
//! [`ScanNegator`](crate::negate::ScanNegator) strategy, and between one and
//! up to five candidate values through a const-generic count (the compiler
//! unrolls the short `while k < N` loops). The final chunk of each scan is an
//! overlapping load at `len - LANES`; callers guarantee `len >= LANES`, so
//! that load never reads before the buffer start, and any lanes it revisits
//! were already proven non-matching by the full chunks before it.

use crate::constants::*;
use crate::dispatch::HardwareCapabilities;
use crate::negate::ScanNegator;

/// Per-width dispatch seam for the search kernels.
///
/// Implemented for the four unsigned machine words; element types reach these
/// through [`ScanElement::Word`](crate::types::ScanElement). Range search has
/// unsigned semantics by construction, which is why signed element types are
/// routed to the scalar two-sided compare before ever getting here.
pub trait FindWord: Copy + PartialEq + Ord + Sized + 'static {
    fn find_fwd<const N: usize, NEG: ScanNegator>(
        h: &[Self],
        values: &[Self; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize>;

    fn find_rev<const N: usize, NEG: ScanNegator>(
        h: &[Self],
        values: &[Self; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize>;

    /// Lowest index with `lo <= h[i] <= hi` (unsigned order). Requires
    /// `lo <= hi`.
    fn find_in_range<NEG: ScanNegator>(
        h: &[Self],
        lo: Self,
        hi: Self,
        caps: &HardwareCapabilities,
    ) -> Option<usize>;
}

// =============================================================================
// SCALAR FALLBACKS
// =============================================================================

/// Forward scalar scan. The single-value form unrolls eight elements per
/// iteration with a dedicated exit per offset so the "not yet found" path
/// stays branch-predictable.
pub(crate) fn scalar_find_fwd<T: PartialEq, NEG: ScanNegator>(
    h: &[T],
    values: &[T],
) -> Option<usize> {
    if let [v] = values {
        let len = h.len();
        let mut i = 0;
        while i + SCALAR_UNROLL <= len {
            if NEG::matches(h[i] == *v) {
                return Some(i);
            }
            if NEG::matches(h[i + 1] == *v) {
                return Some(i + 1);
            }
            if NEG::matches(h[i + 2] == *v) {
                return Some(i + 2);
            }
            if NEG::matches(h[i + 3] == *v) {
                return Some(i + 3);
            }
            if NEG::matches(h[i + 4] == *v) {
                return Some(i + 4);
            }
            if NEG::matches(h[i + 5] == *v) {
                return Some(i + 5);
            }
            if NEG::matches(h[i + 6] == *v) {
                return Some(i + 6);
            }
            if NEG::matches(h[i + 7] == *v) {
                return Some(i + 7);
            }
            i += SCALAR_UNROLL;
        }
        while i < len {
            if NEG::matches(h[i] == *v) {
                return Some(i);
            }
            i += 1;
        }
        None
    } else {
        // Nested scan, O(len * values.len()). Deliberately not vectorized
        // beyond five candidates; the bound is part of the contract.
        h.iter()
            .position(|x| NEG::matches(values.iter().any(|v| x == v)))
    }
}

/// Backward mirror of [`scalar_find_fwd`]; ties resolve toward the highest
/// index.
pub(crate) fn scalar_find_rev<T: PartialEq, NEG: ScanNegator>(
    h: &[T],
    values: &[T],
) -> Option<usize> {
    if let [v] = values {
        let mut i = h.len();
        while i >= SCALAR_UNROLL {
            if NEG::matches(h[i - 1] == *v) {
                return Some(i - 1);
            }
            if NEG::matches(h[i - 2] == *v) {
                return Some(i - 2);
            }
            if NEG::matches(h[i - 3] == *v) {
                return Some(i - 3);
            }
            if NEG::matches(h[i - 4] == *v) {
                return Some(i - 4);
            }
            if NEG::matches(h[i - 5] == *v) {
                return Some(i - 5);
            }
            if NEG::matches(h[i - 6] == *v) {
                return Some(i - 6);
            }
            if NEG::matches(h[i - 7] == *v) {
                return Some(i - 7);
            }
            if NEG::matches(h[i - 8] == *v) {
                return Some(i - 8);
            }
            i -= SCALAR_UNROLL;
        }
        while i > 0 {
            i -= 1;
            if NEG::matches(h[i] == *v) {
                return Some(i);
            }
        }
        None
    } else {
        h.iter()
            .rposition(|x| NEG::matches(values.iter().any(|v| x == v)))
    }
}

/// Two-sided scalar range scan, valid for any ordered element type.
pub(crate) fn scalar_find_in_range<T: Copy + Ord, NEG: ScanNegator>(
    h: &[T],
    lo: T,
    hi: T,
) -> Option<usize> {
    h.iter().position(|&x| NEG::matches(lo <= x && x <= hi))
}

// =============================================================================
// x86_64 KERNELS (SSE2 baseline + AVX2)
// =============================================================================

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86 {
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::*;

    use crate::negate::ScanNegator;

    // SSE2 has no 64-bit lane equality; compare the 32-bit halves and AND the
    // pairwise-swapped mask so a lane is all-ones only when both halves match.
    #[inline]
    #[target_feature(enable = "sse2")]
    pub(crate) unsafe fn cmpeq_epi64_sse2(a: __m128i, b: __m128i) -> __m128i {
        let m = _mm_cmpeq_epi32(a, b);
        _mm_and_si128(m, _mm_shuffle_epi32::<0b1011_0001>(m))
    }

    macro_rules! sse2_find_kernels {
        ($ty:ty, $width:expr, $set1:ident, $cast:ty, $cmpeq:ident, $fwd:ident, $rev:ident) => {
            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $fwd<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = 16 / $width;
                const ALL: u32 = 0xFFFF;
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [_mm_setzero_si128(); N];
                let mut k = 0;
                while k < N {
                    vv[k] = $set1(values[k] as $cast);
                    k += 1;
                }
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm_or_si128(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize / $width);
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm_loadu_si128(ptr.add(start) as *const __m128i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm_or_si128(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize / $width);
                    }
                }
                None
            }

            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $rev<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = 16 / $width;
                const ALL: u32 = 0xFFFF;
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [_mm_setzero_si128(); N];
                let mut k = 0;
                while k < N {
                    vv[k] = $set1(values[k] as $cast);
                    k += 1;
                }
                let mut i = len;
                while i >= LANES {
                    let start = i - LANES;
                    let chunk = _mm_loadu_si128(ptr.add(start) as *const __m128i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm_or_si128(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some(start + (31 - bits.leading_zeros()) as usize / $width);
                    }
                    i -= LANES;
                }
                if i > 0 {
                    // Overlapping head chunk; lanes past `i` were already
                    // proven non-matching above.
                    let chunk = _mm_loadu_si128(ptr as *const __m128i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm_or_si128(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some((31 - bits.leading_zeros()) as usize / $width);
                    }
                }
                None
            }
        };
    }

    sse2_find_kernels!(u8, 1, _mm_set1_epi8, i8, _mm_cmpeq_epi8, find_fwd_sse2_u8, find_rev_sse2_u8);
    sse2_find_kernels!(u16, 2, _mm_set1_epi16, i16, _mm_cmpeq_epi16, find_fwd_sse2_u16, find_rev_sse2_u16);
    sse2_find_kernels!(u32, 4, _mm_set1_epi32, i32, _mm_cmpeq_epi32, find_fwd_sse2_u32, find_rev_sse2_u32);
    sse2_find_kernels!(u64, 8, _mm_set1_epi64x, i64, cmpeq_epi64_sse2, find_fwd_sse2_u64, find_rev_sse2_u64);

    // Unsigned range membership via the wraparound trick: x is in [lo, hi]
    // iff (x - lo) <= (hi - lo) in unsigned arithmetic. SSE2 only has signed
    // lane compares, so both sides are sign-biased before the greater-than;
    // lanes where the biased difference exceeds the biased span are the
    // non-matches. No u64 variant: pcmpgtq is SSE4.2.
    macro_rules! sse2_range_kernel {
        ($ty:ty, $width:expr, $set1:ident, $cast:ty, $sub:ident, $cmpgt:ident, $sign:expr, $name:ident) => {
            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $name<NEG: ScanNegator>(
                h: &[$ty],
                lo: $ty,
                hi: $ty,
            ) -> Option<usize> {
                const LANES: usize = 16 / $width;
                const ALL: u32 = 0xFFFF;
                let len = h.len();
                debug_assert!(lo <= hi && len >= LANES);
                let ptr = h.as_ptr();
                let lo_v = $set1(lo as $cast);
                let sign_v = $set1($sign as $cast);
                let span_biased = $set1((hi.wrapping_sub(lo) ^ $sign) as $cast);
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
                    let d = $sub(chunk, lo_v);
                    let gt = $cmpgt(_mm_xor_si128(d, sign_v), span_biased);
                    let in_range = !(_mm_movemask_epi8(gt) as u32) & ALL;
                    let bits = NEG::mask32(in_range, ALL);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize / $width);
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm_loadu_si128(ptr.add(start) as *const __m128i);
                    let d = $sub(chunk, lo_v);
                    let gt = $cmpgt(_mm_xor_si128(d, sign_v), span_biased);
                    let in_range = !(_mm_movemask_epi8(gt) as u32) & ALL;
                    let bits = NEG::mask32(in_range, ALL);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize / $width);
                    }
                }
                None
            }
        };
    }

    sse2_range_kernel!(u8, 1, _mm_set1_epi8, i8, _mm_sub_epi8, _mm_cmpgt_epi8, 0x80u8, range_sse2_u8);
    sse2_range_kernel!(u16, 2, _mm_set1_epi16, i16, _mm_sub_epi16, _mm_cmpgt_epi16, 0x8000u16, range_sse2_u16);
    sse2_range_kernel!(u32, 4, _mm_set1_epi32, i32, _mm_sub_epi32, _mm_cmpgt_epi32, 0x8000_0000u32, range_sse2_u32);

    macro_rules! avx2_find_kernels {
        ($ty:ty, $width:expr, $set1:ident, $cast:ty, $cmpeq:ident, $fwd:ident, $rev:ident) => {
            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn $fwd<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = 32 / $width;
                const ALL: u32 = u32::MAX;
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [_mm256_setzero_si256(); N];
                let mut k = 0;
                while k < N {
                    vv[k] = $set1(values[k] as $cast);
                    k += 1;
                }
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm256_loadu_si256(ptr.add(i) as *const __m256i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm256_or_si256(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm256_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize / $width);
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm256_loadu_si256(ptr.add(start) as *const __m256i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm256_or_si256(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm256_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize / $width);
                    }
                }
                None
            }

            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn $rev<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = 32 / $width;
                const ALL: u32 = u32::MAX;
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [_mm256_setzero_si256(); N];
                let mut k = 0;
                while k < N {
                    vv[k] = $set1(values[k] as $cast);
                    k += 1;
                }
                let mut i = len;
                while i >= LANES {
                    let start = i - LANES;
                    let chunk = _mm256_loadu_si256(ptr.add(start) as *const __m256i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm256_or_si256(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm256_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some(start + (31 - bits.leading_zeros()) as usize / $width);
                    }
                    i -= LANES;
                }
                if i > 0 {
                    let chunk = _mm256_loadu_si256(ptr as *const __m256i);
                    let mut m = $cmpeq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = _mm256_or_si256(m, $cmpeq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask32(_mm256_movemask_epi8(m) as u32, ALL);
                    if bits != 0 {
                        return Some((31 - bits.leading_zeros()) as usize / $width);
                    }
                }
                None
            }
        };
    }

    avx2_find_kernels!(u8, 1, _mm256_set1_epi8, i8, _mm256_cmpeq_epi8, find_fwd_avx2_u8, find_rev_avx2_u8);
    avx2_find_kernels!(u16, 2, _mm256_set1_epi16, i16, _mm256_cmpeq_epi16, find_fwd_avx2_u16, find_rev_avx2_u16);
    avx2_find_kernels!(u32, 4, _mm256_set1_epi32, i32, _mm256_cmpeq_epi32, find_fwd_avx2_u32, find_rev_avx2_u32);
    avx2_find_kernels!(u64, 8, _mm256_set1_epi64x, i64, _mm256_cmpeq_epi64, find_fwd_avx2_u64, find_rev_avx2_u64);

    macro_rules! avx2_range_kernel {
        ($ty:ty, $width:expr, $set1:ident, $cast:ty, $sub:ident, $cmpgt:ident, $sign:expr, $name:ident) => {
            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn $name<NEG: ScanNegator>(
                h: &[$ty],
                lo: $ty,
                hi: $ty,
            ) -> Option<usize> {
                const LANES: usize = 32 / $width;
                const ALL: u32 = u32::MAX;
                let len = h.len();
                debug_assert!(lo <= hi && len >= LANES);
                let ptr = h.as_ptr();
                let lo_v = $set1(lo as $cast);
                let sign_v = $set1($sign as $cast);
                let span_biased = $set1((hi.wrapping_sub(lo) ^ $sign) as $cast);
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm256_loadu_si256(ptr.add(i) as *const __m256i);
                    let d = $sub(chunk, lo_v);
                    let gt = $cmpgt(_mm256_xor_si256(d, sign_v), span_biased);
                    let in_range = !(_mm256_movemask_epi8(gt) as u32);
                    let bits = NEG::mask32(in_range, ALL);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize / $width);
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm256_loadu_si256(ptr.add(start) as *const __m256i);
                    let d = $sub(chunk, lo_v);
                    let gt = $cmpgt(_mm256_xor_si256(d, sign_v), span_biased);
                    let in_range = !(_mm256_movemask_epi8(gt) as u32);
                    let bits = NEG::mask32(in_range, ALL);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize / $width);
                    }
                }
                None
            }
        };
    }

    avx2_range_kernel!(u8, 1, _mm256_set1_epi8, i8, _mm256_sub_epi8, _mm256_cmpgt_epi8, 0x80u8, range_avx2_u8);
    avx2_range_kernel!(u16, 2, _mm256_set1_epi16, i16, _mm256_sub_epi16, _mm256_cmpgt_epi16, 0x8000u16, range_avx2_u16);
    avx2_range_kernel!(u32, 4, _mm256_set1_epi32, i32, _mm256_sub_epi32, _mm256_cmpgt_epi32, 0x8000_0000u32, range_avx2_u32);
    avx2_range_kernel!(u64, 8, _mm256_set1_epi64x, i64, _mm256_sub_epi64, _mm256_cmpgt_epi64, 0x8000_0000_0000_0000u64, range_avx2_u64);
}

// =============================================================================
// AVX-512 KERNELS (feature `avx512`)
// =============================================================================

#[cfg(all(target_arch = "x86_64", feature = "avx512"))]
pub(crate) mod avx512 {
    use core::arch::x86_64::*;

    use crate::negate::ScanNegator;

    macro_rules! avx512_find_kernels {
        ($ty:ty, $lanes:expr, $set1:ident, $cast:ty, $cmpeq:ident, $cmple:ident, $sub:ident, $fwd:ident, $rev:ident, $range:ident) => {
            #[target_feature(enable = "avx512f,avx512bw")]
            pub(crate) unsafe fn $fwd<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = $lanes;
                const ALL: u64 = u64::MAX >> (64 - $lanes);
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [_mm512_setzero_si512(); N];
                let mut k = 0;
                while k < N {
                    vv[k] = $set1(values[k] as $cast);
                    k += 1;
                }
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm512_loadu_si512(ptr.add(i).cast());
                    let mut m = $cmpeq(chunk, vv[0]) as u64;
                    let mut k = 1;
                    while k < N {
                        m |= $cmpeq(chunk, vv[k]) as u64;
                        k += 1;
                    }
                    let bits = NEG::mask64(m, ALL);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize);
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm512_loadu_si512(ptr.add(start).cast());
                    let mut m = $cmpeq(chunk, vv[0]) as u64;
                    let mut k = 1;
                    while k < N {
                        m |= $cmpeq(chunk, vv[k]) as u64;
                        k += 1;
                    }
                    let bits = NEG::mask64(m, ALL);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize);
                    }
                }
                None
            }

            #[target_feature(enable = "avx512f,avx512bw")]
            pub(crate) unsafe fn $rev<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = $lanes;
                const ALL: u64 = u64::MAX >> (64 - $lanes);
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [_mm512_setzero_si512(); N];
                let mut k = 0;
                while k < N {
                    vv[k] = $set1(values[k] as $cast);
                    k += 1;
                }
                let mut i = len;
                while i >= LANES {
                    let start = i - LANES;
                    let chunk = _mm512_loadu_si512(ptr.add(start).cast());
                    let mut m = $cmpeq(chunk, vv[0]) as u64;
                    let mut k = 1;
                    while k < N {
                        m |= $cmpeq(chunk, vv[k]) as u64;
                        k += 1;
                    }
                    let bits = NEG::mask64(m, ALL);
                    if bits != 0 {
                        return Some(start + (63 - bits.leading_zeros()) as usize);
                    }
                    i -= LANES;
                }
                if i > 0 {
                    let chunk = _mm512_loadu_si512(ptr.cast());
                    let mut m = $cmpeq(chunk, vv[0]) as u64;
                    let mut k = 1;
                    while k < N {
                        m |= $cmpeq(chunk, vv[k]) as u64;
                        k += 1;
                    }
                    let bits = NEG::mask64(m, ALL);
                    if bits != 0 {
                        return Some((63 - bits.leading_zeros()) as usize);
                    }
                }
                None
            }

            #[target_feature(enable = "avx512f,avx512bw")]
            pub(crate) unsafe fn $range<NEG: ScanNegator>(
                h: &[$ty],
                lo: $ty,
                hi: $ty,
            ) -> Option<usize> {
                const LANES: usize = $lanes;
                const ALL: u64 = u64::MAX >> (64 - $lanes);
                let len = h.len();
                debug_assert!(lo <= hi && len >= LANES);
                let ptr = h.as_ptr();
                let lo_v = $set1(lo as $cast);
                let span_v = $set1(hi.wrapping_sub(lo) as $cast);
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm512_loadu_si512(ptr.add(i).cast());
                    let m = $cmple($sub(chunk, lo_v), span_v) as u64;
                    let bits = NEG::mask64(m, ALL);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize);
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm512_loadu_si512(ptr.add(start).cast());
                    let m = $cmple($sub(chunk, lo_v), span_v) as u64;
                    let bits = NEG::mask64(m, ALL);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize);
                    }
                }
                None
            }
        };
    }

    avx512_find_kernels!(u8, 64, _mm512_set1_epi8, i8, _mm512_cmpeq_epu8_mask, _mm512_cmple_epu8_mask, _mm512_sub_epi8, find_fwd_avx512_u8, find_rev_avx512_u8, range_avx512_u8);
    avx512_find_kernels!(u16, 32, _mm512_set1_epi16, i16, _mm512_cmpeq_epu16_mask, _mm512_cmple_epu16_mask, _mm512_sub_epi16, find_fwd_avx512_u16, find_rev_avx512_u16, range_avx512_u16);
    avx512_find_kernels!(u32, 16, _mm512_set1_epi32, i32, _mm512_cmpeq_epu32_mask, _mm512_cmple_epu32_mask, _mm512_sub_epi32, find_fwd_avx512_u32, find_rev_avx512_u32, range_avx512_u32);
    avx512_find_kernels!(u64, 8, _mm512_set1_epi64, i64, _mm512_cmpeq_epu64_mask, _mm512_cmple_epu64_mask, _mm512_sub_epi64, find_fwd_avx512_u64, find_rev_avx512_u64, range_avx512_u64);
}

// =============================================================================
// NEON KERNELS (aarch64)
// =============================================================================

#[cfg(target_arch = "aarch64")]
pub(crate) mod neon {
    use core::arch::aarch64::*;

    use crate::negate::ScanNegator;

    /// Reduce a byte-lane mask to a 64-bit value with four bits per byte.
    ///
    /// NEON has no movemask; the narrowing right-shift packs each byte's high
    /// nibble instead, so a matching byte contributes four set bits. Bit
    /// scans divide by four (and by the element width in bytes) to recover
    /// the element index.
    #[inline]
    #[target_feature(enable = "neon")]
    pub(crate) unsafe fn movemask_nibbles(m: uint8x16_t) -> u64 {
        let n = vshrn_n_u16::<4>(vreinterpretq_u16_u8(m));
        vget_lane_u64::<0>(vreinterpret_u64_u8(n))
    }

    #[inline(always)]
    pub(crate) unsafe fn reint_u8(m: uint8x16_t) -> uint8x16_t {
        m
    }

    macro_rules! neon_find_kernels {
        ($ty:ty, $width:expr, $ld:ident, $dup:ident, $ceq:ident, $orr:ident, $reint:ident, $fwd:ident, $rev:ident) => {
            #[target_feature(enable = "neon")]
            pub(crate) unsafe fn $fwd<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = 16 / $width;
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [$dup(values[0]); N];
                let mut k = 1;
                while k < N {
                    vv[k] = $dup(values[k]);
                    k += 1;
                }
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = $ld(ptr.add(i));
                    let mut m = $ceq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = $orr(m, $ceq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask64(movemask_nibbles($reint(m)), u64::MAX);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize / (4 * $width));
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = $ld(ptr.add(start));
                    let mut m = $ceq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = $orr(m, $ceq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask64(movemask_nibbles($reint(m)), u64::MAX);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize / (4 * $width));
                    }
                }
                None
            }

            #[target_feature(enable = "neon")]
            pub(crate) unsafe fn $rev<const N: usize, NEG: ScanNegator>(
                h: &[$ty],
                values: &[$ty; N],
            ) -> Option<usize> {
                const LANES: usize = 16 / $width;
                let len = h.len();
                debug_assert!(N >= 1 && len >= LANES);
                let ptr = h.as_ptr();
                let mut vv = [$dup(values[0]); N];
                let mut k = 1;
                while k < N {
                    vv[k] = $dup(values[k]);
                    k += 1;
                }
                let mut i = len;
                while i >= LANES {
                    let start = i - LANES;
                    let chunk = $ld(ptr.add(start));
                    let mut m = $ceq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = $orr(m, $ceq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask64(movemask_nibbles($reint(m)), u64::MAX);
                    if bits != 0 {
                        return Some(start + (63 - bits.leading_zeros()) as usize / (4 * $width));
                    }
                    i -= LANES;
                }
                if i > 0 {
                    let chunk = $ld(ptr);
                    let mut m = $ceq(chunk, vv[0]);
                    let mut k = 1;
                    while k < N {
                        m = $orr(m, $ceq(chunk, vv[k]));
                        k += 1;
                    }
                    let bits = NEG::mask64(movemask_nibbles($reint(m)), u64::MAX);
                    if bits != 0 {
                        return Some((63 - bits.leading_zeros()) as usize / (4 * $width));
                    }
                }
                None
            }
        };
    }

    neon_find_kernels!(u8, 1, vld1q_u8, vdupq_n_u8, vceqq_u8, vorrq_u8, reint_u8, find_fwd_neon_u8, find_rev_neon_u8);
    neon_find_kernels!(u16, 2, vld1q_u16, vdupq_n_u16, vceqq_u16, vorrq_u16, vreinterpretq_u8_u16, find_fwd_neon_u16, find_rev_neon_u16);
    neon_find_kernels!(u32, 4, vld1q_u32, vdupq_n_u32, vceqq_u32, vorrq_u32, vreinterpretq_u8_u32, find_fwd_neon_u32, find_rev_neon_u32);
    neon_find_kernels!(u64, 8, vld1q_u64, vdupq_n_u64, vceqq_u64, vorrq_u64, vreinterpretq_u8_u64, find_fwd_neon_u64, find_rev_neon_u64);

    macro_rules! neon_range_kernel {
        ($ty:ty, $width:expr, $ld:ident, $dup:ident, $sub:ident, $cle:ident, $reint:ident, $name:ident) => {
            #[target_feature(enable = "neon")]
            pub(crate) unsafe fn $name<NEG: ScanNegator>(
                h: &[$ty],
                lo: $ty,
                hi: $ty,
            ) -> Option<usize> {
                const LANES: usize = 16 / $width;
                let len = h.len();
                debug_assert!(lo <= hi && len >= LANES);
                let ptr = h.as_ptr();
                let lo_v = $dup(lo);
                let span_v = $dup(hi.wrapping_sub(lo));
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = $ld(ptr.add(i));
                    let m = $cle($sub(chunk, lo_v), span_v);
                    let bits = NEG::mask64(movemask_nibbles($reint(m)), u64::MAX);
                    if bits != 0 {
                        return Some(i + bits.trailing_zeros() as usize / (4 * $width));
                    }
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = $ld(ptr.add(start));
                    let m = $cle($sub(chunk, lo_v), span_v);
                    let bits = NEG::mask64(movemask_nibbles($reint(m)), u64::MAX);
                    if bits != 0 {
                        return Some(start + bits.trailing_zeros() as usize / (4 * $width));
                    }
                }
                None
            }
        };
    }

    neon_range_kernel!(u8, 1, vld1q_u8, vdupq_n_u8, vsubq_u8, vcleq_u8, reint_u8, range_neon_u8);
    neon_range_kernel!(u16, 2, vld1q_u16, vdupq_n_u16, vsubq_u16, vcleq_u16, vreinterpretq_u8_u16, range_neon_u16);
    neon_range_kernel!(u32, 4, vld1q_u32, vdupq_n_u32, vsubq_u32, vcleq_u32, vreinterpretq_u8_u32, range_neon_u32);
    neon_range_kernel!(u64, 8, vld1q_u64, vdupq_n_u64, vsubq_u64, vcleq_u64, vreinterpretq_u8_u64, range_neon_u64);
}

// =============================================================================
// PER-WIDTH DISPATCH
// =============================================================================

// Manual threshold-based dispatch per width, widest tier first. Each tier is
// only entered when the buffer holds at least one full register so the
// overlapping tail load stays in bounds.

impl FindWord for u8 {
    fn find_fwd<const N: usize, NEG: ScanNegator>(
        h: &[u8],
        values: &[u8; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U8) {
            return unsafe { avx512::find_fwd_avx512_u8::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U8) {
                return unsafe { x86::find_fwd_avx2_u8::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U8) {
                return unsafe { x86::find_fwd_sse2_u8::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U8) {
            return unsafe { neon::find_fwd_neon_u8::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_fwd::<u8, NEG>(h, values)
    }

    fn find_rev<const N: usize, NEG: ScanNegator>(
        h: &[u8],
        values: &[u8; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U8) {
            return unsafe { avx512::find_rev_avx512_u8::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U8) {
                return unsafe { x86::find_rev_avx2_u8::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U8) {
                return unsafe { x86::find_rev_sse2_u8::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U8) {
            return unsafe { neon::find_rev_neon_u8::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_rev::<u8, NEG>(h, values)
    }

    fn find_in_range<NEG: ScanNegator>(
        h: &[u8],
        lo: u8,
        hi: u8,
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U8) {
            return unsafe { avx512::range_avx512_u8::<NEG>(h, lo, hi) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U8) {
                return unsafe { x86::range_avx2_u8::<NEG>(h, lo, hi) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U8) {
                return unsafe { x86::range_sse2_u8::<NEG>(h, lo, hi) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U8) {
            return unsafe { neon::range_neon_u8::<NEG>(h, lo, hi) };
        }
        let _ = (caps, len);
        scalar_find_in_range::<u8, NEG>(h, lo, hi)
    }
}

impl FindWord for u16 {
    fn find_fwd<const N: usize, NEG: ScanNegator>(
        h: &[u16],
        values: &[u16; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U16) {
            return unsafe { avx512::find_fwd_avx512_u16::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U16) {
                return unsafe { x86::find_fwd_avx2_u16::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U16) {
                return unsafe { x86::find_fwd_sse2_u16::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U16) {
            return unsafe { neon::find_fwd_neon_u16::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_fwd::<u16, NEG>(h, values)
    }

    fn find_rev<const N: usize, NEG: ScanNegator>(
        h: &[u16],
        values: &[u16; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U16) {
            return unsafe { avx512::find_rev_avx512_u16::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U16) {
                return unsafe { x86::find_rev_avx2_u16::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U16) {
                return unsafe { x86::find_rev_sse2_u16::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U16) {
            return unsafe { neon::find_rev_neon_u16::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_rev::<u16, NEG>(h, values)
    }

    fn find_in_range<NEG: ScanNegator>(
        h: &[u16],
        lo: u16,
        hi: u16,
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U16) {
            return unsafe { avx512::range_avx512_u16::<NEG>(h, lo, hi) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U16) {
                return unsafe { x86::range_avx2_u16::<NEG>(h, lo, hi) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U16) {
                return unsafe { x86::range_sse2_u16::<NEG>(h, lo, hi) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U16) {
            return unsafe { neon::range_neon_u16::<NEG>(h, lo, hi) };
        }
        let _ = (caps, len);
        scalar_find_in_range::<u16, NEG>(h, lo, hi)
    }
}

impl FindWord for u32 {
    fn find_fwd<const N: usize, NEG: ScanNegator>(
        h: &[u32],
        values: &[u32; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U32) {
            return unsafe { avx512::find_fwd_avx512_u32::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U32) {
                return unsafe { x86::find_fwd_avx2_u32::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U32) {
                return unsafe { x86::find_fwd_sse2_u32::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U32) {
            return unsafe { neon::find_fwd_neon_u32::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_fwd::<u32, NEG>(h, values)
    }

    fn find_rev<const N: usize, NEG: ScanNegator>(
        h: &[u32],
        values: &[u32; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U32) {
            return unsafe { avx512::find_rev_avx512_u32::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U32) {
                return unsafe { x86::find_rev_avx2_u32::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U32) {
                return unsafe { x86::find_rev_sse2_u32::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U32) {
            return unsafe { neon::find_rev_neon_u32::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_rev::<u32, NEG>(h, values)
    }

    fn find_in_range<NEG: ScanNegator>(
        h: &[u32],
        lo: u32,
        hi: u32,
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U32) {
            return unsafe { avx512::range_avx512_u32::<NEG>(h, lo, hi) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U32) {
                return unsafe { x86::range_avx2_u32::<NEG>(h, lo, hi) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U32) {
                return unsafe { x86::range_sse2_u32::<NEG>(h, lo, hi) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U32) {
            return unsafe { neon::range_neon_u32::<NEG>(h, lo, hi) };
        }
        let _ = (caps, len);
        scalar_find_in_range::<u32, NEG>(h, lo, hi)
    }
}

impl FindWord for u64 {
    fn find_fwd<const N: usize, NEG: ScanNegator>(
        h: &[u64],
        values: &[u64; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U64) {
            return unsafe { avx512::find_fwd_avx512_u64::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U64) {
                return unsafe { x86::find_fwd_avx2_u64::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U64) {
                return unsafe { x86::find_fwd_sse2_u64::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U64) {
            return unsafe { neon::find_fwd_neon_u64::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_fwd::<u64, NEG>(h, values)
    }

    fn find_rev<const N: usize, NEG: ScanNegator>(
        h: &[u64],
        values: &[u64; N],
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U64) {
            return unsafe { avx512::find_rev_avx512_u64::<N, NEG>(h, values) };
        }
        #[cfg(target_arch = "x86_64")]
        {
            if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U64) {
                return unsafe { x86::find_rev_avx2_u64::<N, NEG>(h, values) };
            }
            if caps.has_sse2 && len >= simd_cutover(LANES_SSE2_U64) {
                return unsafe { x86::find_rev_sse2_u64::<N, NEG>(h, values) };
            }
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U64) {
            return unsafe { neon::find_rev_neon_u64::<N, NEG>(h, values) };
        }
        let _ = (caps, len);
        scalar_find_rev::<u64, NEG>(h, values)
    }

    fn find_in_range<NEG: ScanNegator>(
        h: &[u64],
        lo: u64,
        hi: u64,
        caps: &HardwareCapabilities,
    ) -> Option<usize> {
        let len = h.len();
        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        if caps.has_avx512 && len >= simd_cutover(LANES_AVX512_U64) {
            return unsafe { avx512::range_avx512_u64::<NEG>(h, lo, hi) };
        }
        // No SSE2 tier here: 64-bit lane greater-than needs SSE4.2.
        #[cfg(target_arch = "x86_64")]
        if caps.has_avx2 && len >= simd_cutover(LANES_AVX2_U64) {
            return unsafe { x86::range_avx2_u64::<NEG>(h, lo, hi) };
        }
        #[cfg(target_arch = "aarch64")]
        if caps.has_neon && len >= simd_cutover(LANES_NEON_U64) {
            return unsafe { neon::range_neon_u64::<NEG>(h, lo, hi) };
        }
        let _ = (caps, len);
        scalar_find_in_range::<u64, NEG>(h, lo, hi)
    }
}
