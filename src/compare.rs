// SPDX-License-Identifier: Apache-2.0

//! Bitwise equality and first-mismatch scans.
//!
//! Everything here works on raw bytes: for bitwise-equatable element types,
//! element equality is byte equality, and the chunk sizes (16/32 bytes) are
//! multiples of every element width, so the first differing byte always
//! lands inside the first differing element. Three-way comparison uses the
//! mismatch scan to skip the equal prefix, then resolves the order of the
//! single differing element with the element type's own comparison.

use crate::dispatch::HardwareCapabilities;

/// Bitwise equality of two equal-length byte runs.
///
/// Short lengths use word-sized and sub-word overlapping loads (two reads
/// that together cover the run) instead of a byte loop.
pub(crate) fn eq_bytes(a: &[u8], b: &[u8], caps: &HardwareCapabilities) -> bool {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    if n < 2 {
        return n == 0 || a[0] == b[0];
    }
    unsafe {
        let pa = a.as_ptr();
        let pb = b.as_ptr();
        if n <= 4 {
            return read_u16(pa) == read_u16(pb)
                && read_u16(pa.add(n - 2)) == read_u16(pb.add(n - 2));
        }
        if n <= 8 {
            return read_u32(pa) == read_u32(pb)
                && read_u32(pa.add(n - 4)) == read_u32(pb.add(n - 4));
        }
        if n <= 16 {
            return read_u64(pa) == read_u64(pb)
                && read_u64(pa.add(n - 8)) == read_u64(pb.add(n - 8));
        }
    }
    first_mismatch(a, b, caps).is_none()
}

/// Lowest index at which two equal-length byte runs differ.
pub(crate) fn first_mismatch(a: &[u8], b: &[u8], caps: &HardwareCapabilities) -> Option<usize> {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
    if caps.has_avx512 && n >= crate::constants::simd_cutover(64) {
        return unsafe { avx512::mismatch_avx512(a, b) };
    }
    #[cfg(target_arch = "x86_64")]
    {
        if caps.has_avx2 && n >= crate::constants::simd_cutover(32) {
            return unsafe { x86::mismatch_avx2(a, b) };
        }
        if caps.has_sse2 && n >= crate::constants::simd_cutover(16) {
            return unsafe { x86::mismatch_sse2(a, b) };
        }
    }
    #[cfg(target_arch = "aarch64")]
    if caps.has_neon && n >= crate::constants::simd_cutover(16) {
        return unsafe { neon::mismatch_neon(a, b) };
    }
    let _ = (caps, n);
    a.iter().zip(b.iter()).position(|(x, y)| x != y)
}

#[inline(always)]
unsafe fn read_u16(p: *const u8) -> u16 {
    (p as *const u16).read_unaligned()
}

#[inline(always)]
unsafe fn read_u32(p: *const u8) -> u32 {
    (p as *const u32).read_unaligned()
}

#[inline(always)]
unsafe fn read_u64(p: *const u8) -> u64 {
    (p as *const u64).read_unaligned()
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use core::arch::x86_64::*;

    #[target_feature(enable = "sse2")]
    pub(super) unsafe fn mismatch_sse2(a: &[u8], b: &[u8]) -> Option<usize> {
        const LANES: usize = 16;
        const ALL: u32 = 0xFFFF;
        let n = a.len();
        debug_assert!(n >= LANES);
        let pa = a.as_ptr();
        let pb = b.as_ptr();
        let mut i = 0;
        while i + LANES <= n {
            let ca = _mm_loadu_si128(pa.add(i) as *const __m128i);
            let cb = _mm_loadu_si128(pb.add(i) as *const __m128i);
            let bits = _mm_movemask_epi8(_mm_cmpeq_epi8(ca, cb)) as u32;
            if bits != ALL {
                return Some(i + (!bits & ALL).trailing_zeros() as usize);
            }
            i += LANES;
        }
        if i < n {
            let start = n - LANES;
            let ca = _mm_loadu_si128(pa.add(start) as *const __m128i);
            let cb = _mm_loadu_si128(pb.add(start) as *const __m128i);
            let bits = _mm_movemask_epi8(_mm_cmpeq_epi8(ca, cb)) as u32;
            if bits != ALL {
                return Some(start + (!bits & ALL).trailing_zeros() as usize);
            }
        }
        None
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn mismatch_avx2(a: &[u8], b: &[u8]) -> Option<usize> {
        const LANES: usize = 32;
        const ALL: u32 = u32::MAX;
        let n = a.len();
        debug_assert!(n >= LANES);
        let pa = a.as_ptr();
        let pb = b.as_ptr();
        let mut i = 0;
        while i + LANES <= n {
            let ca = _mm256_loadu_si256(pa.add(i) as *const __m256i);
            let cb = _mm256_loadu_si256(pb.add(i) as *const __m256i);
            let bits = _mm256_movemask_epi8(_mm256_cmpeq_epi8(ca, cb)) as u32;
            if bits != ALL {
                return Some(i + (!bits).trailing_zeros() as usize);
            }
            i += LANES;
        }
        if i < n {
            let start = n - LANES;
            let ca = _mm256_loadu_si256(pa.add(start) as *const __m256i);
            let cb = _mm256_loadu_si256(pb.add(start) as *const __m256i);
            let bits = _mm256_movemask_epi8(_mm256_cmpeq_epi8(ca, cb)) as u32;
            if bits != ALL {
                return Some(start + (!bits).trailing_zeros() as usize);
            }
        }
        None
    }
}

#[cfg(all(target_arch = "x86_64", feature = "avx512"))]
mod avx512 {
    use core::arch::x86_64::*;

    #[target_feature(enable = "avx512f,avx512bw")]
    pub(super) unsafe fn mismatch_avx512(a: &[u8], b: &[u8]) -> Option<usize> {
        const LANES: usize = 64;
        let n = a.len();
        debug_assert!(n >= LANES);
        let pa = a.as_ptr();
        let pb = b.as_ptr();
        let mut i = 0;
        while i + LANES <= n {
            let ca = _mm512_loadu_si512(pa.add(i).cast());
            let cb = _mm512_loadu_si512(pb.add(i).cast());
            let ne = _mm512_cmpneq_epu8_mask(ca, cb);
            if ne != 0 {
                return Some(i + ne.trailing_zeros() as usize);
            }
            i += LANES;
        }
        if i < n {
            let start = n - LANES;
            let ca = _mm512_loadu_si512(pa.add(start).cast());
            let cb = _mm512_loadu_si512(pb.add(start).cast());
            let ne = _mm512_cmpneq_epu8_mask(ca, cb);
            if ne != 0 {
                return Some(start + ne.trailing_zeros() as usize);
            }
        }
        None
    }
}

#[cfg(target_arch = "aarch64")]
mod neon {
    use core::arch::aarch64::*;

    use crate::search::neon::movemask_nibbles;

    #[target_feature(enable = "neon")]
    pub(super) unsafe fn mismatch_neon(a: &[u8], b: &[u8]) -> Option<usize> {
        const LANES: usize = 16;
        let n = a.len();
        debug_assert!(n >= LANES);
        let pa = a.as_ptr();
        let pb = b.as_ptr();
        let mut i = 0;
        while i + LANES <= n {
            let ca = vld1q_u8(pa.add(i));
            let cb = vld1q_u8(pb.add(i));
            let ne = !movemask_nibbles(vceqq_u8(ca, cb));
            if ne != 0 {
                return Some(i + ne.trailing_zeros() as usize / 4);
            }
            i += LANES;
        }
        if i < n {
            let start = n - LANES;
            let ca = vld1q_u8(pa.add(start));
            let cb = vld1q_u8(pb.add(start));
            let ne = !movemask_nibbles(vceqq_u8(ca, cb));
            if ne != 0 {
                return Some(start + ne.trailing_zeros() as usize / 4);
            }
        }
        None
    }
}
