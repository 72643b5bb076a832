// SPDX-License-Identifier: Apache-2.0

//! Bulk operations: fill, conditional replace, in-place reverse, and
//! occurrence count.
//!
//! The stores in fill and replace use the same overlapping-tail technique as
//! the search kernels; that is only sound because both operations are
//! idempotent, so rewriting a few already-processed elements cannot change
//! the result. Count cannot rely on idempotence, so its final overlapping
//! chunk shifts the already-counted lanes out of the mask before the
//! population count. Reverse converges from both ends instead and leaves the
//! middle remainder to a scalar two-pointer swap.

use crate::constants::*;
use crate::dispatch::HardwareCapabilities;

/// Per-width dispatch seam for the bulk kernels.
pub trait BulkWord: Copy + PartialEq + Sized + 'static {
    fn fill(buf: &mut [Self], v: Self, caps: &HardwareCapabilities);

    /// Copy `len` elements from `src` to `dst`, substituting `new` for every
    /// element equal to `old`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for `len` reads and `dst` for `len` writes. The
    /// two regions may alias completely (in-place replace) but not
    /// partially.
    unsafe fn replace(
        src: *const Self,
        dst: *mut Self,
        len: usize,
        old: Self,
        new: Self,
        caps: &HardwareCapabilities,
    );

    fn reverse(buf: &mut [Self], caps: &HardwareCapabilities);

    fn count_eq(h: &[Self], v: Self, caps: &HardwareCapabilities) -> usize;
}

// =============================================================================
// SCALAR FALLBACKS
// =============================================================================

/// 8/4/2/1-unrolled scalar store loop, usable for any cloneable element.
pub(crate) fn scalar_fill<T: Clone>(buf: &mut [T], v: T) {
    let len = buf.len();
    let mut i = 0;
    while i + 8 <= len {
        buf[i] = v.clone();
        buf[i + 1] = v.clone();
        buf[i + 2] = v.clone();
        buf[i + 3] = v.clone();
        buf[i + 4] = v.clone();
        buf[i + 5] = v.clone();
        buf[i + 6] = v.clone();
        buf[i + 7] = v.clone();
        i += 8;
    }
    if i + 4 <= len {
        buf[i] = v.clone();
        buf[i + 1] = v.clone();
        buf[i + 2] = v.clone();
        buf[i + 3] = v.clone();
        i += 4;
    }
    if i + 2 <= len {
        buf[i] = v.clone();
        buf[i + 1] = v.clone();
        i += 2;
    }
    if i < len {
        buf[i] = v;
    }
}

pub(crate) unsafe fn scalar_replace<T: Copy + PartialEq>(
    src: *const T,
    dst: *mut T,
    len: usize,
    old: T,
    new: T,
) {
    for i in 0..len {
        let x = src.add(i).read();
        dst.add(i).write(if x == old { new } else { x });
    }
}

/// Two-pointer swap; correct for any element type and any length.
pub(crate) fn scalar_reverse<T>(buf: &mut [T]) {
    let mut l = 0;
    let mut r = buf.len();
    while r - l >= 2 {
        r -= 1;
        buf.swap(l, r);
        l += 1;
    }
}

pub(crate) fn scalar_count<T: PartialEq>(h: &[T], v: &T) -> usize {
    h.iter().filter(|x| *x == v).count()
}

// =============================================================================
// x86_64 KERNELS (SSE2 baseline + AVX2)
// =============================================================================

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86 {
    use core::arch::x86_64::*;

    use crate::search::x86::cmpeq_epi64_sse2;

    macro_rules! sse2_bulk_kernels {
        ($ty:ty, $width:expr, $set1:ident, $cast:ty, $cmpeq:ident, $fill:ident, $replace:ident, $count:ident) => {
            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $fill(buf: &mut [$ty], v: $ty) {
                const LANES: usize = 16 / $width;
                let len = buf.len();
                debug_assert!(len >= LANES);
                let ptr = buf.as_mut_ptr();
                let vv = $set1(v as $cast);
                let mut i = 0;
                while i + 2 * LANES <= len {
                    _mm_storeu_si128(ptr.add(i) as *mut __m128i, vv);
                    _mm_storeu_si128(ptr.add(i + LANES) as *mut __m128i, vv);
                    i += 2 * LANES;
                }
                if i + LANES <= len {
                    _mm_storeu_si128(ptr.add(i) as *mut __m128i, vv);
                    i += LANES;
                }
                if i < len {
                    _mm_storeu_si128(ptr.add(len - LANES) as *mut __m128i, vv);
                }
            }

            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $replace(
                src: *const $ty,
                dst: *mut $ty,
                len: usize,
                old: $ty,
                new: $ty,
            ) {
                const LANES: usize = 16 / $width;
                debug_assert!(len >= LANES);
                let old_v = $set1(old as $cast);
                let new_v = $set1(new as $cast);
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm_loadu_si128(src.add(i) as *const __m128i);
                    let m = $cmpeq(chunk, old_v);
                    let r = _mm_or_si128(_mm_and_si128(m, new_v), _mm_andnot_si128(m, chunk));
                    _mm_storeu_si128(dst.add(i) as *mut __m128i, r);
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm_loadu_si128(src.add(start) as *const __m128i);
                    let m = $cmpeq(chunk, old_v);
                    let r = _mm_or_si128(_mm_and_si128(m, new_v), _mm_andnot_si128(m, chunk));
                    _mm_storeu_si128(dst.add(start) as *mut __m128i, r);
                }
            }

            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $count(h: &[$ty], v: $ty) -> usize {
                const LANES: usize = 16 / $width;
                let len = h.len();
                debug_assert!(len >= LANES);
                let ptr = h.as_ptr();
                let vv = $set1(v as $cast);
                let mut total = 0usize;
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
                    let bits = _mm_movemask_epi8($cmpeq(chunk, vv)) as u32;
                    total += bits.count_ones() as usize / $width;
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm_loadu_si128(ptr.add(start) as *const __m128i);
                    let mut bits = _mm_movemask_epi8($cmpeq(chunk, vv)) as u32;
                    // Drop the lanes the full chunks already counted.
                    bits >>= (i - start) * $width;
                    total += bits.count_ones() as usize / $width;
                }
                total
            }
        };
    }

    sse2_bulk_kernels!(u8, 1, _mm_set1_epi8, i8, _mm_cmpeq_epi8, fill_sse2_u8, replace_sse2_u8, count_sse2_u8);
    sse2_bulk_kernels!(u16, 2, _mm_set1_epi16, i16, _mm_cmpeq_epi16, fill_sse2_u16, replace_sse2_u16, count_sse2_u16);
    sse2_bulk_kernels!(u32, 4, _mm_set1_epi32, i32, _mm_cmpeq_epi32, fill_sse2_u32, replace_sse2_u32, count_sse2_u32);
    sse2_bulk_kernels!(u64, 8, _mm_set1_epi64x, i64, cmpeq_epi64_sse2, fill_sse2_u64, replace_sse2_u64, count_sse2_u64);

    macro_rules! avx2_bulk_kernels {
        ($ty:ty, $width:expr, $set1:ident, $cast:ty, $cmpeq:ident, $fill:ident, $replace:ident, $count:ident) => {
            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn $fill(buf: &mut [$ty], v: $ty) {
                const LANES: usize = 32 / $width;
                let len = buf.len();
                debug_assert!(len >= LANES);
                let ptr = buf.as_mut_ptr();
                let vv = $set1(v as $cast);
                let mut i = 0;
                while i + 2 * LANES <= len {
                    _mm256_storeu_si256(ptr.add(i) as *mut __m256i, vv);
                    _mm256_storeu_si256(ptr.add(i + LANES) as *mut __m256i, vv);
                    i += 2 * LANES;
                }
                if i + LANES <= len {
                    _mm256_storeu_si256(ptr.add(i) as *mut __m256i, vv);
                    i += LANES;
                }
                if i < len {
                    _mm256_storeu_si256(ptr.add(len - LANES) as *mut __m256i, vv);
                }
            }

            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn $replace(
                src: *const $ty,
                dst: *mut $ty,
                len: usize,
                old: $ty,
                new: $ty,
            ) {
                const LANES: usize = 32 / $width;
                debug_assert!(len >= LANES);
                let old_v = $set1(old as $cast);
                let new_v = $set1(new as $cast);
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm256_loadu_si256(src.add(i) as *const __m256i);
                    let m = $cmpeq(chunk, old_v);
                    let r = _mm256_blendv_epi8(chunk, new_v, m);
                    _mm256_storeu_si256(dst.add(i) as *mut __m256i, r);
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm256_loadu_si256(src.add(start) as *const __m256i);
                    let m = $cmpeq(chunk, old_v);
                    let r = _mm256_blendv_epi8(chunk, new_v, m);
                    _mm256_storeu_si256(dst.add(start) as *mut __m256i, r);
                }
            }

            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn $count(h: &[$ty], v: $ty) -> usize {
                const LANES: usize = 32 / $width;
                let len = h.len();
                debug_assert!(len >= LANES);
                let ptr = h.as_ptr();
                let vv = $set1(v as $cast);
                let mut total = 0usize;
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm256_loadu_si256(ptr.add(i) as *const __m256i);
                    let bits = _mm256_movemask_epi8($cmpeq(chunk, vv)) as u32;
                    total += bits.count_ones() as usize / $width;
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm256_loadu_si256(ptr.add(start) as *const __m256i);
                    let mut bits = _mm256_movemask_epi8($cmpeq(chunk, vv)) as u32;
                    bits >>= (i - start) * $width;
                    total += bits.count_ones() as usize / $width;
                }
                total
            }
        };
    }

    avx2_bulk_kernels!(u8, 1, _mm256_set1_epi8, i8, _mm256_cmpeq_epi8, fill_avx2_u8, replace_avx2_u8, count_avx2_u8);
    avx2_bulk_kernels!(u16, 2, _mm256_set1_epi16, i16, _mm256_cmpeq_epi16, fill_avx2_u16, replace_avx2_u16, count_avx2_u16);
    avx2_bulk_kernels!(u32, 4, _mm256_set1_epi32, i32, _mm256_cmpeq_epi32, fill_avx2_u32, replace_avx2_u32, count_avx2_u32);
    avx2_bulk_kernels!(u64, 8, _mm256_set1_epi64x, i64, _mm256_cmpeq_epi64, fill_avx2_u64, replace_avx2_u64, count_avx2_u64);

    // Lane-reversal helpers. Byte and word reversal shuffle within each
    // 128-bit half, then the halves swap; dword/qword reversal is a single
    // cross-lane permute.

    #[target_feature(enable = "avx2")]
    unsafe fn revvec_avx2_u8(v: __m256i) -> __m256i {
        let idx = _mm256_setr_epi8(
            15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 15, 14, 13, 12, 11, 10, 9, 8, 7,
            6, 5, 4, 3, 2, 1, 0,
        );
        let s = _mm256_shuffle_epi8(v, idx);
        _mm256_permute2x128_si256::<0x01>(s, s)
    }

    #[target_feature(enable = "avx2")]
    unsafe fn revvec_avx2_u16(v: __m256i) -> __m256i {
        let idx = _mm256_setr_epi8(
            14, 15, 12, 13, 10, 11, 8, 9, 6, 7, 4, 5, 2, 3, 0, 1, 14, 15, 12, 13, 10, 11, 8, 9, 6,
            7, 4, 5, 2, 3, 0, 1,
        );
        let s = _mm256_shuffle_epi8(v, idx);
        _mm256_permute2x128_si256::<0x01>(s, s)
    }

    #[target_feature(enable = "avx2")]
    unsafe fn revvec_avx2_u32(v: __m256i) -> __m256i {
        let idx = _mm256_setr_epi32(7, 6, 5, 4, 3, 2, 1, 0);
        _mm256_permutevar8x32_epi32(v, idx)
    }

    #[target_feature(enable = "avx2")]
    unsafe fn revvec_avx2_u64(v: __m256i) -> __m256i {
        _mm256_permute4x64_epi64::<0x1B>(v)
    }

    macro_rules! avx2_reverse_kernel {
        ($ty:ty, $width:expr, $rv:ident, $name:ident) => {
            #[target_feature(enable = "avx2")]
            pub(crate) unsafe fn $name(buf: &mut [$ty]) {
                const LANES: usize = 32 / $width;
                let len = buf.len();
                debug_assert!(len >= 2 * LANES);
                let ptr = buf.as_mut_ptr();
                let mut lo = 0;
                let mut hi = len;
                while hi - lo >= 2 * LANES {
                    let a = _mm256_loadu_si256(ptr.add(lo) as *const __m256i);
                    let b = _mm256_loadu_si256(ptr.add(hi - LANES) as *const __m256i);
                    _mm256_storeu_si256(ptr.add(lo) as *mut __m256i, $rv(b));
                    _mm256_storeu_si256(ptr.add(hi - LANES) as *mut __m256i, $rv(a));
                    lo += LANES;
                    hi -= LANES;
                }
                crate::bulk::scalar_reverse(&mut buf[lo..hi]);
            }
        };
    }

    avx2_reverse_kernel!(u8, 1, revvec_avx2_u8, reverse_avx2_u8);
    avx2_reverse_kernel!(u16, 2, revvec_avx2_u16, reverse_avx2_u16);
    avx2_reverse_kernel!(u32, 4, revvec_avx2_u32, reverse_avx2_u32);
    avx2_reverse_kernel!(u64, 8, revvec_avx2_u64, reverse_avx2_u64);

    // SSE2 can reverse 32/64-bit lanes with pshufd; byte and word lanes would
    // need pshufb (SSSE3), so those widths stay scalar at this tier.

    #[target_feature(enable = "sse2")]
    unsafe fn revvec_sse2_u32(v: __m128i) -> __m128i {
        _mm_shuffle_epi32::<0x1B>(v)
    }

    #[target_feature(enable = "sse2")]
    unsafe fn revvec_sse2_u64(v: __m128i) -> __m128i {
        _mm_shuffle_epi32::<0x4E>(v)
    }

    macro_rules! sse2_reverse_kernel {
        ($ty:ty, $width:expr, $rv:ident, $name:ident) => {
            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $name(buf: &mut [$ty]) {
                const LANES: usize = 16 / $width;
                let len = buf.len();
                debug_assert!(len >= 2 * LANES);
                let ptr = buf.as_mut_ptr();
                let mut lo = 0;
                let mut hi = len;
                while hi - lo >= 2 * LANES {
                    let a = _mm_loadu_si128(ptr.add(lo) as *const __m128i);
                    let b = _mm_loadu_si128(ptr.add(hi - LANES) as *const __m128i);
                    _mm_storeu_si128(ptr.add(lo) as *mut __m128i, $rv(b));
                    _mm_storeu_si128(ptr.add(hi - LANES) as *mut __m128i, $rv(a));
                    lo += LANES;
                    hi -= LANES;
                }
                crate::bulk::scalar_reverse(&mut buf[lo..hi]);
            }
        };
    }

    sse2_reverse_kernel!(u32, 4, revvec_sse2_u32, reverse_sse2_u32);
    sse2_reverse_kernel!(u64, 8, revvec_sse2_u64, reverse_sse2_u64);
}

// =============================================================================
// AVX-512 KERNELS (feature `avx512`)
// =============================================================================

#[cfg(all(target_arch = "x86_64", feature = "avx512"))]
pub(crate) mod avx512 {
    use core::arch::x86_64::*;

    macro_rules! avx512_bulk_kernels {
        ($ty:ty, $lanes:expr, $set1:ident, $cast:ty, $cmpeq:ident, $blend:ident, $fill:ident, $replace:ident, $count:ident) => {
            #[target_feature(enable = "avx512f,avx512bw")]
            pub(crate) unsafe fn $fill(buf: &mut [$ty], v: $ty) {
                const LANES: usize = $lanes;
                let len = buf.len();
                debug_assert!(len >= LANES);
                let ptr = buf.as_mut_ptr();
                let vv = $set1(v as $cast);
                let mut i = 0;
                while i + 2 * LANES <= len {
                    _mm512_storeu_si512(ptr.add(i).cast(), vv);
                    _mm512_storeu_si512(ptr.add(i + LANES).cast(), vv);
                    i += 2 * LANES;
                }
                if i + LANES <= len {
                    _mm512_storeu_si512(ptr.add(i).cast(), vv);
                    i += LANES;
                }
                if i < len {
                    _mm512_storeu_si512(ptr.add(len - LANES).cast(), vv);
                }
            }

            #[target_feature(enable = "avx512f,avx512bw")]
            pub(crate) unsafe fn $replace(
                src: *const $ty,
                dst: *mut $ty,
                len: usize,
                old: $ty,
                new: $ty,
            ) {
                const LANES: usize = $lanes;
                debug_assert!(len >= LANES);
                let old_v = $set1(old as $cast);
                let new_v = $set1(new as $cast);
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm512_loadu_si512(src.add(i).cast());
                    let m = $cmpeq(chunk, old_v);
                    _mm512_storeu_si512(dst.add(i).cast(), $blend(m, chunk, new_v));
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm512_loadu_si512(src.add(start).cast());
                    let m = $cmpeq(chunk, old_v);
                    _mm512_storeu_si512(dst.add(start).cast(), $blend(m, chunk, new_v));
                }
            }

            #[target_feature(enable = "avx512f,avx512bw")]
            pub(crate) unsafe fn $count(h: &[$ty], v: $ty) -> usize {
                const LANES: usize = $lanes;
                let len = h.len();
                debug_assert!(len >= LANES);
                let ptr = h.as_ptr();
                let vv = $set1(v as $cast);
                let mut total = 0usize;
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = _mm512_loadu_si512(ptr.add(i).cast());
                    total += ($cmpeq(chunk, vv) as u64).count_ones() as usize;
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = _mm512_loadu_si512(ptr.add(start).cast());
                    let mut m = $cmpeq(chunk, vv) as u64;
                    m >>= i - start;
                    total += m.count_ones() as usize;
                }
                total
            }
        };
    }

    avx512_bulk_kernels!(u8, 64, _mm512_set1_epi8, i8, _mm512_cmpeq_epu8_mask, _mm512_mask_blend_epi8, fill_avx512_u8, replace_avx512_u8, count_avx512_u8);
    avx512_bulk_kernels!(u16, 32, _mm512_set1_epi16, i16, _mm512_cmpeq_epu16_mask, _mm512_mask_blend_epi16, fill_avx512_u16, replace_avx512_u16, count_avx512_u16);
    avx512_bulk_kernels!(u32, 16, _mm512_set1_epi32, i32, _mm512_cmpeq_epu32_mask, _mm512_mask_blend_epi32, fill_avx512_u32, replace_avx512_u32, count_avx512_u32);
    avx512_bulk_kernels!(u64, 8, _mm512_set1_epi64, i64, _mm512_cmpeq_epu64_mask, _mm512_mask_blend_epi64, fill_avx512_u64, replace_avx512_u64, count_avx512_u64);
}

// =============================================================================
// NEON KERNELS (aarch64)
// =============================================================================

#[cfg(target_arch = "aarch64")]
pub(crate) mod neon {
    use core::arch::aarch64::*;

    use crate::search::neon::{movemask_nibbles, reint_u8};

    macro_rules! neon_bulk_kernels {
        ($ty:ty, $width:expr, $ld:ident, $st:ident, $dup:ident, $ceq:ident, $bsl:ident, $reint:ident, $fill:ident, $replace:ident, $count:ident) => {
            #[target_feature(enable = "neon")]
            pub(crate) unsafe fn $fill(buf: &mut [$ty], v: $ty) {
                const LANES: usize = 16 / $width;
                let len = buf.len();
                debug_assert!(len >= LANES);
                let ptr = buf.as_mut_ptr();
                let vv = $dup(v);
                let mut i = 0;
                while i + 2 * LANES <= len {
                    $st(ptr.add(i), vv);
                    $st(ptr.add(i + LANES), vv);
                    i += 2 * LANES;
                }
                if i + LANES <= len {
                    $st(ptr.add(i), vv);
                    i += LANES;
                }
                if i < len {
                    $st(ptr.add(len - LANES), vv);
                }
            }

            #[target_feature(enable = "neon")]
            pub(crate) unsafe fn $replace(
                src: *const $ty,
                dst: *mut $ty,
                len: usize,
                old: $ty,
                new: $ty,
            ) {
                const LANES: usize = 16 / $width;
                debug_assert!(len >= LANES);
                let old_v = $dup(old);
                let new_v = $dup(new);
                let mut i = 0;
                while i + LANES <= len {
                    let chunk = $ld(src.add(i));
                    let m = $ceq(chunk, old_v);
                    $st(dst.add(i), $bsl(m, new_v, chunk));
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let chunk = $ld(src.add(start));
                    let m = $ceq(chunk, old_v);
                    $st(dst.add(start), $bsl(m, new_v, chunk));
                }
            }

            #[target_feature(enable = "neon")]
            pub(crate) unsafe fn $count(h: &[$ty], v: $ty) -> usize {
                const LANES: usize = 16 / $width;
                let len = h.len();
                debug_assert!(len >= LANES);
                let ptr = h.as_ptr();
                let vv = $dup(v);
                let mut total = 0usize;
                let mut i = 0;
                while i + LANES <= len {
                    let bits = movemask_nibbles($reint($ceq($ld(ptr.add(i)), vv)));
                    total += bits.count_ones() as usize / (4 * $width);
                    i += LANES;
                }
                if i < len {
                    let start = len - LANES;
                    let mut bits = movemask_nibbles($reint($ceq($ld(ptr.add(start)), vv)));
                    bits >>= (i - start) * 4 * $width;
                    total += bits.count_ones() as usize / (4 * $width);
                }
                total
            }
        };
    }

    neon_bulk_kernels!(u8, 1, vld1q_u8, vst1q_u8, vdupq_n_u8, vceqq_u8, vbslq_u8, reint_u8, fill_neon_u8, replace_neon_u8, count_neon_u8);
    neon_bulk_kernels!(u16, 2, vld1q_u16, vst1q_u16, vdupq_n_u16, vceqq_u16, vbslq_u16, vreinterpretq_u8_u16, fill_neon_u16, replace_neon_u16, count_neon_u16);
    neon_bulk_kernels!(u32, 4, vld1q_u32, vst1q_u32, vdupq_n_u32, vceqq_u32, vbslq_u32, vreinterpretq_u8_u32, fill_neon_u32, replace_neon_u32, count_neon_u32);
    neon_bulk_kernels!(u64, 8, vld1q_u64, vst1q_u64, vdupq_n_u64, vceqq_u64, vbslq_u64, vreinterpretq_u8_u64, fill_neon_u64, replace_neon_u64, count_neon_u64);

    #[target_feature(enable = "neon")]
    unsafe fn revvec_neon_u8(v: uint8x16_t) -> uint8x16_t {
        let r = vrev64q_u8(v);
        vextq_u8::<8>(r, r)
    }

    #[target_feature(enable = "neon")]
    unsafe fn revvec_neon_u16(v: uint16x8_t) -> uint16x8_t {
        let r = vrev64q_u16(v);
        vextq_u16::<4>(r, r)
    }

    #[target_feature(enable = "neon")]
    unsafe fn revvec_neon_u32(v: uint32x4_t) -> uint32x4_t {
        let r = vrev64q_u32(v);
        vextq_u32::<2>(r, r)
    }

    #[target_feature(enable = "neon")]
    unsafe fn revvec_neon_u64(v: uint64x2_t) -> uint64x2_t {
        vextq_u64::<1>(v, v)
    }

    macro_rules! neon_reverse_kernel {
        ($ty:ty, $width:expr, $ld:ident, $st:ident, $rv:ident, $name:ident) => {
            #[target_feature(enable = "neon")]
            pub(crate) unsafe fn $name(buf: &mut [$ty]) {
                const LANES: usize = 16 / $width;
                let len = buf.len();
                debug_assert!(len >= 2 * LANES);
                let ptr = buf.as_mut_ptr();
                let mut lo = 0;
                let mut hi = len;
                while hi - lo >= 2 * LANES {
                    let a = $ld(ptr.add(lo));
                    let b = $ld(ptr.add(hi - LANES));
                    $st(ptr.add(lo), $rv(b));
                    $st(ptr.add(hi - LANES), $rv(a));
                    lo += LANES;
                    hi -= LANES;
                }
                crate::bulk::scalar_reverse(&mut buf[lo..hi]);
            }
        };
    }

    neon_reverse_kernel!(u8, 1, vld1q_u8, vst1q_u8, revvec_neon_u8, reverse_neon_u8);
    neon_reverse_kernel!(u16, 2, vld1q_u16, vst1q_u16, revvec_neon_u16, reverse_neon_u16);
    neon_reverse_kernel!(u32, 4, vld1q_u32, vst1q_u32, revvec_neon_u32, reverse_neon_u32);
    neon_reverse_kernel!(u64, 8, vld1q_u64, vst1q_u64, revvec_neon_u64, reverse_neon_u64);
}

// =============================================================================
// PER-WIDTH DISPATCH
// =============================================================================

macro_rules! impl_bulk_word {
    ($ty:ty, $l512:expr, $l256:expr, $l128:expr,
     avx512: ($fill512:path, $replace512:path, $count512:path),
     avx2: ($fill256:path, $replace256:path, $count256:path, $rev256:path),
     sse2: ($fill128:path, $replace128:path, $count128:path),
     sse2_rev: ($($rev128:path)?),
     neon: ($filln:path, $replacen:path, $countn:path, $revn:path)) => {
        impl BulkWord for $ty {
            fn fill(buf: &mut [$ty], v: $ty, caps: &HardwareCapabilities) {
                let len = buf.len();
                #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
                if caps.has_avx512 && len >= simd_cutover($l512) {
                    return unsafe { $fill512(buf, v) };
                }
                #[cfg(target_arch = "x86_64")]
                {
                    if caps.has_avx2 && len >= simd_cutover($l256) {
                        return unsafe { $fill256(buf, v) };
                    }
                    if caps.has_sse2 && len >= simd_cutover($l128) {
                        return unsafe { $fill128(buf, v) };
                    }
                }
                #[cfg(target_arch = "aarch64")]
                if caps.has_neon && len >= simd_cutover($l128) {
                    return unsafe { $filln(buf, v) };
                }
                let _ = (caps, len);
                scalar_fill(buf, v);
            }

            unsafe fn replace(
                src: *const $ty,
                dst: *mut $ty,
                len: usize,
                old: $ty,
                new: $ty,
                caps: &HardwareCapabilities,
            ) {
                #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
                if caps.has_avx512 && len >= simd_cutover($l512) {
                    return $replace512(src, dst, len, old, new);
                }
                #[cfg(target_arch = "x86_64")]
                {
                    if caps.has_avx2 && len >= simd_cutover($l256) {
                        return $replace256(src, dst, len, old, new);
                    }
                    if caps.has_sse2 && len >= simd_cutover($l128) {
                        return $replace128(src, dst, len, old, new);
                    }
                }
                #[cfg(target_arch = "aarch64")]
                if caps.has_neon && len >= simd_cutover($l128) {
                    return $replacen(src, dst, len, old, new);
                }
                let _ = caps;
                scalar_replace(src, dst, len, old, new);
            }

            fn reverse(buf: &mut [$ty], caps: &HardwareCapabilities) {
                let len = buf.len();
                // The converging kernels need one full register per end.
                #[cfg(target_arch = "x86_64")]
                {
                    if caps.has_avx2 && len >= simd_cutover(2 * $l256) {
                        return unsafe { $rev256(buf) };
                    }
                    $(
                        if caps.has_sse2 && len >= simd_cutover(2 * $l128) {
                            return unsafe { $rev128(buf) };
                        }
                    )?
                }
                #[cfg(target_arch = "aarch64")]
                if caps.has_neon && len >= simd_cutover(2 * $l128) {
                    return unsafe { $revn(buf) };
                }
                let _ = (caps, len);
                scalar_reverse(buf);
            }

            fn count_eq(h: &[$ty], v: $ty, caps: &HardwareCapabilities) -> usize {
                let len = h.len();
                #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
                if caps.has_avx512 && len >= simd_cutover($l512) {
                    return unsafe { $count512(h, v) };
                }
                #[cfg(target_arch = "x86_64")]
                {
                    if caps.has_avx2 && len >= simd_cutover($l256) {
                        return unsafe { $count256(h, v) };
                    }
                    if caps.has_sse2 && len >= simd_cutover($l128) {
                        return unsafe { $count128(h, v) };
                    }
                }
                #[cfg(target_arch = "aarch64")]
                if caps.has_neon && len >= simd_cutover($l128) {
                    return unsafe { $countn(h, v) };
                }
                let _ = (caps, len);
                scalar_count(h, &v)
            }
        }
    };
}

impl_bulk_word!(u8, LANES_AVX512_U8, LANES_AVX2_U8, LANES_SSE2_U8,
    avx512: (avx512::fill_avx512_u8, avx512::replace_avx512_u8, avx512::count_avx512_u8),
    avx2: (x86::fill_avx2_u8, x86::replace_avx2_u8, x86::count_avx2_u8, x86::reverse_avx2_u8),
    sse2: (x86::fill_sse2_u8, x86::replace_sse2_u8, x86::count_sse2_u8),
    sse2_rev: (),
    neon: (neon::fill_neon_u8, neon::replace_neon_u8, neon::count_neon_u8, neon::reverse_neon_u8));

impl_bulk_word!(u16, LANES_AVX512_U16, LANES_AVX2_U16, LANES_SSE2_U16,
    avx512: (avx512::fill_avx512_u16, avx512::replace_avx512_u16, avx512::count_avx512_u16),
    avx2: (x86::fill_avx2_u16, x86::replace_avx2_u16, x86::count_avx2_u16, x86::reverse_avx2_u16),
    sse2: (x86::fill_sse2_u16, x86::replace_sse2_u16, x86::count_sse2_u16),
    sse2_rev: (),
    neon: (neon::fill_neon_u16, neon::replace_neon_u16, neon::count_neon_u16, neon::reverse_neon_u16));

impl_bulk_word!(u32, LANES_AVX512_U32, LANES_AVX2_U32, LANES_SSE2_U32,
    avx512: (avx512::fill_avx512_u32, avx512::replace_avx512_u32, avx512::count_avx512_u32),
    avx2: (x86::fill_avx2_u32, x86::replace_avx2_u32, x86::count_avx2_u32, x86::reverse_avx2_u32),
    sse2: (x86::fill_sse2_u32, x86::replace_sse2_u32, x86::count_sse2_u32),
    sse2_rev: (x86::reverse_sse2_u32),
    neon: (neon::fill_neon_u32, neon::replace_neon_u32, neon::count_neon_u32, neon::reverse_neon_u32));

impl_bulk_word!(u64, LANES_AVX512_U64, LANES_AVX2_U64, LANES_SSE2_U64,
    avx512: (avx512::fill_avx512_u64, avx512::replace_avx512_u64, avx512::count_avx512_u64),
    avx2: (x86::fill_avx2_u64, x86::replace_avx2_u64, x86::count_avx2_u64, x86::reverse_avx2_u64),
    sse2: (x86::fill_sse2_u64, x86::replace_sse2_u64, x86::count_sse2_u64),
    sse2_rev: (x86::reverse_sse2_u64),
    neon: (neon::fill_neon_u64, neon::replace_neon_u64, neon::count_neon_u64, neon::reverse_neon_u64));
