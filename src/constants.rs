// SPDX-License-Identifier: Apache-2.0

//! Common constants used across implementations
//!
//! This module centralizes lane counts and cutover thresholds used by the
//! scalar and SIMD paths.

// =============================================================================
// SIMD Lane Counts by Tier and Element Width
// =============================================================================

// AVX-512 (512-bit registers, `avx512` feature)
pub const LANES_AVX512_U8: usize = 64; // 512/8
pub const LANES_AVX512_U16: usize = 32; // 512/16
pub const LANES_AVX512_U32: usize = 16; // 512/32
pub const LANES_AVX512_U64: usize = 8; // 512/64

// AVX2 (256-bit registers)
pub const LANES_AVX2_U8: usize = 32; // 256/8
pub const LANES_AVX2_U16: usize = 16; // 256/16
pub const LANES_AVX2_U32: usize = 8; // 256/32
pub const LANES_AVX2_U64: usize = 4; // 256/64

// SSE2 (128-bit registers, x86_64 baseline)
pub const LANES_SSE2_U8: usize = 16; // 128/8
pub const LANES_SSE2_U16: usize = 8; // 128/16
pub const LANES_SSE2_U32: usize = 4; // 128/32
pub const LANES_SSE2_U64: usize = 2; // 128/64

// NEON (128-bit registers, aarch64)
pub const LANES_NEON_U8: usize = 16; // 128/8
pub const LANES_NEON_U16: usize = 8; // 128/16
pub const LANES_NEON_U32: usize = 4; // 128/32
pub const LANES_NEON_U64: usize = 2; // 128/64

// =============================================================================
// Scalar Unrolling
// =============================================================================

/// Elements handled per iteration by the unrolled scalar search loops.
pub const SCALAR_UNROLL: usize = 8;

// =============================================================================
// Cutover Control
// =============================================================================

/// Minimum length at which a vector tier is usable.
///
/// A tier needs at least one full register of elements; below that the
/// overlapping-tail load would read before the buffer start. With the
/// `disable-simd` feature every cutover becomes unreachable so the scalar
/// paths run everywhere.
#[inline(always)]
pub(crate) const fn simd_cutover(lanes: usize) -> usize {
    if cfg!(feature = "disable-simd") {
        usize::MAX
    } else {
        lanes
    }
}
