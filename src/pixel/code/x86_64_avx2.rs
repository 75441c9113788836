//! x86_64 AVX2 pixel metrics.
//!
//! Compiled only when the build enables AVX2
//! (`RUSTFLAGS="-C target-cpu=native"` or `-C target-feature=+avx2`).

use std::arch::x86_64::*;

/// SAD for 16-wide blocks, two rows per 256-bit register.
pub fn sad_16xh<const H: usize>(pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) -> i32 {
    debug_assert!(H % 2 == 0);
    unsafe {
        let mut acc = _mm256_setzero_si256();
        for y in (0..H).step_by(2) {
            let a0 = &pix1[y * stride1..][..16];
            let a1 = &pix1[(y + 1) * stride1..][..16];
            let b0 = &pix2[y * stride2..][..16];
            let b1 = &pix2[(y + 1) * stride2..][..16];

            let a = _mm256_set_m128i(
                _mm_loadu_si128(a1.as_ptr() as *const __m128i),
                _mm_loadu_si128(a0.as_ptr() as *const __m128i),
            );
            let b = _mm256_set_m128i(
                _mm_loadu_si128(b1.as_ptr() as *const __m128i),
                _mm_loadu_si128(b0.as_ptr() as *const __m128i),
            );
            acc = _mm256_add_epi64(acc, _mm256_sad_epu8(a, b));
        }
        let lo = _mm256_castsi256_si128(acc);
        let hi = _mm256_extracti128_si256::<1>(acc);
        let sum = _mm_add_epi64(lo, hi);
        let sum = _mm_add_epi64(sum, _mm_unpackhi_epi64(sum, sum));
        _mm_cvtsi128_si32(sum)
    }
}
