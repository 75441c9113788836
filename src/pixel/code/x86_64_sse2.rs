//! x86_64 SSE2 pixel metrics.
//!
//! SSE2 is part of the x86_64 baseline. Only the 16- and 8-wide
//! partitions have SIMD versions; 4-wide blocks keep the scalar kernels.

use std::arch::x86_64::*;

#[inline(always)]
unsafe fn load_row<const W: usize>(row: &[u8]) -> __m128i {
    let row = &row[..W];
    if W == 16 {
        _mm_loadu_si128(row.as_ptr() as *const __m128i)
    } else {
        _mm_loadl_epi64(row.as_ptr() as *const __m128i)
    }
}

/// SAD for 16- or 8-wide blocks using `psadbw`.
pub fn sad<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    debug_assert!(W == 16 || W == 8);
    unsafe {
        let mut acc = _mm_setzero_si128();
        for y in 0..H {
            let a = load_row::<W>(&pix1[y * stride1..]);
            let b = load_row::<W>(&pix2[y * stride2..]);
            acc = _mm_add_epi64(acc, _mm_sad_epu8(a, b));
        }
        // Two 64-bit partial sums; the upper one is zero for 8-wide rows.
        let hi = _mm_unpackhi_epi64(acc, acc);
        _mm_cvtsi128_si32(_mm_add_epi64(acc, hi))
    }
}

/// SSD for 16- or 8-wide blocks.
///
/// Differences fit in i16, and `pmaddwd` sums pairs of squares into i32.
pub fn ssd<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    debug_assert!(W == 16 || W == 8);
    unsafe {
        let zero = _mm_setzero_si128();
        let mut acc = _mm_setzero_si128();
        for y in 0..H {
            let a = load_row::<W>(&pix1[y * stride1..]);
            let b = load_row::<W>(&pix2[y * stride2..]);

            let d_lo = _mm_sub_epi16(_mm_unpacklo_epi8(a, zero), _mm_unpacklo_epi8(b, zero));
            acc = _mm_add_epi32(acc, _mm_madd_epi16(d_lo, d_lo));
            if W == 16 {
                let d_hi =
                    _mm_sub_epi16(_mm_unpackhi_epi8(a, zero), _mm_unpackhi_epi8(b, zero));
                acc = _mm_add_epi32(acc, _mm_madd_epi16(d_hi, d_hi));
            }
        }
        let sum = _mm_add_epi32(acc, _mm_shuffle_epi32::<0b01_00_11_10>(acc));
        let sum = _mm_add_epi32(sum, _mm_shuffle_epi32::<0b10_11_00_01>(sum));
        _mm_cvtsi128_si32(sum)
    }
}
