//! x86_64 SSE2 motion compensation.
//!
//! `pavgb` computes exactly `(a + b + 1) >> 1`, which makes it a drop-in
//! for the averaging paths. Rows narrower than 8 fall back to scalar code.

use std::arch::x86_64::*;

use super::original::{integer_offset, HPEL_REF0, HPEL_REF1};

/// Averages `a` and `b` into `dst`, 16 or 8 samples at a time.
#[inline(always)]
fn avg_row(dst: &mut [u8], a: &[u8], b: &[u8]) {
    let w = dst.len();
    let (a, b) = (&a[..w], &b[..w]);
    let mut x = 0;
    unsafe {
        while x + 16 <= w {
            let va = _mm_loadu_si128(a[x..].as_ptr() as *const __m128i);
            let vb = _mm_loadu_si128(b[x..].as_ptr() as *const __m128i);
            _mm_storeu_si128(dst[x..].as_mut_ptr() as *mut __m128i, _mm_avg_epu8(va, vb));
            x += 16;
        }
        if x + 8 <= w {
            let va = _mm_loadl_epi64(a[x..].as_ptr() as *const __m128i);
            let vb = _mm_loadl_epi64(b[x..].as_ptr() as *const __m128i);
            _mm_storel_epi64(dst[x..].as_mut_ptr() as *mut __m128i, _mm_avg_epu8(va, vb));
            x += 8;
        }
    }
    for i in x..w {
        dst[i] = ((a[i] as u16 + b[i] as u16 + 1) >> 1) as u8;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn mc_luma(
    planes: &[&[u8]; 4],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    mvx: i32,
    mvy: i32,
    w: usize,
    h: usize,
) {
    let qpel_idx = (((mvy & 3) << 2) + (mvx & 3)) as usize;
    let offset = integer_offset(mvx, mvy, 2, src_stride);
    let src1 = &planes[HPEL_REF0[qpel_idx]][offset + if mvy & 3 == 3 { src_stride } else { 0 }..];

    if qpel_idx & 5 == 0 {
        for y in 0..h {
            dst[y * dst_stride..][..w].copy_from_slice(&src1[y * src_stride..][..w]);
        }
        return;
    }

    let src2 = &planes[HPEL_REF1[qpel_idx]][offset + usize::from(mvx & 3 == 3)..];
    for y in 0..h {
        avg_row(
            &mut dst[y * dst_stride..][..w],
            &src1[y * src_stride..],
            &src2[y * src_stride..],
        );
    }
}

/// Averaging for 16- and 8-wide blocks.
pub fn avg<const W: usize, const H: usize>(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
) {
    debug_assert!(W == 16 || W == 8);
    for y in 0..H {
        let row = &mut dst[y * dst_stride..][..W];
        let s = &src[y * src_stride..][..W];
        unsafe {
            if W == 16 {
                let vd = _mm_loadu_si128(row.as_ptr() as *const __m128i);
                let vs = _mm_loadu_si128(s.as_ptr() as *const __m128i);
                _mm_storeu_si128(row.as_mut_ptr() as *mut __m128i, _mm_avg_epu8(vd, vs));
            } else {
                let vd = _mm_loadl_epi64(row.as_ptr() as *const __m128i);
                let vs = _mm_loadl_epi64(s.as_ptr() as *const __m128i);
                _mm_storel_epi64(row.as_mut_ptr() as *mut __m128i, _mm_avg_epu8(vd, vs));
            }
        }
    }
}

/// Weighted average of 8 samples: interleaved `(dst, src)` pairs are
/// multiplied by `(w, 64 - w)` with `pmaddwd`, so sums stay in 32 bits.
#[inline(always)]
unsafe fn weight8(d: __m128i, s: __m128i, weights: __m128i) -> __m128i {
    let zero = _mm_setzero_si128();
    let round = _mm_set1_epi32(32);
    let d = _mm_unpacklo_epi8(d, zero);
    let s = _mm_unpacklo_epi8(s, zero);
    let lo = _mm_madd_epi16(_mm_unpacklo_epi16(d, s), weights);
    let hi = _mm_madd_epi16(_mm_unpackhi_epi16(d, s), weights);
    let lo = _mm_srai_epi32::<6>(_mm_add_epi32(lo, round));
    let hi = _mm_srai_epi32::<6>(_mm_add_epi32(hi, round));
    // Saturating packs clip to 0..=255.
    _mm_packus_epi16(_mm_packs_epi32(lo, hi), zero)
}

/// Weighted averaging for 16- and 8-wide blocks.
pub fn avg_weight<const W: usize, const H: usize>(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    weight: i32,
) {
    debug_assert!(W == 16 || W == 8);
    unsafe {
        let pair = (weight & 0xffff) | ((64 - weight) << 16);
        let weights = _mm_set1_epi32(pair);
        for y in 0..H {
            let row = &mut dst[y * dst_stride..][..W];
            let s = &src[y * src_stride..][..W];
            for x in (0..W).step_by(8) {
                let vd = _mm_loadl_epi64(row[x..].as_ptr() as *const __m128i);
                let vs = _mm_loadl_epi64(s[x..].as_ptr() as *const __m128i);
                _mm_storel_epi64(row[x..].as_mut_ptr() as *mut __m128i, weight8(vd, vs, weights));
            }
        }
    }
}
