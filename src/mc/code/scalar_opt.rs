//! Optimized scalar motion compensation.
//!
//! Whole rows are handled as slices: copies become `copy_from_slice` and
//! the averaging loops iterate zipped rows without index arithmetic.

use super::original::{integer_offset, HPEL_REF0, HPEL_REF1};

#[inline(always)]
fn avg_row(dst: &mut [u8], a: &[u8], b: &[u8]) {
    for ((d, &a), &b) in dst.iter_mut().zip(a).zip(b) {
        *d = ((a as u16 + b as u16 + 1) >> 1) as u8;
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
            &src1[y * src_stride..][..w],
            &src2[y * src_stride..][..w],
        );
    }
}

#[allow(clippy::too_many_arguments)]
pub fn mc_chroma(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    mvx: i32,
    mvy: i32,
    w: usize,
    h: usize,
) {
    let (dx, dy) = ((mvx & 7) as u16, (mvy & 7) as u16);
    // Weights sum to 64, so every intermediate fits in u16.
    let weights = [(8 - dx) * (8 - dy), dx * (8 - dy), (8 - dx) * dy, dx * dy];

    let src = &src[integer_offset(mvx, mvy, 3, src_stride)..];
    let mut row = &src[..w + 1];
    for y in 0..h {
        let next = &src[(y + 1) * src_stride..][..w + 1];
        let out = &mut dst[y * dst_stride..][..w];
        for x in 0..w {
            let v = weights[0] * row[x] as u16
                + weights[1] * row[x + 1] as u16
                + weights[2] * next[x] as u16
                + weights[3] * next[x + 1] as u16;
            out[x] = ((v + 32) >> 6) as u8;
        }
        row = next;
    }
}

pub fn avg<const W: usize, const H: usize>(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
) {
    for y in 0..H {
        let d = &mut dst[y * dst_stride..][..W];
        let s = &src[y * src_stride..][..W];
        for (d, &s) in d.iter_mut().zip(s) {
            *d = ((*d as u16 + s as u16 + 1) >> 1) as u8;
        }
    }
}

pub fn avg_weight<const W: usize, const H: usize>(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    weight: i32,
) {
    let weight2 = 64 - weight;
    for y in 0..H {
        let d = &mut dst[y * dst_stride..][..W];
        let s = &src[y * src_stride..][..W];
        for (d, &s) in d.iter_mut().zip(s) {
            let v = (*d as i32 * weight + s as i32 * weight2 + 32) >> 6;
            *d = v.clamp(0, 255) as u8;
        }
    }
}
