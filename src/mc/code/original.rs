//! Reference motion compensation.

/// Full-pel plane a quarter-pel position averages from, by `(dy << 2) + dx`.
pub const HPEL_REF0: [usize; 16] = [0, 1, 1, 1, 0, 1, 1, 1, 2, 3, 3, 3, 0, 1, 1, 1];
/// Second plane of the average for positions that need one.
pub const HPEL_REF1: [usize; 16] = [0, 0, 0, 0, 2, 2, 3, 2, 2, 2, 3, 2, 2, 2, 3, 2];

/// Offset of the integer part of a motion vector with `shift` fraction bits.
///
/// Motion vectors must not point above or left of the plane origin.
#[inline]
pub(crate) fn integer_offset(mvx: i32, mvy: i32, shift: u32, stride: usize) -> usize {
    let offset = (mvy >> shift) as isize * stride as isize + (mvx >> shift) as isize;
    debug_assert!(offset >= 0, "motion vector points outside the plane");
    offset as usize
}

fn copy_block(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    w: usize,
    h: usize,
) {
    for y in 0..h {
        for x in 0..w {
            dst[y * dst_stride + x] = src[y * src_stride + x];
        }
    }
}

fn average_block(
    dst: &mut [u8],
    dst_stride: usize,
    a: &[u8],
    b: &[u8],
    src_stride: usize,
    w: usize,
    h: usize,
) {
    for y in 0..h {
        for x in 0..w {
            let i = y * src_stride + x;
            dst[y * dst_stride + x] = ((a[i] as u32 + b[i] as u32 + 1) >> 1) as u8;
        }
    }
}

/// Quarter-pel luma prediction from four half-pel planes
/// (full, horizontal, vertical, centre).
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

    let down = if mvy & 3 == 3 { src_stride } else { 0 };
    let src1 = &planes[HPEL_REF0[qpel_idx]][offset + down..];
    if qpel_idx & 5 != 0 {
        let right = usize::from(mvx & 3 == 3);
        let src2 = &planes[HPEL_REF1[qpel_idx]][offset + right..];
        average_block(dst, dst_stride, src1, src2, src_stride, w, h);
    } else {
        copy_block(dst, dst_stride, src1, src_stride, w, h);
    }
}

/// Eighth-pel bilinear chroma prediction.
///
/// Always reads one column and one row past the block.
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
    let dx = mvx & 7;
    let dy = mvy & 7;
    let c_a = (8 - dx) * (8 - dy);
    let c_b = dx * (8 - dy);
    let c_c = (8 - dx) * dy;
    let c_d = dx * dy;

    let src = &src[integer_offset(mvx, mvy, 3, src_stride)..];
    for y in 0..h {
        let row = &src[y * src_stride..];
        let next = &src[(y + 1) * src_stride..];
        for x in 0..w {
            let v = c_a * row[x] as i32
                + c_b * row[x + 1] as i32
                + c_c * next[x] as i32
                + c_d * next[x + 1] as i32;
            dst[y * dst_stride + x] = ((v + 32) >> 6) as u8;
        }
    }
}

/// `dst = (dst + src + 1) >> 1`
pub fn avg<const W: usize, const H: usize>(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
) {
    for y in 0..H {
        for x in 0..W {
            let d = &mut dst[y * dst_stride + x];
            *d = ((*d as u32 + src[y * src_stride + x] as u32 + 1) >> 1) as u8;
        }
    }
}

/// `dst = clip((dst * w + src * (64 - w) + 32) >> 6)`
pub fn avg_weight<const W: usize, const H: usize>(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    weight: i32,
) {
    let weight2 = 64 - weight;
    for y in 0..H {
        for x in 0..W {
            let d = &mut dst[y * dst_stride + x];
            let v = *d as i32 * weight + src[y * src_stride + x] as i32 * weight2;
            *d = ((v + 32) >> 6).clamp(0, 255) as u8;
        }
    }
}
