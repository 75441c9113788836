//! Reference transforms.
//!
//! Coefficient blocks are stored row-major: a 4x4 block is 16 values, an
//! 8x8 block 64. Larger transforms are made of 4x4 (or 8x8) blocks laid out
//! quadrant by quadrant: top-left, top-right, bottom-left, bottom-right.

#[inline]
fn clip_pixel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// `diff = pix1 - pix2` over an `n`x`n` block.
fn pixel_sub(diff: &mut [i32], n: usize, pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    for y in 0..n {
        for x in 0..n {
            diff[y * n + x] = pix1[y * stride1 + x] as i32 - pix2[y * stride2 + x] as i32;
        }
    }
}

fn sub4x4(dct: &mut [i16], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    let mut d = [0i32; 16];
    pixel_sub(&mut d, 4, pix1, stride1, pix2, stride2);

    let mut tmp = [0i32; 16];
    for i in 0..4 {
        let s03 = d[i * 4] + d[i * 4 + 3];
        let s12 = d[i * 4 + 1] + d[i * 4 + 2];
        let d03 = d[i * 4] - d[i * 4 + 3];
        let d12 = d[i * 4 + 1] - d[i * 4 + 2];
        tmp[i] = s03 + s12;
        tmp[4 + i] = 2 * d03 + d12;
        tmp[8 + i] = s03 - s12;
        tmp[12 + i] = d03 - 2 * d12;
    }
    for i in 0..4 {
        let s03 = tmp[i * 4] + tmp[i * 4 + 3];
        let s12 = tmp[i * 4 + 1] + tmp[i * 4 + 2];
        let d03 = tmp[i * 4] - tmp[i * 4 + 3];
        let d12 = tmp[i * 4 + 1] - tmp[i * 4 + 2];
        dct[i] = (s03 + s12) as i16;
        dct[4 + i] = (2 * d03 + d12) as i16;
        dct[8 + i] = (s03 - s12) as i16;
        dct[12 + i] = (d03 - 2 * d12) as i16;
    }
}

fn sub8x8(dct: &mut [i16], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    for b in 0..4 {
        let (x, y) = ((b & 1) * 4, (b >> 1) * 4);
        sub4x4(
            &mut dct[b * 16..],
            &pix1[y * stride1 + x..],
            stride1,
            &pix2[y * stride2 + x..],
            stride2,
        );
    }
}

pub fn sub4x4_dct(dct: &mut [i16; 16], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    sub4x4(dct, pix1, stride1, pix2, stride2);
}

pub fn sub8x8_dct(dct: &mut [i16; 64], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    sub8x8(dct, pix1, stride1, pix2, stride2);
}

pub fn sub16x16_dct(
    dct: &mut [i16; 256],
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) {
    for q in 0..4 {
        let (x, y) = ((q & 1) * 8, (q >> 1) * 8);
        sub8x8(
            &mut dct[q * 64..],
            &pix1[y * stride1 + x..],
            stride1,
            &pix2[y * stride2 + x..],
            stride2,
        );
    }
}

fn add4x4(dst: &mut [u8], stride: usize, dct: &[i16]) {
    let c = |i: usize| dct[i] as i32;

    let mut tmp = [0i32; 16];
    for i in 0..4 {
        let s02 = c(i * 4) + c(i * 4 + 2);
        let d02 = c(i * 4) - c(i * 4 + 2);
        let s13 = c(i * 4 + 1) + (c(i * 4 + 3) >> 1);
        let d13 = (c(i * 4 + 1) >> 1) - c(i * 4 + 3);
        tmp[i * 4] = s02 + s13;
        tmp[i * 4 + 1] = d02 + d13;
        tmp[i * 4 + 2] = d02 - d13;
        tmp[i * 4 + 3] = s02 - s13;
    }

    let mut d = [0i32; 16];
    for i in 0..4 {
        let s02 = tmp[i] + tmp[8 + i];
        let d02 = tmp[i] - tmp[8 + i];
        let s13 = tmp[4 + i] + (tmp[12 + i] >> 1);
        let d13 = (tmp[4 + i] >> 1) - tmp[12 + i];
        d[i] = (s02 + s13 + 32) >> 6;
        d[4 + i] = (d02 + d13 + 32) >> 6;
        d[8 + i] = (d02 - d13 + 32) >> 6;
        d[12 + i] = (s02 - s13 + 32) >> 6;
    }

    for y in 0..4 {
        for x in 0..4 {
            let p = &mut dst[y * stride + x];
            *p = clip_pixel(*p as i32 + d[y * 4 + x]);
        }
    }
}

fn add8x8(dst: &mut [u8], stride: usize, dct: &[i16]) {
    for b in 0..4 {
        let (x, y) = ((b & 1) * 4, (b >> 1) * 4);
        add4x4(&mut dst[y * stride + x..], stride, &dct[b * 16..]);
    }
}

pub fn add4x4_idct(dst: &mut [u8], stride: usize, dct: &mut [i16; 16]) {
    add4x4(dst, stride, dct);
}

pub fn add8x8_idct(dst: &mut [u8], stride: usize, dct: &mut [i16; 64]) {
    add8x8(dst, stride, dct);
}

pub fn add16x16_idct(dst: &mut [u8], stride: usize, dct: &mut [i16; 256]) {
    for q in 0..4 {
        let (x, y) = ((q & 1) * 8, (q >> 1) * 8);
        add8x8(&mut dst[y * stride + x..], stride, &dct[q * 64..]);
    }
}

/// One 8-point forward pass. `src(k)` reads input `k`.
#[inline]
fn dct8_1d(src: impl Fn(usize) -> i32) -> [i32; 8] {
    let s07 = src(0) + src(7);
    let s16 = src(1) + src(6);
    let s25 = src(2) + src(5);
    let s34 = src(3) + src(4);
    let a0 = s07 + s34;
    let a1 = s16 + s25;
    let a2 = s07 - s34;
    let a3 = s16 - s25;
    let d07 = src(0) - src(7);
    let d16 = src(1) - src(6);
    let d25 = src(2) - src(5);
    let d34 = src(3) - src(4);
    let a4 = d16 + d25 + (d07 + (d07 >> 1));
    let a5 = d07 - d34 - (d25 + (d25 >> 1));
    let a6 = d07 + d34 - (d16 + (d16 >> 1));
    let a7 = d16 - d25 + (d34 + (d34 >> 1));
    [
        a0 + a1,
        a4 + (a7 >> 2),
        a2 + (a3 >> 1),
        a5 + (a6 >> 2),
        a0 - a1,
        a6 - (a5 >> 2),
        (a2 >> 1) - a3,
        (a4 >> 2) - a7,
    ]
}

/// One 8-point inverse pass.
#[inline]
fn idct8_1d(src: impl Fn(usize) -> i32) -> [i32; 8] {
    let a0 = src(0) + src(4);
    let a2 = src(0) - src(4);
    let a4 = (src(2) >> 1) - src(6);
    let a6 = (src(6) >> 1) + src(2);
    let b0 = a0 + a6;
    let b2 = a2 + a4;
    let b4 = a2 - a4;
    let b6 = a0 - a6;
    let a1 = -src(3) + src(5) - src(7) - (src(7) >> 1);
    let a3 = src(1) + src(7) - src(3) - (src(3) >> 1);
    let a5 = -src(1) + src(7) + src(5) + (src(5) >> 1);
    let a7 = src(3) + src(5) + src(1) + (src(1) >> 1);
    let b1 = (a7 >> 2) + a1;
    let b3 = a3 + (a5 >> 2);
    let b5 = (a3 >> 2) - a5;
    let b7 = a7 - (a1 >> 2);
    [
        b0 + b7,
        b2 + b5,
        b4 + b3,
        b6 + b1,
        b6 - b1,
        b4 - b3,
        b2 - b5,
        b0 - b7,
    ]
}

fn sub8x8_8(dct: &mut [i16], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    let mut diff = [0i32; 64];
    pixel_sub(&mut diff, 8, pix1, stride1, pix2, stride2);

    // Columns first, in place.
    let mut tmp = [0i16; 64];
    for i in 0..8 {
        let out = dct8_1d(|k| diff[k * 8 + i]);
        for (k, v) in out.into_iter().enumerate() {
            tmp[k * 8 + i] = v as i16;
        }
    }
    for i in 0..8 {
        let out = dct8_1d(|k| tmp[i * 8 + k] as i32);
        for (k, v) in out.into_iter().enumerate() {
            dct[k * 8 + i] = v as i16;
        }
    }
}

/// Inverse 8x8 plus add; the first pass is written back into `dct`.
fn add8x8_8(dst: &mut [u8], stride: usize, dct: &mut [i16]) {
    dct[0] = dct[0].wrapping_add(32);
    for i in 0..8 {
        let out = idct8_1d(|k| dct[k * 8 + i] as i32);
        for (k, v) in out.into_iter().enumerate() {
            dct[k * 8 + i] = v as i16;
        }
    }
    for i in 0..8 {
        let out = idct8_1d(|k| dct[i * 8 + k] as i32);
        for (k, v) in out.into_iter().enumerate() {
            let p = &mut dst[k * stride + i];
            *p = clip_pixel(*p as i32 + (v >> 6));
        }
    }
}

pub fn sub8x8_dct8(dct: &mut [i16; 64], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    sub8x8_8(dct, pix1, stride1, pix2, stride2);
}

pub fn sub16x16_dct8(
    dct: &mut [i16; 256],
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) {
    for q in 0..4 {
        let (x, y) = ((q & 1) * 8, (q >> 1) * 8);
        sub8x8_8(
            &mut dct[q * 64..],
            &pix1[y * stride1 + x..],
            stride1,
            &pix2[y * stride2 + x..],
            stride2,
        );
    }
}

pub fn add8x8_idct8(dst: &mut [u8], stride: usize, dct: &mut [i16; 64]) {
    add8x8_8(dst, stride, dct);
}

pub fn add16x16_idct8(dst: &mut [u8], stride: usize, dct: &mut [i16; 256]) {
    for q in 0..4 {
        let (x, y) = ((q & 1) * 8, (q >> 1) * 8);
        add8x8_8(&mut dst[y * stride + x..], stride, &mut dct[q * 64..]);
    }
}

/// 4x4 Hadamard of the luma DC coefficients, with rounding halving.
pub fn dct4x4dc(d: &mut [i16; 16]) {
    let mut tmp = [0i32; 16];
    for i in 0..4 {
        let s01 = d[i * 4] as i32 + d[i * 4 + 1] as i32;
        let d01 = d[i * 4] as i32 - d[i * 4 + 1] as i32;
        let s23 = d[i * 4 + 2] as i32 + d[i * 4 + 3] as i32;
        let d23 = d[i * 4 + 2] as i32 - d[i * 4 + 3] as i32;
        tmp[i] = s01 + s23;
        tmp[4 + i] = s01 - s23;
        tmp[8 + i] = d01 - d23;
        tmp[12 + i] = d01 + d23;
    }
    for i in 0..4 {
        let s01 = tmp[i * 4] + tmp[i * 4 + 1];
        let d01 = tmp[i * 4] - tmp[i * 4 + 1];
        let s23 = tmp[i * 4 + 2] + tmp[i * 4 + 3];
        let d23 = tmp[i * 4 + 2] - tmp[i * 4 + 3];
        d[i] = ((s01 + s23 + 1) >> 1) as i16;
        d[4 + i] = ((s01 - s23 + 1) >> 1) as i16;
        d[8 + i] = ((d01 - d23 + 1) >> 1) as i16;
        d[12 + i] = ((d01 + d23 + 1) >> 1) as i16;
    }
}

/// Inverse luma DC Hadamard, no scaling.
pub fn idct4x4dc(d: &mut [i16; 16]) {
    let mut tmp = [0i32; 16];
    for i in 0..4 {
        let s01 = d[i * 4] as i32 + d[i * 4 + 1] as i32;
        let d01 = d[i * 4] as i32 - d[i * 4 + 1] as i32;
        let s23 = d[i * 4 + 2] as i32 + d[i * 4 + 3] as i32;
        let d23 = d[i * 4 + 2] as i32 - d[i * 4 + 3] as i32;
        tmp[i] = s01 + s23;
        tmp[4 + i] = s01 - s23;
        tmp[8 + i] = d01 - d23;
        tmp[12 + i] = d01 + d23;
    }
    for i in 0..4 {
        let s01 = tmp[i * 4] + tmp[i * 4 + 1];
        let d01 = tmp[i * 4] - tmp[i * 4 + 1];
        let s23 = tmp[i * 4 + 2] + tmp[i * 4 + 3];
        let d23 = tmp[i * 4 + 2] - tmp[i * 4 + 3];
        d[i] = (s01 + s23) as i16;
        d[4 + i] = (s01 - s23) as i16;
        d[8 + i] = (d01 - d23) as i16;
        d[12 + i] = (d01 + d23) as i16;
    }
}

/// 2x2 Hadamard of the chroma DC coefficients.
pub fn dct2x2dc(d: &mut [i16; 4]) {
    let [a, b, c, e] = d.map(i32::from);
    let t0 = a + b;
    let t1 = a - b;
    let t2 = c + e;
    let t3 = c - e;
    *d = [t0 + t2, t0 - t2, t1 + t3, t1 - t3].map(|v| v as i16);
}

/// The 2x2 Hadamard is its own inverse up to scale.
pub fn idct2x2dc(d: &mut [i16; 4]) {
    let [a, b, c, e] = d.map(i32::from);
    let t0 = a + b;
    let t1 = a - b;
    let t2 = c + e;
    let t3 = c - e;
    *d = [t0 + t2, t0 - t2, t1 + t3, t1 - t3].map(|v| v as i16);
}
