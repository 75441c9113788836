//! Optimized scalar transforms.
//!
//! Residuals are loaded once into fixed-size row arrays and every 1D pass
//! works on whole `[i32; N]` vectors, which lets the compiler keep them in
//! registers. Pass order and intermediate precision follow the reference.

#[inline(always)]
fn clip_pixel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline(always)]
fn residual<const N: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> [[i32; N]; N] {
    let mut rows = [[0i32; N]; N];
    for (y, row) in rows.iter_mut().enumerate() {
        let a = &pix1[y * stride1..][..N];
        let b = &pix2[y * stride2..][..N];
        for x in 0..N {
            row[x] = a[x] as i32 - b[x] as i32;
        }
    }
    rows
}

#[inline(always)]
fn fdct4(v: [i32; 4]) -> [i32; 4] {
    let s03 = v[0] + v[3];
    let s12 = v[1] + v[2];
    let d03 = v[0] - v[3];
    let d12 = v[1] - v[2];
    [s03 + s12, 2 * d03 + d12, s03 - s12, d03 - 2 * d12]
}

#[inline(always)]
fn idct4(v: [i32; 4]) -> [i32; 4] {
    let s02 = v[0] + v[2];
    let d02 = v[0] - v[2];
    let s13 = v[1] + (v[3] >> 1);
    let d13 = (v[1] >> 1) - v[3];
    [s02 + s13, d02 + d13, d02 - d13, s02 - s13]
}

#[inline(always)]
fn column<const N: usize, T: Copy>(rows: &[[T; N]; N], x: usize) -> [T; N] {
    std::array::from_fn(|y| rows[y][x])
}

fn sub4x4(dct: &mut [i16], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    let d = residual::<4>(pix1, stride1, pix2, stride2);
    let h = d.map(fdct4);
    for x in 0..4 {
        let v = fdct4(column(&h, x));
        dct[x] = v[0] as i16;
        dct[4 + x] = v[1] as i16;
        dct[8 + x] = v[2] as i16;
        dct[12 + x] = v[3] as i16;
    }
}

fn sub8x8(dct: &mut [i16], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    let (top, bottom) = dct[..64].split_at_mut(32);
    let (b0, b1) = top.split_at_mut(16);
    let (b2, b3) = bottom.split_at_mut(16);
    let down1 = 4 * stride1;
    let down2 = 4 * stride2;
    sub4x4(b0, pix1, stride1, pix2, stride2);
    sub4x4(b1, &pix1[4..], stride1, &pix2[4..], stride2);
    sub4x4(b2, &pix1[down1..], stride1, &pix2[down2..], stride2);
    sub4x4(b3, &pix1[down1 + 4..], stride1, &pix2[down2 + 4..], stride2);
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
    for (q, out) in dct.chunks_exact_mut(64).enumerate() {
        let o1 = (q >> 1) * 8 * stride1 + (q & 1) * 8;
        let o2 = (q >> 1) * 8 * stride2 + (q & 1) * 8;
        sub8x8(out, &pix1[o1..], stride1, &pix2[o2..], stride2);
    }
}

fn add4x4(dst: &mut [u8], stride: usize, dct: &[i16]) {
    let mut rows = [[0i32; 4]; 4];
    for (y, row) in rows.iter_mut().enumerate() {
        *row = idct4(std::array::from_fn(|x| dct[y * 4 + x] as i32));
    }
    for x in 0..4 {
        let v = idct4(column(&rows, x));
        for y in 0..4 {
            let p = &mut dst[y * stride + x];
            *p = clip_pixel(*p as i32 + ((v[y] + 32) >> 6));
        }
    }
}

fn add8x8(dst: &mut [u8], stride: usize, dct: &[i16]) {
    add4x4(dst, stride, &dct[0..16]);
    add4x4(&mut dst[4..], stride, &dct[16..32]);
    add4x4(&mut dst[4 * stride..], stride, &dct[32..48]);
    add4x4(&mut dst[4 * stride + 4..], stride, &dct[48..64]);
}

pub fn add4x4_idct(dst: &mut [u8], stride: usize, dct: &mut [i16; 16]) {
    add4x4(dst, stride, dct);
}

pub fn add8x8_idct(dst: &mut [u8], stride: usize, dct: &mut [i16; 64]) {
    add8x8(dst, stride, dct);
}

pub fn add16x16_idct(dst: &mut [u8], stride: usize, dct: &mut [i16; 256]) {
    for (q, coefs) in dct.chunks_exact(64).enumerate() {
        let offset = (q >> 1) * 8 * stride + (q & 1) * 8;
        add8x8(&mut dst[offset..], stride, coefs);
    }
}

#[inline(always)]
fn fdct8(v: [i32; 8]) -> [i32; 8] {
    let [s07, s16, s25, s34] = [v[0] + v[7], v[1] + v[6], v[2] + v[5], v[3] + v[4]];
    let [d07, d16, d25, d34] = [v[0] - v[7], v[1] - v[6], v[2] - v[5], v[3] - v[4]];
    let a0 = s07 + s34;
    let a1 = s16 + s25;
    let a2 = s07 - s34;
    let a3 = s16 - s25;
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

#[inline(always)]
fn idct8(v: [i32; 8]) -> [i32; 8] {
    let a0 = v[0] + v[4];
    let a2 = v[0] - v[4];
    let a4 = (v[2] >> 1) - v[6];
    let a6 = (v[6] >> 1) + v[2];
    let [b0, b2, b4, b6] = [a0 + a6, a2 + a4, a2 - a4, a0 - a6];
    let a1 = v[5] - v[3] - v[7] - (v[7] >> 1);
    let a3 = v[1] + v[7] - v[3] - (v[3] >> 1);
    let a5 = v[7] - v[1] + v[5] + (v[5] >> 1);
    let a7 = v[3] + v[5] + v[1] + (v[1] >> 1);
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

/// Narrows to 16 bits the way the reference stores its first pass.
#[inline(always)]
fn narrow<const N: usize>(v: [i32; N]) -> [i32; N] {
    v.map(|x| x as i16 as i32)
}

fn sub8x8_8(dct: &mut [i16], pix1: &[u8], stride1: usize, pix2: &[u8], stride2: usize) {
    let d = residual::<8>(pix1, stride1, pix2, stride2);
    // cols[x][k]: vertical frequency k of column x.
    let cols: [[i32; 8]; 8] = std::array::from_fn(|x| narrow(fdct8(column(&d, x))));
    for k in 0..8 {
        let v = fdct8(column(&cols, k));
        for (h, &c) in v.iter().enumerate() {
            dct[h * 8 + k] = c as i16;
        }
    }
}

/// Works on a local copy, so `dct` is left untouched.
fn add8x8_8(dst: &mut [u8], stride: usize, dct: &[i16]) {
    let mut c: [[i32; 8]; 8] =
        std::array::from_fn(|r| std::array::from_fn(|x| dct[r * 8 + x] as i32));
    c[0][0] = (c[0][0] as i16).wrapping_add(32) as i32;

    let cols: [[i32; 8]; 8] = std::array::from_fn(|x| narrow(idct8(column(&c, x))));
    for i in 0..8 {
        let v = idct8(column(&cols, i));
        for (k, &r) in v.iter().enumerate() {
            let p = &mut dst[k * stride + i];
            *p = clip_pixel(*p as i32 + (r >> 6));
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
    for (q, out) in dct.chunks_exact_mut(64).enumerate() {
        let o1 = (q >> 1) * 8 * stride1 + (q & 1) * 8;
        let o2 = (q >> 1) * 8 * stride2 + (q & 1) * 8;
        sub8x8_8(out, &pix1[o1..], stride1, &pix2[o2..], stride2);
    }
}

pub fn add8x8_idct8(dst: &mut [u8], stride: usize, dct: &mut [i16; 64]) {
    add8x8_8(dst, stride, dct);
}

pub fn add16x16_idct8(dst: &mut [u8], stride: usize, dct: &mut [i16; 256]) {
    for (q, coefs) in dct.chunks_exact(64).enumerate() {
        let offset = (q >> 1) * 8 * stride + (q & 1) * 8;
        add8x8_8(&mut dst[offset..], stride, coefs);
    }
}

#[inline(always)]
fn hadamard4(v: [i32; 4]) -> [i32; 4] {
    let s01 = v[0] + v[1];
    let d01 = v[0] - v[1];
    let s23 = v[2] + v[3];
    let d23 = v[2] - v[3];
    [s01 + s23, s01 - s23, d01 - d23, d01 + d23]
}

#[inline(always)]
fn hadamard4x4(d: &[i16; 16]) -> [[i32; 4]; 4] {
    let rows: [[i32; 4]; 4] =
        std::array::from_fn(|y| hadamard4(std::array::from_fn(|x| d[y * 4 + x] as i32)));
    // out[x][k]: second-pass coefficient k of first-pass output x.
    std::array::from_fn(|x| hadamard4(column(&rows, x)))
}

pub fn dct4x4dc(d: &mut [i16; 16]) {
    let t = hadamard4x4(d);
    for (i, v) in t.iter().enumerate() {
        for k in 0..4 {
            d[k * 4 + i] = ((v[k] + 1) >> 1) as i16;
        }
    }
}

pub fn idct4x4dc(d: &mut [i16; 16]) {
    let t = hadamard4x4(d);
    for (i, v) in t.iter().enumerate() {
        for k in 0..4 {
            d[k * 4 + i] = v[k] as i16;
        }
    }
}

pub fn dct2x2dc(d: &mut [i16; 4]) {
    let v = d.map(i32::from);
    let (s0, d0) = (v[0] + v[1], v[0] - v[1]);
    let (s1, d1) = (v[2] + v[3], v[2] - v[3]);
    *d = [(s0 + s1) as i16, (s0 - s1) as i16, (d0 + d1) as i16, (d0 - d1) as i16];
}

pub fn idct2x2dc(d: &mut [i16; 4]) {
    dct2x2dc(d);
}
