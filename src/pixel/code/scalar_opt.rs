//! Optimized scalar pixel metrics.
//!
//! Rows are processed four samples at a time with independent accumulators
//! to shorten dependency chains.

#[inline(always)]
fn abs_diff4(a: &[u8], b: &[u8]) -> [i32; 4] {
    [
        (a[0] as i32 - b[0] as i32).abs(),
        (a[1] as i32 - b[1] as i32).abs(),
        (a[2] as i32 - b[2] as i32).abs(),
        (a[3] as i32 - b[3] as i32).abs(),
    ]
}

/// SAD with 4x unrolling.
pub fn sad<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    let mut acc = [0i32; 4];
    for y in 0..H {
        let row1 = &pix1[y * stride1..][..W];
        let row2 = &pix2[y * stride2..][..W];
        for (a, b) in row1.chunks_exact(4).zip(row2.chunks_exact(4)) {
            let d = abs_diff4(a, b);
            acc[0] += d[0];
            acc[1] += d[1];
            acc[2] += d[2];
            acc[3] += d[3];
        }
    }
    (acc[0] + acc[1]) + (acc[2] + acc[3])
}

/// SSD with 4x unrolling.
pub fn ssd<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    let mut acc = [0i32; 4];
    for y in 0..H {
        let row1 = &pix1[y * stride1..][..W];
        let row2 = &pix2[y * stride2..][..W];
        for (a, b) in row1.chunks_exact(4).zip(row2.chunks_exact(4)) {
            for i in 0..4 {
                let d = a[i] as i32 - b[i] as i32;
                acc[i] += d * d;
            }
        }
    }
    (acc[0] + acc[1]) + (acc[2] + acc[3])
}

/// 4-point Hadamard butterfly; output order does not matter for SATD.
#[inline(always)]
fn hadamard4(v: [i32; 4]) -> [i32; 4] {
    let s01 = v[0] + v[1];
    let s23 = v[2] + v[3];
    let d01 = v[0] - v[1];
    let d23 = v[2] - v[3];
    [s01 + s23, s01 - s23, d01 + d23, d01 - d23]
}

/// SATD transforming columns first, then rows.
///
/// The 2D Hadamard transform is separable, so the set of coefficients (and
/// their absolute sum) matches the row-first reference.
pub fn satd<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    let mut total = 0;
    for by in (0..H).step_by(4) {
        for bx in (0..W).step_by(4) {
            let mut rows = [[0i32; 4]; 4];
            for (y, row) in rows.iter_mut().enumerate() {
                let a = &pix1[(by + y) * stride1 + bx..][..4];
                let b = &pix2[(by + y) * stride2 + bx..][..4];
                for x in 0..4 {
                    row[x] = a[x] as i32 - b[x] as i32;
                }
            }

            let mut cols = [[0i32; 4]; 4];
            for x in 0..4 {
                cols[x] = hadamard4([rows[0][x], rows[1][x], rows[2][x], rows[3][x]]);
            }
            for y in 0..4 {
                let t = hadamard4([cols[0][y], cols[1][y], cols[2][y], cols[3][y]]);
                total += t[0].abs() + t[1].abs() + t[2].abs() + t[3].abs();
            }
        }
    }
    total / 2
}
