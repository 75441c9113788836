//! Reference pixel metrics.
//!
//! Plain loops over a `W`x`H` block. These define the expected results for
//! every other implementation.

/// Sum of absolute differences.
pub fn sad<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    let mut sum = 0;
    for y in 0..H {
        let row1 = &pix1[y * stride1..][..W];
        let row2 = &pix2[y * stride2..][..W];
        for x in 0..W {
            sum += (row1[x] as i32 - row2[x] as i32).abs();
        }
    }
    sum
}

/// Sum of squared differences.
pub fn ssd<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    let mut sum = 0;
    for y in 0..H {
        let row1 = &pix1[y * stride1..][..W];
        let row2 = &pix2[y * stride2..][..W];
        for x in 0..W {
            let d = row1[x] as i32 - row2[x] as i32;
            sum += d * d;
        }
    }
    sum
}

/// Sum of absolute Hadamard-transformed differences, halved.
///
/// The block is split into 4x4 sub-blocks; each residual is transformed
/// horizontally then vertically. The halving happens once on the total.
pub fn satd<const W: usize, const H: usize>(
    pix1: &[u8],
    stride1: usize,
    pix2: &[u8],
    stride2: usize,
) -> i32 {
    let mut total = 0;
    for by in (0..H).step_by(4) {
        for bx in (0..W).step_by(4) {
            let mut diff = [[0i32; 4]; 4];
            for (y, row) in diff.iter_mut().enumerate() {
                for (x, d) in row.iter_mut().enumerate() {
                    *d = pix1[(by + y) * stride1 + bx + x] as i32
                        - pix2[(by + y) * stride2 + bx + x] as i32;
                }
            }

            let mut tmp = [[0i32; 4]; 4];
            for d in 0..4 {
                let s01 = diff[d][0] + diff[d][1];
                let s23 = diff[d][2] + diff[d][3];
                let d01 = diff[d][0] - diff[d][1];
                let d23 = diff[d][2] - diff[d][3];
                tmp[d] = [s01 + s23, s01 - s23, d01 - d23, d01 + d23];
            }
            for d in 0..4 {
                let s01 = tmp[0][d] + tmp[1][d];
                let s23 = tmp[2][d] + tmp[3][d];
                let d01 = tmp[0][d] - tmp[1][d];
                let d23 = tmp[2][d] - tmp[3][d];
                total += (s01 + s23).abs()
                    + (s01 - s23).abs()
                    + (d01 - d23).abs()
                    + (d01 + d23).abs();
            }
        }
    }
    total / 2
}
