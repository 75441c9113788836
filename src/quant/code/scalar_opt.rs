//! Optimized scalar quantization.
//!
//! Both variants fold the sign out: quantize `|coef|` and negate the result
//! for non-positive inputs, which is the same as the two-branch rule. The
//! narrow kernels work in 32 bits and are only valid while every multiplier
//! is below `1 << 15`; past that the wide kernels use 64-bit products.

#[inline(always)]
fn quant_narrow(coef: i16, mf: i32, qbits: u32, f: i32) -> i16 {
    let c = coef as i32;
    let q = (f + c.abs() * mf) >> qbits;
    (if c > 0 { q } else { -q }) as i16
}

#[inline(always)]
fn quant_wide(coef: i16, mf: i32, qbits: u32, f: i32) -> i16 {
    let c = coef as i64;
    let q = (f as i64 + c.abs() * mf as i64) >> qbits;
    (if c > 0 { q } else { -q }) as i16
}

macro_rules! quant_kernels {
    ($one:ident, $block:ident, $b8:ident, $b4:ident, $dc4:ident, $dc2:ident) => {
        #[inline(always)]
        fn $block(dct: &mut [i16], mf: &[i32], qbits: u32, f: i32) {
            for (c, m) in dct.chunks_exact_mut(4).zip(mf.chunks_exact(4)) {
                c[0] = $one(c[0], m[0], qbits, f);
                c[1] = $one(c[1], m[1], qbits, f);
                c[2] = $one(c[2], m[2], qbits, f);
                c[3] = $one(c[3], m[3], qbits, f);
            }
        }

        pub fn $b8(dct: &mut [i16; 64], mf: &[i32; 64], qbits: u32, f: i32) {
            $block(dct, mf, qbits, f);
        }

        pub fn $b4(dct: &mut [i16; 16], mf: &[i32; 16], qbits: u32, f: i32) {
            $block(dct, mf, qbits, f);
        }

        pub fn $dc4(dct: &mut [i16; 16], mf: i32, qbits: u32, f: i32) {
            $block(dct, &[mf; 16], qbits, f);
        }

        pub fn $dc2(dct: &mut [i16; 4], mf: i32, qbits: u32, f: i32) {
            $block(dct, &[mf; 4], qbits, f);
        }
    };
}

quant_kernels!(
    quant_narrow,
    quant_block_narrow,
    quant_8x8_narrow,
    quant_4x4_narrow,
    quant_4x4_dc_narrow,
    quant_2x2_dc_narrow
);

quant_kernels!(
    quant_wide,
    quant_block_wide,
    quant_8x8_wide,
    quant_4x4_wide,
    quant_4x4_dc_wide,
    quant_2x2_dc_wide
);
