//! Reference quantization.

/// `coef > 0`: `(f + coef * mf) >> qbits`, otherwise
/// `-((f - coef * mf) >> qbits)`.
#[inline]
fn quant_one(coef: &mut i16, mf: i32, qbits: u32, f: i32) {
    let c = *coef as i64;
    let (mf, f) = (mf as i64, f as i64);
    let q = if c > 0 {
        (f + c * mf) >> qbits
    } else {
        -((f - c * mf) >> qbits)
    };
    *coef = q as i16;
}

pub fn quant_8x8(dct: &mut [i16; 64], mf: &[i32; 64], qbits: u32, f: i32) {
    for (coef, &mf) in dct.iter_mut().zip(mf) {
        quant_one(coef, mf, qbits, f);
    }
}

pub fn quant_4x4(dct: &mut [i16; 16], mf: &[i32; 16], qbits: u32, f: i32) {
    for (coef, &mf) in dct.iter_mut().zip(mf) {
        quant_one(coef, mf, qbits, f);
    }
}

/// DC block: one multiplier for every coefficient.
pub fn quant_4x4_dc(dct: &mut [i16; 16], mf: i32, qbits: u32, f: i32) {
    for coef in dct.iter_mut() {
        quant_one(coef, mf, qbits, f);
    }
}

pub fn quant_2x2_dc(dct: &mut [i16; 4], mf: i32, qbits: u32, f: i32) {
    for coef in dct.iter_mut() {
        quant_one(coef, mf, qbits, f);
    }
}
