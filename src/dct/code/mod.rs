//! Transform implementations and their dispatch table.

pub mod original;
pub mod scalar_opt;

use crate::utils::{CpuFlags, Kernel};

/// `(coefficients, pix1, stride1, pix2, stride2)`: transform of `pix1 - pix2`.
pub type SubDctFn<const N: usize> = fn(&mut [i16; N], &[u8], usize, &[u8], usize);
/// `(dst, stride, coefficients)`: adds the inverse transform to `dst`.
/// The coefficients may be clobbered.
pub type AddIdctFn<const N: usize> = fn(&mut [u8], usize, &mut [i16; N]);
/// In-place 4x4 DC Hadamard.
pub type Dc4x4Fn = fn(&mut [i16; 16]);
/// In-place 2x2 DC Hadamard.
pub type Dc2x2Fn = fn(&mut [i16; 4]);

/// Transform dispatch table for one capability level.
#[derive(Clone, Copy)]
pub struct DctFunctions {
    pub sub4x4_dct: Kernel<SubDctFn<16>>,
    pub sub8x8_dct: Kernel<SubDctFn<64>>,
    pub sub16x16_dct: Kernel<SubDctFn<256>>,
    pub sub8x8_dct8: Kernel<SubDctFn<64>>,
    pub sub16x16_dct8: Kernel<SubDctFn<256>>,

    pub add4x4_idct: Kernel<AddIdctFn<16>>,
    pub add8x8_idct: Kernel<AddIdctFn<64>>,
    pub add16x16_idct: Kernel<AddIdctFn<256>>,
    pub add8x8_idct8: Kernel<AddIdctFn<64>>,
    pub add16x16_idct8: Kernel<AddIdctFn<256>>,

    pub dct4x4dc: Kernel<Dc4x4Fn>,
    pub idct4x4dc: Kernel<Dc4x4Fn>,
    pub dct2x2dc: Kernel<Dc2x2Fn>,
    pub idct2x2dc: Kernel<Dc2x2Fn>,
}

macro_rules! dct_table {
    ($name:literal, $module:ident) => {
        DctFunctions {
            sub4x4_dct: Kernel::new($name, $module::sub4x4_dct as SubDctFn<16>),
            sub8x8_dct: Kernel::new($name, $module::sub8x8_dct as SubDctFn<64>),
            sub16x16_dct: Kernel::new($name, $module::sub16x16_dct as SubDctFn<256>),
            sub8x8_dct8: Kernel::new($name, $module::sub8x8_dct8 as SubDctFn<64>),
            sub16x16_dct8: Kernel::new($name, $module::sub16x16_dct8 as SubDctFn<256>),
            add4x4_idct: Kernel::new($name, $module::add4x4_idct as AddIdctFn<16>),
            add8x8_idct: Kernel::new($name, $module::add8x8_idct as AddIdctFn<64>),
            add16x16_idct: Kernel::new($name, $module::add16x16_idct as AddIdctFn<256>),
            add8x8_idct8: Kernel::new($name, $module::add8x8_idct8 as AddIdctFn<64>),
            add16x16_idct8: Kernel::new($name, $module::add16x16_idct8 as AddIdctFn<256>),
            dct4x4dc: Kernel::new($name, $module::dct4x4dc as Dc4x4Fn),
            idct4x4dc: Kernel::new($name, $module::idct4x4dc as Dc4x4Fn),
            dct2x2dc: Kernel::new($name, $module::dct2x2dc as Dc2x2Fn),
            idct2x2dc: Kernel::new($name, $module::idct2x2dc as Dc2x2Fn),
        }
    };
}

impl DctFunctions {
    pub fn new(cpu: CpuFlags) -> Self {
        if cpu.contains(CpuFlags::SCALAR_OPT) {
            dct_table!("scalar_opt", scalar_opt)
        } else {
            dct_table!("original", original)
        }
    }

    pub fn dc4x4(&self, op: super::DcTransform) -> &Kernel<Dc4x4Fn> {
        match op {
            super::DcTransform::Forward => &self.dct4x4dc,
            super::DcTransform::Inverse => &self.idct4x4dc,
        }
    }

    pub fn dc2x2(&self, op: super::DcTransform) -> &Kernel<Dc2x2Fn> {
        match op {
            super::DcTransform::Forward => &self.dct2x2dc,
            super::DcTransform::Inverse => &self.idct2x2dc,
        }
    }
}
