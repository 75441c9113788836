//! Quantization implementations and their dispatch table.

pub mod cqm;
pub mod original;
pub mod scalar_opt;

pub use cqm::{CqmList, QuantTables, ScalingLists};

use crate::utils::{CpuFlags, Kernel};

/// `(dct, mf, qbits, f)`
pub type Quant8x8Fn = fn(&mut [i16; 64], &[i32; 64], u32, i32);
pub type Quant4x4Fn = fn(&mut [i16; 16], &[i32; 16], u32, i32);
/// `(dct, mf, qbits, f)` with a single DC multiplier.
pub type QuantDc4x4Fn = fn(&mut [i16; 16], i32, u32, i32);
pub type QuantDc2x2Fn = fn(&mut [i16; 4], i32, u32, i32);

/// Multipliers at or above this need 64-bit products.
pub const NARROW_MF_LIMIT: i32 = 1 << 15;

/// Quantization dispatch table for one capability level.
#[derive(Clone, Copy)]
pub struct QuantFunctions {
    pub quant_8x8: Kernel<Quant8x8Fn>,
    pub quant_4x4: Kernel<Quant4x4Fn>,
    pub quant_4x4_dc: Kernel<QuantDc4x4Fn>,
    pub quant_2x2_dc: Kernel<QuantDc2x2Fn>,
}

impl QuantFunctions {
    /// Selection depends on the multipliers the kernels will be fed.
    pub fn new(cpu: CpuFlags, tables: &QuantTables) -> Self {
        let mut qf = Self {
            quant_8x8: Kernel::new("original", original::quant_8x8 as Quant8x8Fn),
            quant_4x4: Kernel::new("original", original::quant_4x4 as Quant4x4Fn),
            quant_4x4_dc: Kernel::new("original", original::quant_4x4_dc as QuantDc4x4Fn),
            quant_2x2_dc: Kernel::new("original", original::quant_2x2_dc as QuantDc2x2Fn),
        };

        if cpu.contains(CpuFlags::SCALAR_OPT) {
            qf = if tables.max_mf() < NARROW_MF_LIMIT {
                Self {
                    quant_8x8: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_8x8_narrow as Quant8x8Fn,
                    ),
                    quant_4x4: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_4x4_narrow as Quant4x4Fn,
                    ),
                    quant_4x4_dc: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_4x4_dc_narrow as QuantDc4x4Fn,
                    ),
                    quant_2x2_dc: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_2x2_dc_narrow as QuantDc2x2Fn,
                    ),
                }
            } else {
                Self {
                    quant_8x8: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_8x8_wide as Quant8x8Fn,
                    ),
                    quant_4x4: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_4x4_wide as Quant4x4Fn,
                    ),
                    quant_4x4_dc: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_4x4_dc_wide as QuantDc4x4Fn,
                    ),
                    quant_2x2_dc: Kernel::new(
                        "scalar_opt",
                        scalar_opt::quant_2x2_dc_wide as QuantDc2x2Fn,
                    ),
                }
            };
        }

        qf
    }
}
