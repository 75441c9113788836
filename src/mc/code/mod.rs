//! Motion compensation implementations and their dispatch table.

pub mod original;
pub mod scalar_opt;
#[cfg(target_arch = "x86_64")]
pub mod x86_64_sse2;

use crate::utils::{CpuFlags, Kernel};

/// `(planes, src_stride, dst, dst_stride, mvx, mvy, w, h)`, quarter-pel.
pub type McLumaFn = fn(&[&[u8]; 4], usize, &mut [u8], usize, i32, i32, usize, usize);
/// `(src, src_stride, dst, dst_stride, mvx, mvy, w, h)`, eighth-pel.
pub type McChromaFn = fn(&[u8], usize, &mut [u8], usize, i32, i32, usize, usize);
/// `(dst, dst_stride, src, src_stride)`
pub type AvgFn = fn(&mut [u8], usize, &[u8], usize);
/// `(dst, dst_stride, src, src_stride, weight)`
pub type AvgWeightFn = fn(&mut [u8], usize, &[u8], usize, i32);

macro_rules! avg_sizes {
    ($name:literal, $module:ident :: $kernel:ident, $ty:ty) => {
        [
            Kernel::new($name, $module::$kernel::<16, 16> as $ty),
            Kernel::new($name, $module::$kernel::<16, 8> as $ty),
            Kernel::new($name, $module::$kernel::<8, 16> as $ty),
            Kernel::new($name, $module::$kernel::<8, 8> as $ty),
            Kernel::new($name, $module::$kernel::<8, 4> as $ty),
            Kernel::new($name, $module::$kernel::<4, 8> as $ty),
            Kernel::new($name, $module::$kernel::<4, 4> as $ty),
            Kernel::new($name, $module::$kernel::<4, 2> as $ty),
            Kernel::new($name, $module::$kernel::<2, 4> as $ty),
            Kernel::new($name, $module::$kernel::<2, 2> as $ty),
        ]
    };
}

/// Replaces the 16- and 8-wide entries (indices 0..5).
#[cfg(target_arch = "x86_64")]
macro_rules! wide_avg_sizes {
    ($table:expr, $name:literal, $module:ident :: $kernel:ident, $ty:ty) => {{
        let table: &mut [Kernel<$ty>; 10] = $table;
        table[0] = Kernel::new($name, $module::$kernel::<16, 16> as $ty);
        table[1] = Kernel::new($name, $module::$kernel::<16, 8> as $ty);
        table[2] = Kernel::new($name, $module::$kernel::<8, 16> as $ty);
        table[3] = Kernel::new($name, $module::$kernel::<8, 8> as $ty);
        table[4] = Kernel::new($name, $module::$kernel::<8, 4> as $ty);
    }};
}

/// Motion compensation dispatch table for one capability level.
#[derive(Clone, Copy)]
pub struct McFunctions {
    pub mc_luma: Kernel<McLumaFn>,
    pub mc_chroma: Kernel<McChromaFn>,
    /// One entry per [`AVG_SIZES`](super::AVG_SIZES) shape.
    pub avg: [Kernel<AvgFn>; 10],
    pub avg_weight: [Kernel<AvgWeightFn>; 10],
}

impl McFunctions {
    pub fn new(cpu: CpuFlags) -> Self {
        let mut mc = Self {
            mc_luma: Kernel::new("original", original::mc_luma as McLumaFn),
            mc_chroma: Kernel::new("original", original::mc_chroma as McChromaFn),
            avg: avg_sizes!("original", original::avg, AvgFn),
            avg_weight: avg_sizes!("original", original::avg_weight, AvgWeightFn),
        };

        if cpu.contains(CpuFlags::SCALAR_OPT) {
            mc.mc_luma = Kernel::new("scalar_opt", scalar_opt::mc_luma as McLumaFn);
            mc.mc_chroma = Kernel::new("scalar_opt", scalar_opt::mc_chroma as McChromaFn);
            mc.avg = avg_sizes!("scalar_opt", scalar_opt::avg, AvgFn);
            mc.avg_weight = avg_sizes!("scalar_opt", scalar_opt::avg_weight, AvgWeightFn);
        }

        #[cfg(target_arch = "x86_64")]
        {
            if cpu.contains(CpuFlags::SSE2) {
                mc.mc_luma = Kernel::new("x86_64-sse2", x86_64_sse2::mc_luma as McLumaFn);
                wide_avg_sizes!(&mut mc.avg, "x86_64-sse2", x86_64_sse2::avg, AvgFn);
                wide_avg_sizes!(
                    &mut mc.avg_weight,
                    "x86_64-sse2",
                    x86_64_sse2::avg_weight,
                    AvgWeightFn
                );
            }
        }

        mc
    }
}
