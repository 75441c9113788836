//! Pixel metric implementations and their dispatch table.

pub mod original;
pub mod scalar_opt;
#[cfg(target_arch = "x86_64")]
pub mod x86_64_sse2;

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub mod x86_64_avx2;

use super::Metric;
use crate::utils::{CpuFlags, Kernel};

/// Type alias for the metric signature: `(pix1, stride1, pix2, stride2)`.
pub type PixelCmpFn = fn(&[u8], usize, &[u8], usize) -> i32;

/// One kernel per partition, in [`PARTITIONS`](super::PARTITIONS) order.
pub type PartitionKernels = [Kernel<PixelCmpFn>; 7];

macro_rules! partitions {
    ($name:literal, $module:ident :: $kernel:ident) => {
        [
            Kernel::new($name, $module::$kernel::<16, 16> as PixelCmpFn),
            Kernel::new($name, $module::$kernel::<16, 8> as PixelCmpFn),
            Kernel::new($name, $module::$kernel::<8, 16> as PixelCmpFn),
            Kernel::new($name, $module::$kernel::<8, 8> as PixelCmpFn),
            Kernel::new($name, $module::$kernel::<8, 4> as PixelCmpFn),
            Kernel::new($name, $module::$kernel::<4, 8> as PixelCmpFn),
            Kernel::new($name, $module::$kernel::<4, 4> as PixelCmpFn),
        ]
    };
}

/// Replaces the 16- and 8-wide entries (indices 0..5).
#[cfg(target_arch = "x86_64")]
macro_rules! wide_partitions {
    ($table:expr, $name:literal, $module:ident :: $kernel:ident) => {{
        let table: &mut PartitionKernels = $table;
        table[0] = Kernel::new($name, $module::$kernel::<16, 16> as PixelCmpFn);
        table[1] = Kernel::new($name, $module::$kernel::<16, 8> as PixelCmpFn);
        table[2] = Kernel::new($name, $module::$kernel::<8, 16> as PixelCmpFn);
        table[3] = Kernel::new($name, $module::$kernel::<8, 8> as PixelCmpFn);
        table[4] = Kernel::new($name, $module::$kernel::<8, 4> as PixelCmpFn);
    }};
}

/// Pixel dispatch table for one capability level.
#[derive(Clone, Copy)]
pub struct PixelFunctions {
    pub sad: PartitionKernels,
    pub ssd: PartitionKernels,
    pub satd: PartitionKernels,
}

impl PixelFunctions {
    pub fn new(cpu: CpuFlags) -> Self {
        let mut pf = Self {
            sad: partitions!("original", original::sad),
            ssd: partitions!("original", original::ssd),
            satd: partitions!("original", original::satd),
        };

        if cpu.contains(CpuFlags::SCALAR_OPT) {
            pf.sad = partitions!("scalar_opt", scalar_opt::sad);
            pf.ssd = partitions!("scalar_opt", scalar_opt::ssd);
            pf.satd = partitions!("scalar_opt", scalar_opt::satd);
        }

        #[cfg(target_arch = "x86_64")]
        {
            if cpu.contains(CpuFlags::SSE2) {
                wide_partitions!(&mut pf.sad, "x86_64-sse2", x86_64_sse2::sad);
                wide_partitions!(&mut pf.ssd, "x86_64-sse2", x86_64_sse2::ssd);
            }
        }

        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        {
            if cpu.contains(CpuFlags::AVX2) {
                pf.sad[0] = Kernel::new("x86_64-avx2", x86_64_avx2::sad_16xh::<16> as PixelCmpFn);
                pf.sad[1] = Kernel::new("x86_64-avx2", x86_64_avx2::sad_16xh::<8> as PixelCmpFn);
            }
        }

        pf
    }

    pub fn metric(&self, metric: Metric) -> &PartitionKernels {
        match metric {
            Metric::Sad => &self.sad,
            Metric::Ssd => &self.ssd,
            Metric::Satd => &self.satd,
        }
    }

    pub fn metric_mut(&mut self, metric: Metric) -> &mut PartitionKernels {
        match metric {
            Metric::Sad => &mut self.sad,
            Metric::Ssd => &mut self.ssd,
            Metric::Satd => &mut self.satd,
        }
    }
}
