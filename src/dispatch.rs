//! Dispatch-table construction.
//!
//! A [`KernelProvider`] turns a [`CpuFlags`] set into the per-family tables
//! of implementations. [`Native`] builds the tables shipped with this crate;
//! tests substitute their own providers to inject faulty kernels.

use crate::check::Candidates;
use crate::dct::DctFunctions;
use crate::mc::McFunctions;
use crate::pixel::PixelFunctions;
use crate::quant::{QuantFunctions, QuantTables};
use crate::utils::{CpuFlags, Kernel, TierPair};

/// Builds dispatch tables for a capability level.
///
/// Every method defaults to the native tables.
pub trait KernelProvider {
    fn pixel(&self, cpu: CpuFlags) -> PixelFunctions {
        PixelFunctions::new(cpu)
    }

    fn dct(&self, cpu: CpuFlags) -> DctFunctions {
        DctFunctions::new(cpu)
    }

    fn mc(&self, cpu: CpuFlags) -> McFunctions {
        McFunctions::new(cpu)
    }

    /// Quant dispatch depends on the derived multiplier tables.
    fn quant(&self, cpu: CpuFlags, tables: &QuantTables) -> QuantFunctions {
        QuantFunctions::new(cpu, tables)
    }
}

/// The kernels compiled into this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Native;

impl KernelProvider for Native {}

/// The three tables one family check works from.
pub struct TierTables<T> {
    /// Pure original implementations.
    pub reference: T,
    pub baseline: T,
    pub candidate: T,
}

impl<T> TierTables<T> {
    pub fn build(pair: &TierPair, mut build: impl FnMut(CpuFlags) -> T) -> Self {
        tracing::debug!(
            table = std::any::type_name::<T>(),
            baseline = %pair.baseline.cpu,
            candidate = %pair.candidate.cpu,
            "building dispatch tables"
        );
        Self {
            reference: build(CpuFlags::NONE),
            baseline: build(pair.baseline.cpu),
            candidate: build(pair.candidate.cpu),
        }
    }

    /// Selects the same entry from all three tables.
    pub fn pick<'a, F>(&'a self, select: impl Fn(&'a T) -> &'a Kernel<F>) -> Candidates<'a, F> {
        Candidates {
            reference: select(&self.reference),
            baseline: select(&self.baseline),
            candidate: select(&self.candidate),
        }
    }
}
