//! Shared infrastructure: buffers, CPU tiers, reporting and the driver loop.

pub mod arena;
pub mod cpu;
pub mod report;
pub mod runner;
pub mod seed;
pub mod tui;

// Re-export commonly used items
pub use arena::{AlignedBlock, AlignedBuf, Inputs, Outputs, Scratch, TestBuffers};
pub use cpu::{CpuFlags, Tier, TierPair};
pub use report::{ComparisonResult, Mismatch, Outcome, Params, Reporter, SubTestId, Verdict};
pub use seed::{parse_seed, time_seed};

/// One implementation of a kernel.
/// Generic over F which is the function signature.
#[derive(Clone, Copy, Debug)]
pub struct Kernel<F> {
    /// Implementation identity (e.g., "original", "x86_64-sse2")
    pub name: &'static str,
    /// The specific implementation function
    pub function: F,
}

impl<F> Kernel<F> {
    pub const fn new(name: &'static str, function: F) -> Self {
        Self { name, function }
    }
}

impl<F: PartialEq> Kernel<F> {
    /// Two entries are the same implementation when both the name and the
    /// function pointer match. A renamed copy of a kernel, or a different
    /// kernel registered under an old name, counts as new.
    pub fn same_impl(&self, other: &Self) -> bool {
        self.name == other.name && self.function == other.function
    }
}
