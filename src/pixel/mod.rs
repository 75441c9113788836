//! # Pixel Metrics
//!
//! Block distortion metrics between two 8-bit sample blocks:
//!
//! - **SAD**: `Σ|a - b|`
//! - **SSD**: `Σ(a - b)²`
//! - **SATD**: half the absolute sum of the 4x4 Hadamard transform of `a - b`
//!
//! Each metric exists for the seven partition shapes in [`PARTITIONS`].

pub mod code;
pub mod test;

pub use code::*;

use crate::check::{Context, GroupCheck};
use crate::dispatch::{KernelProvider, TierTables};
use crate::registry::FamilyChecker;
use crate::utils::arena::{SRC2_STRIDE, STRIDE};
use crate::utils::{Params, Reporter, SubTestId, TierPair};

/// Partition shapes `(width, height)`, indexed by variant.
pub const PARTITIONS: [(usize, usize); 7] =
    [(16, 16), (16, 8), (8, 16), (8, 8), (8, 4), (4, 8), (4, 4)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Sad,
    Ssd,
    Satd,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Sad, Metric::Ssd, Metric::Satd];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Sad => "sad",
            Metric::Ssd => "ssd",
            Metric::Satd => "satd",
        }
    }

    /// Report group label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Sad => "pixel sad",
            Metric::Ssd => "pixel ssd",
            Metric::Satd => "pixel satd",
        }
    }
}

/// Checker for the pixel metric family
pub struct PixelChecker;

impl FamilyChecker for PixelChecker {
    fn name(&self) -> &'static str {
        "pixel"
    }

    fn description(&self) -> &'static str {
        "SAD, SSD and SATD over seven partition shapes"
    }

    fn check(
        &self,
        provider: &dyn KernelProvider,
        pair: &TierPair,
        ctx: &mut Context,
        reporter: &mut Reporter,
    ) -> bool {
        let tables = TierTables::build(pair, |cpu| provider.pixel(cpu));
        let inputs = ctx.bufs.inputs();

        let mut ok = true;
        for metric in Metric::ALL {
            let mut group = GroupCheck::new(reporter, metric.label());
            for (i, &(w, h)) in PARTITIONS.iter().enumerate() {
                let id = SubTestId::new(metric.name())
                    .variant(i)
                    .params(Params::Block { w, h });
                group.compare_value(tables.pick(|t| &t.metric(metric)[i]), id, |f| {
                    f(inputs.src1, STRIDE, inputs.src2, SRC2_STRIDE)
                });
            }
            ok &= group.finish();
        }
        ok
    }
}
