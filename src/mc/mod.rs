//! # Motion Compensation
//!
//! - **luma**: quarter-pel prediction averaging two of four precomputed
//!   half-pel planes;
//! - **chroma**: eighth-pel bilinear interpolation;
//! - **avg**: bi-prediction average `(dst + src + 1) >> 1`;
//! - **avg_weight**: weighted bi-prediction with weights `w` and `64 - w`.

pub mod code;
pub mod test;

pub use code::*;

use std::ops::RangeInclusive;

use crate::check::{Context, GroupCheck};
use crate::dispatch::{KernelProvider, TierTables};
use crate::registry::FamilyChecker;
use crate::utils::arena::{CHECK_SIZE, SENTINEL, SRC2_STRIDE, STRIDE};
use crate::utils::{Params, Reporter, Scratch, SubTestId, TierPair};

/// Luma block shapes, same order as the pixel partitions.
pub const LUMA_SIZES: [(usize, usize); 7] = crate::pixel::PARTITIONS;
pub const CHROMA_SIZES: [(usize, usize); 7] =
    [(8, 8), (8, 4), (4, 8), (4, 4), (4, 2), (2, 4), (2, 2)];
/// Averaging shapes, indexed by variant.
pub const AVG_SIZES: [(usize, usize); 10] = [
    (16, 16),
    (16, 8),
    (8, 16),
    (8, 8),
    (8, 4),
    (4, 8),
    (4, 4),
    (4, 2),
    (2, 4),
    (2, 2),
];

/// First row of each half-pel plane inside the first source buffer.
/// Staggering them makes a wrong plane selection visible.
pub const LUMA_PLANE_ROWS: [usize; 4] = [2, 7, 12, 17];
/// Sources and destinations start two rows and two columns in.
pub const MC_OFFSET: usize = 2 * STRIDE + 2;
pub const MC_DST_STRIDE: usize = 16;
pub const WEIGHTS: RangeInclusive<i32> = -64..=128;

/// Checker for the motion compensation family
pub struct McChecker;

impl FamilyChecker for McChecker {
    fn name(&self) -> &'static str {
        "mc"
    }

    fn description(&self) -> &'static str {
        "Luma and chroma sub-pel prediction, plain and weighted averaging"
    }

    fn check(
        &self,
        provider: &dyn KernelProvider,
        pair: &TierPair,
        ctx: &mut Context,
        reporter: &mut Reporter,
    ) -> bool {
        let tables = TierTables::build(pair, |cpu| provider.mc(cpu));
        let (inputs, mut outputs) = ctx.bufs.split();
        let src1 = inputs.src1;
        let planes: [&[u8]; 4] = LUMA_PLANE_ROWS.map(|row| &src1[row * STRIDE + 2..]);
        let mut ok = true;

        let mut group = GroupCheck::new(reporter, "mc luma");
        for dy in 0..4 {
            for dx in 0..4 {
                for &(w, h) in &LUMA_SIZES {
                    let id = SubTestId::new("mc_luma").params(Params::Motion { dx, dy, w, h });
                    group.compare(
                        tables.pick(|t| &t.mc_luma),
                        id,
                        outputs.prefix(CHECK_SIZE),
                        |dst| dst.clear(SENTINEL),
                        |f, dst| {
                            f(
                                &planes,
                                STRIDE,
                                &mut dst[MC_OFFSET..],
                                MC_DST_STRIDE,
                                dx,
                                dy,
                                w,
                                h,
                            )
                        },
                    );
                }
            }
        }
        ok &= group.finish();

        let mut group = GroupCheck::new(reporter, "mc chroma");
        for dy in 0..9 {
            for dx in 0..9 {
                for &(w, h) in &CHROMA_SIZES {
                    let id = SubTestId::new("mc_chroma").params(Params::Motion { dx, dy, w, h });
                    group.compare(
                        tables.pick(|t| &t.mc_chroma),
                        id,
                        outputs.prefix(CHECK_SIZE),
                        |dst| dst.clear(SENTINEL),
                        |f, dst| {
                            f(
                                &src1[MC_OFFSET..],
                                STRIDE,
                                &mut dst[MC_OFFSET..],
                                MC_DST_STRIDE,
                                dx,
                                dy,
                                w,
                                h,
                            )
                        },
                    );
                }
            }
        }
        ok &= group.finish();

        let mut group = GroupCheck::new(reporter, "mc avg");
        for (i, &(w, h)) in AVG_SIZES.iter().enumerate() {
            let id = SubTestId::new("avg").variant(i).params(Params::Block { w, h });
            group.compare(
                tables.pick(|t| &t.avg[i]),
                id,
                outputs.prefix(CHECK_SIZE),
                |dst| dst.copy_from(&src1[..CHECK_SIZE]),
                |f, dst| f(dst, STRIDE, inputs.src2, SRC2_STRIDE),
            );
        }
        ok &= group.finish();

        // The sweep ends at the first weight with a failure, so a broken
        // kernel is reported once rather than for every remaining weight.
        let mut group = GroupCheck::new(reporter, "mc wpredb");
        for weight in WEIGHTS {
            for i in 0..AVG_SIZES.len() {
                let id = SubTestId::new("avg_weight")
                    .variant(i)
                    .params(Params::Weight(weight));
                group.compare(
                    tables.pick(|t| &t.avg_weight[i]),
                    id,
                    outputs.prefix(CHECK_SIZE),
                    |dst| dst.copy_from(&src1[..CHECK_SIZE]),
                    |f, dst| f(dst, STRIDE, inputs.src2, SRC2_STRIDE, weight),
                );
            }
            if !group.ok() || group.exercised() == 0 {
                break;
            }
        }
        ok &= group.finish();

        ok
    }
}
