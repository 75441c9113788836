//! # Quantization
//!
//! Fixed-point quantization of transform coefficients with per-position
//! multipliers derived from the active scaling lists:
//!
//! - **quant_8x8** / **quant_4x4**: one multiplier per coefficient;
//! - **quant_4x4_dc** / **quant_2x2_dc**: a single DC multiplier.
//!
//! The kernels depend on the derived [`QuantTables`], so the checker
//! rebuilds tables and dispatch for each scaling list preset.

pub mod code;
pub mod test;

pub use code::*;

use rand::Rng;

use crate::check::{Context, GroupCheck};
use crate::dispatch::{KernelProvider, TierTables};
use crate::registry::FamilyChecker;
use crate::utils::{AlignedBlock, Params, Reporter, SubTestId, TierPair};

/// Quantization step, as for `qp = 0`.
pub const QBITS: u32 = 20;
/// Rounding offset of an intra block: a sixth of a step.
pub const ROUNDING: i32 = (1 << 20) / 6;

/// Coefficients in `[0, 4095]`, fresh for every sub-test.
fn random_coefs<const N: usize>(rng: &mut impl Rng) -> [i16; N] {
    std::array::from_fn(|_| (rng.random::<u16>() & 0xfff) as i16)
}

/// Checker for the quantization family
pub struct QuantChecker;

impl FamilyChecker for QuantChecker {
    fn name(&self) -> &'static str {
        "quant"
    }

    fn description(&self) -> &'static str {
        "8x8, 4x4 and DC quantization under four scaling list presets"
    }

    fn check(
        &self,
        provider: &dyn KernelProvider,
        pair: &TierPair,
        ctx: &mut Context,
        reporter: &mut Reporter,
    ) -> bool {
        let mut group = GroupCheck::new(reporter, "quant");

        for cqm in 0..ScalingLists::PRESETS {
            let lists = ScalingLists::preset(cqm, &mut ctx.rng);
            let qt = QuantTables::new(&lists);
            let tables = TierTables::build(pair, |cpu| provider.quant(cpu, &qt));
            tracing::trace!(cqm, max_mf = qt.max_mf(), "scaling lists rebuilt");

            for slot in [CqmList::Intra8Y, CqmList::Inter8Y] {
                let input = random_coefs::<64>(&mut ctx.rng);
                let mut dct_ref = AlignedBlock([0i16; 64]);
                let mut dct_new = dct_ref;
                group.compare(
                    tables.pick(|t| &t.quant_8x8),
                    SubTestId::new("quant_8x8").params(Params::Cqm(cqm)),
                    (&mut dct_ref, &mut dct_new),
                    |dct| dct.0 = input,
                    |f, dct| f(&mut dct.0, qt.mf8(slot), QBITS, ROUNDING),
                );
            }

            for slot in [CqmList::Intra4Y, CqmList::Inter4Y] {
                let input = random_coefs::<16>(&mut ctx.rng);
                let mut dct_ref = AlignedBlock([0i16; 16]);
                let mut dct_new = dct_ref;
                group.compare(
                    tables.pick(|t| &t.quant_4x4),
                    SubTestId::new("quant_4x4").params(Params::Cqm(cqm)),
                    (&mut dct_ref, &mut dct_new),
                    |dct| dct.0 = input,
                    |f, dct| f(&mut dct.0, qt.mf4(slot), QBITS, ROUNDING),
                );
            }

            let input = random_coefs::<16>(&mut ctx.rng);
            let mut dct_ref = AlignedBlock([0i16; 16]);
            let mut dct_new = dct_ref;
            let mf = qt.mf4(CqmList::Intra4Y)[0];
            group.compare(
                tables.pick(|t| &t.quant_4x4_dc),
                SubTestId::new("quant_4x4_dc").params(Params::Cqm(cqm)),
                (&mut dct_ref, &mut dct_new),
                |dct| dct.0 = input,
                |f, dct| f(&mut dct.0, mf, QBITS, ROUNDING),
            );

            let input = random_coefs::<4>(&mut ctx.rng);
            let mut dct_ref = AlignedBlock([0i16; 4]);
            let mut dct_new = dct_ref;
            let mf = qt.mf4(CqmList::Intra4C)[0];
            group.compare(
                tables.pick(|t| &t.quant_2x2_dc),
                SubTestId::new("quant_2x2_dc").params(Params::Cqm(cqm)),
                (&mut dct_ref, &mut dct_new),
                |dct| dct.0 = input,
                |f, dct| f(&mut dct.0, mf, QBITS, ROUNDING),
            );
        }

        group.finish()
    }
}
