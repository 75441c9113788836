//! Test utilities for quantization implementations.

#[cfg(test)]
mod tests {
    use crate::check::Context;
    use crate::dispatch::{KernelProvider, Native};
    use crate::quant::code::*;
    use crate::quant::{QuantChecker, QBITS, ROUNDING};
    use crate::registry::FamilyChecker;
    use crate::utils::arena::BUF_ALIGN;
    use crate::utils::{CpuFlags, Kernel, Outcome, Reporter, Tier, TierPair};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_log::test;

    fn scalar_pair() -> TierPair {
        TierPair {
            baseline: Tier::ORIGINAL,
            candidate: Tier::chain(CpuFlags::SCALAR_OPT)[1],
        }
    }

    #[test]
    fn test_flat_lists_keep_scale() {
        let qt = QuantTables::new(&ScalingLists::flat());
        let mf4 = qt.mf4(CqmList::Intra4Y);
        assert_eq!(mf4[0], 13107);
        assert_eq!(mf4[1], 8066);
        assert_eq!(mf4[5], 5243);
        assert_eq!(qt.mf8(CqmList::Inter8Y)[0], 13107);
        assert_eq!(qt.mf8(CqmList::Inter8Y)[1], 12222);
        assert_eq!(qt.max_mf(), 20972);
    }

    #[test]
    fn test_small_lists_grow_multipliers() {
        let ones = QuantTables::new(&ScalingLists::ones());
        assert_eq!(ones.mf4(CqmList::Intra4C)[0], 13107 * 16);
        assert_eq!(ones.max_mf(), 20972 * 16);

        let jvt = QuantTables::new(&ScalingLists::jvt());
        assert_eq!(jvt.mf4(CqmList::Intra4Y)[0], 13107 * 16 / 6);
        assert_eq!(jvt.mf8(CqmList::Inter8Y)[0], 13107 * 16 / 9);
    }

    #[test]
    fn test_random_lists_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let lists = ScalingLists::random(&mut rng);
        assert!(lists.list(CqmList::Intra8Y).iter().all(|&v| v >= 10));
        assert_eq!(lists.list(CqmList::Intra4Y), lists.list(CqmList::Inter8Y));
    }

    #[test]
    fn test_rounding_is_symmetric() {
        let mut dct = [4000, -4000, 0, 100];
        original::quant_2x2_dc(&mut dct, 13107, QBITS, ROUNDING);
        assert_eq!(dct, [50, -50, 0, 1]);
    }

    #[test]
    fn test_dispatch_follows_multiplier_range() {
        let flat = QuantTables::new(&ScalingLists::flat());
        let ones = QuantTables::new(&ScalingLists::ones());
        assert_eq!(QuantFunctions::new(CpuFlags::NONE, &ones).quant_8x8.name, "original");
        assert_eq!(
            QuantFunctions::new(CpuFlags::SCALAR_OPT, &flat).quant_8x8.name,
            "scalar_opt"
        );
        let narrow = QuantFunctions::new(CpuFlags::SCALAR_OPT, &flat);
        let wide = QuantFunctions::new(CpuFlags::SCALAR_OPT, &ones);
        assert_eq!(wide.quant_4x4_dc.name, "scalar_opt");
        let dc_wide = Kernel::new("scalar_opt", scalar_opt::quant_4x4_dc_wide as QuantDc4x4Fn);
        assert!(wide.quant_4x4_dc.same_impl(&dc_wide));
        assert!(!wide.quant_8x8.same_impl(&narrow.quant_8x8));
    }

    #[test]
    fn test_narrow_matches_original() {
        arbtest::arbtest(|u| {
            let mut mf = [0i32; 64];
            for m in mf.iter_mut() {
                *m = u.int_in_range(1..=NARROW_MF_LIMIT - 1)?;
            }
            let input: [i16; 64] = std::array::from_fn(|_| u.arbitrary().unwrap_or(0));
            let (mut x, mut y) = (input, input);
            original::quant_8x8(&mut x, &mf, QBITS, ROUNDING);
            scalar_opt::quant_8x8_narrow(&mut y, &mf, QBITS, ROUNDING);
            assert_eq!(x, y);

            let mut x: [i16; 4] = std::array::from_fn(|i| input[i]);
            let mut y = x;
            original::quant_2x2_dc(&mut x, mf[0], QBITS, ROUNDING);
            scalar_opt::quant_2x2_dc_narrow(&mut y, mf[0], QBITS, ROUNDING);
            assert_eq!(x, y);
            Ok(())
        });
    }

    #[test]
    fn test_wide_matches_original() {
        arbtest::arbtest(|u| {
            let mut mf = [0i32; 16];
            for m in mf.iter_mut() {
                *m = u.int_in_range(1..=20972 * 16)?;
            }
            let input: [i16; 16] = std::array::from_fn(|_| u.arbitrary().unwrap_or(0));
            let (mut x, mut y) = (input, input);
            original::quant_4x4(&mut x, &mf, QBITS, ROUNDING);
            scalar_opt::quant_4x4_wide(&mut y, &mf, QBITS, ROUNDING);
            assert_eq!(x, y);

            let (mut x, mut y) = (input, input);
            original::quant_4x4_dc(&mut x, mf[0], QBITS, ROUNDING);
            scalar_opt::quant_4x4_dc_wide(&mut y, mf[0], QBITS, ROUNDING);
            assert_eq!(x, y);
            Ok(())
        });
    }

    #[test]
    fn test_checker_scalar_tier_passes() {
        let mut ctx = Context::new(11).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(QuantChecker.check(&Native, &scalar_pair(), &mut ctx, &mut reporter));

        let results = reporter.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "quant");
        assert_eq!(results[0].outcome, Outcome::Passed);
        assert_eq!(results[0].exercised, 4 * 6);
    }

    fn quant_4x4_off_by_one(dct: &mut [i16; 16], mf: &[i32; 16], qbits: u32, f: i32) {
        original::quant_4x4(dct, mf, qbits, f);
        dct[0] = dct[0].wrapping_add(1);
    }

    /// Swaps in a broken 4x4 kernel at every accelerated tier.
    struct Broken4x4;

    impl KernelProvider for Broken4x4 {
        fn quant(&self, cpu: CpuFlags, tables: &QuantTables) -> QuantFunctions {
            let mut qf = QuantFunctions::new(CpuFlags::NONE, tables);
            if !cpu.is_empty() {
                qf.quant_4x4 = Kernel::new("broken", quant_4x4_off_by_one as Quant4x4Fn);
            }
            qf
        }
    }

    #[test]
    fn test_broken_kernel_reported_per_preset() {
        let mut ctx = Context::new(5).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(!QuantChecker.check(&Broken4x4, &scalar_pair(), &mut ctx, &mut reporter));

        let failures: Vec<_> = reporter
            .lines()
            .iter()
            .filter(|l| l.ends_with("(broken) [FAILED]"))
            .collect();
        // Intra and inter lists under each of the four presets.
        assert_eq!(failures.len(), 8);
        assert_eq!(failures[0], "quant_4x4 cqm=0 (broken) [FAILED]");
        assert_eq!(failures[7], "quant_4x4 cqm=3 (broken) [FAILED]");

        let result = &reporter.results()[0];
        assert_eq!(result.outcome, Outcome::Failed);
        assert_eq!(result.exercised, 8);
    }

    static CALLS: AtomicUsize = AtomicUsize::new(0);
    static MISALIGNED: AtomicUsize = AtomicUsize::new(0);

    fn note_alignment(addr: usize) {
        CALLS.fetch_add(1, Ordering::Relaxed);
        if addr % BUF_ALIGN != 0 {
            MISALIGNED.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn quant_8x8_noting(dct: &mut [i16; 64], mf: &[i32; 64], qbits: u32, f: i32) {
        note_alignment(dct.as_ptr() as usize);
        note_alignment(mf.as_ptr() as usize);
        original::quant_8x8(dct, mf, qbits, f);
    }

    fn quant_2x2_dc_noting(dct: &mut [i16; 4], mf: i32, qbits: u32, f: i32) {
        note_alignment(dct.as_ptr() as usize);
        original::quant_2x2_dc(dct, mf, qbits, f);
    }

    /// Original kernels that record the addresses they are handed.
    struct AlignmentNoting;

    impl KernelProvider for AlignmentNoting {
        fn quant(&self, cpu: CpuFlags, tables: &QuantTables) -> QuantFunctions {
            let mut qf = QuantFunctions::new(CpuFlags::NONE, tables);
            if !cpu.is_empty() {
                qf.quant_8x8 = Kernel::new("noting", quant_8x8_noting as Quant8x8Fn);
                qf.quant_2x2_dc = Kernel::new("noting", quant_2x2_dc_noting as QuantDc2x2Fn);
            }
            qf
        }
    }

    #[test]
    fn test_candidates_get_aligned_blocks() {
        let mut ctx = Context::new(9).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(QuantChecker.check(&AlignmentNoting, &scalar_pair(), &mut ctx, &mut reporter));
        assert_eq!(reporter.results()[0].exercised, 4 * 3);

        // Per preset: two 8x8 calls with coefficients and multipliers, one DC call.
        assert_eq!(CALLS.load(Ordering::Relaxed), 4 * 5);
        assert_eq!(MISALIGNED.load(Ordering::Relaxed), 0);
    }
}
