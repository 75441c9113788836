//! Test utilities for transform implementations.

#[cfg(test)]
mod tests {
    use crate::check::Context;
    use crate::dct::code::*;
    use crate::dct::{DctChecker, COEF_SENTINEL, DC2X2_INPUT, DC4X4_INPUT};
    use crate::dispatch::{KernelProvider, Native};
    use crate::registry::FamilyChecker;
    use crate::utils::arena::BUF_ALIGN;
    use crate::utils::{CpuFlags, Kernel, Outcome, Reporter, Tier, TierPair};
    use arbtest::arbitrary::Unstructured;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_log::test;

    fn scalar_pair() -> TierPair {
        TierPair {
            baseline: Tier::ORIGINAL,
            candidate: Tier::chain(CpuFlags::SCALAR_OPT)[1],
        }
    }

    fn pixels(u: &mut Unstructured<'_>, len: usize) -> arbtest::arbitrary::Result<Vec<u8>> {
        let mut v = vec![0u8; len];
        u.fill_buffer(&mut v)?;
        Ok(v)
    }

    fn coefs<const N: usize>(u: &mut Unstructured<'_>) -> arbtest::arbitrary::Result<[i16; N]> {
        let mut c = [0i16; N];
        for v in c.iter_mut() {
            *v = u.int_in_range(-4096..=4095)?;
        }
        Ok(c)
    }

    #[test]
    fn test_sentinel_pattern() {
        assert_eq!(COEF_SENTINEL.to_ne_bytes(), [0xCD, 0xCD]);
    }

    #[test]
    fn test_sub4x4_flat_residual() {
        let a = [11u8; 16];
        let b = [10u8; 16];
        let mut dct = [COEF_SENTINEL; 16];
        original::sub4x4_dct(&mut dct, &a, 4, &b, 4);
        assert_eq!(dct[0], 16);
        assert!(dct[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_add4x4_idct_dc_and_clipping() {
        let mut dst = [100u8; 16];
        let mut dct = [0i16; 16];
        dct[0] = 64;
        original::add4x4_idct(&mut dst, 4, &mut dct);
        assert_eq!(dst, [101u8; 16]);

        let mut dst = [255u8; 16];
        original::add4x4_idct(&mut dst, 4, &mut dct);
        assert_eq!(dst, [255u8; 16]);
    }

    #[test]
    fn test_dc_transforms_known_answers() {
        let mut ones = [1i16; 16];
        original::dct4x4dc(&mut ones);
        assert_eq!(ones[0], 8);
        assert!(ones[1..].iter().all(|&c| c == 0));

        let mut ones = [1i16; 16];
        original::idct4x4dc(&mut ones);
        assert_eq!(ones[0], 16);

        let mut d = DC2X2_INPUT;
        original::dct2x2dc(&mut d);
        assert_eq!(d, [122, -62, -142, 34]);
        original::idct2x2dc(&mut d);
        assert_eq!(d, DC2X2_INPUT.map(|v| v * 4));
    }

    #[test]
    fn test_idct8_consumes_coefficients() {
        let mut dst = [128u8; 64];
        let mut dct = [0i16; 64];
        dct[0] = 64;
        original::add8x8_idct8(&mut dst, 8, &mut dct);
        assert_ne!(dct[0], 64, "first pass is written back");

        let mut dct = [0i16; 64];
        dct[0] = 64;
        scalar_opt::add8x8_idct8(&mut dst, 8, &mut dct);
        assert_eq!(dct[0], 64);
    }

    #[test]
    fn test_scalar_opt_forward_matches_original() {
        let reference = DctFunctions::new(CpuFlags::NONE);
        let fast = DctFunctions::new(CpuFlags::SCALAR_OPT);
        arbtest::arbtest(|u| {
            let a = pixels(u, 16 * 32)?;
            let b = pixels(u, 16 * 24)?;

            let (mut x, mut y) = ([0i16; 16], [0i16; 16]);
            (reference.sub4x4_dct.function)(&mut x, &a, 32, &b, 24);
            (fast.sub4x4_dct.function)(&mut y, &a, 32, &b, 24);
            assert_eq!(x, y);

            let (mut x, mut y) = ([0i16; 64], [0i16; 64]);
            (reference.sub8x8_dct.function)(&mut x, &a, 32, &b, 24);
            (fast.sub8x8_dct.function)(&mut y, &a, 32, &b, 24);
            assert_eq!(x, y);
            (reference.sub8x8_dct8.function)(&mut x, &a, 32, &b, 24);
            (fast.sub8x8_dct8.function)(&mut y, &a, 32, &b, 24);
            assert_eq!(x, y);

            let (mut x, mut y) = ([0i16; 256], [0i16; 256]);
            (reference.sub16x16_dct.function)(&mut x, &a, 32, &b, 24);
            (fast.sub16x16_dct.function)(&mut y, &a, 32, &b, 24);
            assert_eq!(x, y);
            (reference.sub16x16_dct8.function)(&mut x, &a, 32, &b, 24);
            (fast.sub16x16_dct8.function)(&mut y, &a, 32, &b, 24);
            assert_eq!(x, y);
            Ok(())
        });
    }

    #[test]
    fn test_scalar_opt_inverse_matches_original() {
        let reference = DctFunctions::new(CpuFlags::NONE);
        let fast = DctFunctions::new(CpuFlags::SCALAR_OPT);
        arbtest::arbtest(|u| {
            let pred = pixels(u, 16 * 32)?;

            let c16 = coefs::<16>(u)?;
            let (mut x, mut y) = (pred.clone(), pred.clone());
            (reference.add4x4_idct.function)(&mut x, 32, &mut c16.clone());
            (fast.add4x4_idct.function)(&mut y, 32, &mut c16.clone());
            assert_eq!(x, y);

            let c64 = coefs::<64>(u)?;
            let (mut x, mut y) = (pred.clone(), pred.clone());
            (reference.add8x8_idct.function)(&mut x, 32, &mut c64.clone());
            (fast.add8x8_idct.function)(&mut y, 32, &mut c64.clone());
            assert_eq!(x, y);
            (reference.add8x8_idct8.function)(&mut x, 32, &mut c64.clone());
            (fast.add8x8_idct8.function)(&mut y, 32, &mut c64.clone());
            assert_eq!(x, y);

            let c256 = coefs::<256>(u)?;
            let (mut x, mut y) = (pred.clone(), pred);
            (reference.add16x16_idct.function)(&mut x, 32, &mut c256.clone());
            (fast.add16x16_idct.function)(&mut y, 32, &mut c256.clone());
            assert_eq!(x, y);
            (reference.add16x16_idct8.function)(&mut x, 32, &mut c256.clone());
            (fast.add16x16_idct8.function)(&mut y, 32, &mut c256.clone());
            assert_eq!(x, y);
            Ok(())
        });
    }

    #[test]
    fn test_scalar_opt_dc_matches_original() {
        arbtest::arbtest(|u| {
            let d4 = coefs::<16>(u)?;
            for (r, f) in [
                (original::dct4x4dc as Dc4x4Fn, scalar_opt::dct4x4dc as Dc4x4Fn),
                (original::idct4x4dc as Dc4x4Fn, scalar_opt::idct4x4dc as Dc4x4Fn),
            ] {
                let (mut x, mut y) = (d4, d4);
                r(&mut x);
                f(&mut y);
                assert_eq!(x, y);
            }

            let d2 = coefs::<4>(u)?;
            for (r, f) in [
                (original::dct2x2dc as Dc2x2Fn, scalar_opt::dct2x2dc as Dc2x2Fn),
                (original::idct2x2dc as Dc2x2Fn, scalar_opt::idct2x2dc as Dc2x2Fn),
            ] {
                let (mut x, mut y) = (d2, d2);
                r(&mut x);
                f(&mut y);
                assert_eq!(x, y);
            }
            Ok(())
        });
        let mut x = DC4X4_INPUT;
        let mut y = DC4X4_INPUT;
        original::dct4x4dc(&mut x);
        scalar_opt::dct4x4dc(&mut y);
        assert_eq!(x, y);
    }

    #[test]
    fn test_checker_scalar_tier_passes() {
        let mut ctx = Context::new(0x264).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(DctChecker.check(&Native, &scalar_pair(), &mut ctx, &mut reporter));

        let labels: Vec<_> = reporter.results().iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            ["sub_dct4", "sub_dct8", "add_idct4", "add_idct8", "(i)dct4x4dc", "(i)dct2x2dc"]
        );
        assert!(reporter
            .results()
            .iter()
            .all(|r| r.outcome == Outcome::Passed));
    }

    /// Renames the destructive inverse 8x8 kernels at every accelerated tier.
    struct RenamedIdct8;

    impl KernelProvider for RenamedIdct8 {
        fn dct(&self, cpu: CpuFlags) -> DctFunctions {
            let mut table = DctFunctions::new(CpuFlags::NONE);
            if !cpu.is_empty() {
                table.add8x8_idct8.name = "renamed";
                table.add16x16_idct8.name = "renamed";
            }
            table
        }
    }

    #[test]
    fn test_destructive_inverse_gets_fresh_coefficients() {
        let mut ctx = Context::new(7).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(DctChecker.check(&RenamedIdct8, &scalar_pair(), &mut ctx, &mut reporter));

        for result in reporter.results() {
            if result.label == "add_idct8" {
                assert_eq!(result.outcome, Outcome::Passed);
                assert_eq!(result.exercised, 2);
            } else {
                assert_eq!(result.outcome, Outcome::NotApplicable);
            }
        }
    }

    static CALLS: AtomicUsize = AtomicUsize::new(0);
    static MISALIGNED: AtomicUsize = AtomicUsize::new(0);

    fn note_alignment(addr: usize) {
        CALLS.fetch_add(1, Ordering::Relaxed);
        if addr % BUF_ALIGN != 0 {
            MISALIGNED.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn sub4x4_dct_noting(dct: &mut [i16; 16], p1: &[u8], s1: usize, p2: &[u8], s2: usize) {
        note_alignment(dct.as_ptr() as usize);
        original::sub4x4_dct(dct, p1, s1, p2, s2);
    }

    fn add8x8_idct8_noting(dst: &mut [u8], stride: usize, dct: &mut [i16; 64]) {
        note_alignment(dst.as_ptr() as usize);
        note_alignment(dct.as_ptr() as usize);
        original::add8x8_idct8(dst, stride, dct);
    }

    fn dct4x4dc_noting(d: &mut [i16; 16]) {
        note_alignment(d.as_ptr() as usize);
        original::dct4x4dc(d);
    }

    fn dct2x2dc_noting(d: &mut [i16; 4]) {
        note_alignment(d.as_ptr() as usize);
        original::dct2x2dc(d);
    }

    /// Original kernels that record the addresses they are handed.
    struct AlignmentNoting;

    impl KernelProvider for AlignmentNoting {
        fn dct(&self, cpu: CpuFlags) -> DctFunctions {
            let mut table = DctFunctions::new(CpuFlags::NONE);
            if !cpu.is_empty() {
                table.sub4x4_dct = Kernel::new("noting", sub4x4_dct_noting as SubDctFn<16>);
                table.add8x8_idct8 = Kernel::new("noting", add8x8_idct8_noting as AddIdctFn<64>);
                table.dct4x4dc = Kernel::new("noting", dct4x4dc_noting as Dc4x4Fn);
                table.dct2x2dc = Kernel::new("noting", dct2x2dc_noting as Dc2x2Fn);
            }
            table
        }
    }

    #[test]
    fn test_candidates_get_aligned_blocks() {
        let mut ctx = Context::new(11).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(DctChecker.check(&AlignmentNoting, &scalar_pair(), &mut ctx, &mut reporter));

        // One pixel and one coefficient pointer for the inverse, one each
        // for the three others.
        assert_eq!(CALLS.load(Ordering::Relaxed), 5);
        assert_eq!(MISALIGNED.load(Ordering::Relaxed), 0);
    }
}
