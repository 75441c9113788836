//! Test utilities for motion compensation implementations.

#[cfg(test)]
mod tests {
    use crate::check::Context;
    use crate::dispatch::{KernelProvider, Native};
    use crate::mc::code::*;
    use crate::mc::{McChecker, AVG_SIZES, CHROMA_SIZES, LUMA_SIZES};
    use crate::registry::FamilyChecker;
    use crate::utils::arena::SENTINEL;
    use crate::utils::{CpuFlags, Kernel, Outcome, Reporter, Tier, TierPair};
    use test_log::test;

    const PLANE: usize = 32 * 24;

    fn ramp(len: usize, step: usize) -> Vec<u8> {
        (0..len).map(|i| (i * step % 251) as u8).collect()
    }

    #[test]
    fn test_luma_full_and_half_pel_copy_planes() {
        let planes_data: Vec<Vec<u8>> = (0..4).map(|p| vec![p as u8 * 50; PLANE]).collect();
        let planes: [&[u8]; 4] = std::array::from_fn(|p| planes_data[p].as_slice());

        let mut dst = [0xCDu8; 16 * 16];
        original::mc_luma(&planes, 32, &mut dst, 16, 0, 0, 4, 4);
        assert_eq!(&dst[..4], &[0; 4]);
        assert_eq!(dst[4], 0xCD, "writes stay inside the block");

        original::mc_luma(&planes, 32, &mut dst, 16, 2, 0, 4, 4);
        assert_eq!(dst[0], 50, "horizontal half-pel plane");
        original::mc_luma(&planes, 32, &mut dst, 16, 0, 2, 4, 4);
        assert_eq!(dst[0], 100, "vertical half-pel plane");
        original::mc_luma(&planes, 32, &mut dst, 16, 2, 2, 4, 4);
        assert_eq!(dst[0], 150, "centre half-pel plane");

        // Quarter positions average the two nearest half-pel planes.
        original::mc_luma(&planes, 32, &mut dst, 16, 1, 0, 4, 4);
        assert_eq!(dst[0], 25);
        original::mc_luma(&planes, 32, &mut dst, 16, 3, 2, 4, 4);
        assert_eq!(dst[0], 125);
    }

    #[test]
    fn test_chroma_bilinear_weights() {
        let src = ramp(32 * 10, 3);
        let mut dst = [0u8; 16 * 8];

        original::mc_chroma(&src, 32, &mut dst, 16, 0, 0, 4, 4);
        assert_eq!(&dst[..4], &src[..4]);

        original::mc_chroma(&src, 32, &mut dst, 16, 4, 0, 4, 4);
        for x in 0..4 {
            let expected = (src[x] as u32 + src[x + 1] as u32 + 1) >> 1;
            assert_eq!(dst[x] as u32, expected);
        }

        // A whole-sample vector moves the source by one.
        original::mc_chroma(&src, 32, &mut dst, 16, 8, 8, 2, 2);
        assert_eq!(dst[0], src[33]);
        assert_eq!(dst[16 + 1], src[32 * 2 + 2]);
    }

    #[test]
    fn test_weight_32_is_plain_average() {
        let a = ramp(32 * 16, 7);
        let b = ramp(24 * 16, 5);
        let mut x = a.clone();
        let mut y = a;
        original::avg::<16, 16>(&mut x, 32, &b, 24);
        original::avg_weight::<16, 16>(&mut y, 32, &b, 24, 32);
        assert_eq!(x, y);
    }

    #[test]
    fn test_weight_clipping() {
        let mut dst = [255u8; 4];
        original::avg_weight::<2, 2>(&mut dst, 2, &[0, 0, 0, 0], 2, 128);
        assert_eq!(dst, [255; 4]);
        let mut dst = [0u8; 4];
        original::avg_weight::<2, 2>(&mut dst, 2, &[255; 4], 2, 128);
        assert_eq!(dst, [0; 4]);
    }

    fn check_matches(cpu: CpuFlags) {
        let reference = McFunctions::new(CpuFlags::NONE);
        let fast = McFunctions::new(cpu);
        arbtest::arbtest(|u| {
            let mut data = vec![0u8; 4 * PLANE];
            u.fill_buffer(&mut data)?;
            let planes: [&[u8]; 4] = std::array::from_fn(|p| &data[p * PLANE..][..PLANE]);
            let mvx = u.int_in_range(0..=15)?;
            let mvy = u.int_in_range(0..=15)?;
            let (w, h) = *u.choose(&LUMA_SIZES)?;

            let (mut x, mut y) = ([0xCDu8; 256], [0xCDu8; 256]);
            (reference.mc_luma.function)(&planes, 32, &mut x, 16, mvx, mvy, w, h);
            (fast.mc_luma.function)(&planes, 32, &mut y, 16, mvx, mvy, w, h);
            assert_eq!(x, y, "mc_luma mv({mvx},{mvy}) {w}x{h}");

            let (w, h) = *u.choose(&CHROMA_SIZES)?;
            let (mut x, mut y) = ([0xCDu8; 256], [0xCDu8; 256]);
            (reference.mc_chroma.function)(planes[0], 32, &mut x, 16, mvx, mvy, w, h);
            (fast.mc_chroma.function)(planes[0], 32, &mut y, 16, mvx, mvy, w, h);
            assert_eq!(x, y, "mc_chroma mv({mvx},{mvy}) {w}x{h}");

            let weight = u.int_in_range(-64..=128)?;
            for i in 0..AVG_SIZES.len() {
                let (mut x, mut y) = (planes[1].to_vec(), planes[1].to_vec());
                (reference.avg[i].function)(&mut x, 32, planes[2], 24);
                (fast.avg[i].function)(&mut y, 32, planes[2], 24);
                assert_eq!(x, y, "avg[{i}]");

                (reference.avg_weight[i].function)(&mut x, 32, planes[3], 24, weight);
                (fast.avg_weight[i].function)(&mut y, 32, planes[3], 24, weight);
                assert_eq!(x, y, "avg_weight[{i}] weight={weight}");
            }
            Ok(())
        });
    }

    #[test]
    fn test_scalar_opt_matches_original() {
        check_matches(CpuFlags::SCALAR_OPT);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_sse2_matches_original() {
        check_matches(CpuFlags::SCALAR_OPT | CpuFlags::SSE2);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_sse2_weight_extremes() {
        let src = ramp(24 * 16, 11);
        for weight in [-64, -1, 0, 1, 63, 64, 65, 128] {
            let mut x = ramp(32 * 16, 13);
            let mut y = x.clone();
            original::avg_weight::<16, 16>(&mut x, 32, &src, 24, weight);
            x86_64_sse2::avg_weight::<16, 16>(&mut y, 32, &src, 24, weight);
            assert_eq!(x, y, "weight={weight}");
        }
    }

    #[test]
    fn test_checker_scalar_tier_passes() {
        let pair = TierPair {
            baseline: Tier::ORIGINAL,
            candidate: Tier::chain(CpuFlags::SCALAR_OPT)[1],
        };
        let mut ctx = Context::new(99).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(McChecker.check(&Native, &pair, &mut ctx, &mut reporter));

        let results = reporter.results();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.outcome == Outcome::Passed));
        assert_eq!(results[0].exercised, 4 * 4 * 7);
        assert_eq!(results[1].exercised, 9 * 9 * 7);
        assert_eq!(results[2].exercised, 10);
        // Full sweep: 193 weights of 10 kernels each.
        assert_eq!(results[3].exercised, 193 * 10);
    }

    #[allow(clippy::too_many_arguments)]
    fn mc_luma_skips_last_pixel(
        planes: &[&[u8]; 4],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
        mvx: i32,
        mvy: i32,
        w: usize,
        h: usize,
    ) {
        original::mc_luma(planes, src_stride, dst, dst_stride, mvx, mvy, w, h);
        dst[(h - 1) * dst_stride + w - 1] = SENTINEL;
    }

    /// Luma prediction that leaves the last pixel of every block unwritten.
    struct ShortLuma;

    impl KernelProvider for ShortLuma {
        fn mc(&self, cpu: CpuFlags) -> McFunctions {
            let mut mc = McFunctions::new(CpuFlags::NONE);
            if !cpu.is_empty() {
                mc.mc_luma = Kernel::new("short", mc_luma_skips_last_pixel as McLumaFn);
            }
            mc
        }
    }

    #[test]
    fn test_luma_under_write_is_caught() {
        let pair = TierPair {
            baseline: Tier::ORIGINAL,
            candidate: Tier::chain(CpuFlags::SCALAR_OPT)[1],
        };
        let mut ctx = Context::new(0xcafe).unwrap();
        let mut reporter = Reporter::quiet();
        assert!(!McChecker.check(&ShortLuma, &pair, &mut ctx, &mut reporter));

        let luma = &reporter.results()[0];
        assert_eq!(luma.label, "mc luma");
        assert_eq!(luma.outcome, Outcome::Failed);
        assert_eq!(luma.exercised, 4 * 4 * 7);
        let first = luma.first_mismatch.as_ref().unwrap();
        assert_eq!(first.id.op, "mc_luma");
        assert_eq!(first.implementation, "short");

        let failures = reporter
            .lines()
            .iter()
            .filter(|l| l.ends_with("(short) [FAILED]"))
            .count();
        assert!(failures > 100, "only {failures} under-writes caught");
        assert!(reporter.results()[1..]
            .iter()
            .all(|r| r.outcome == Outcome::NotApplicable));
    }
}
