//! Test utilities for pixel metric implementations.

#[cfg(test)]
mod tests {
    use crate::pixel::code::*;
    use crate::pixel::{Metric, PARTITIONS};
    use crate::utils::CpuFlags;
    use test_log::test;

    /// 16x16 block at stride 16 filled by `f(x, y)`.
    fn block(f: impl Fn(usize, usize) -> u8) -> Vec<u8> {
        (0..256).map(|i| f(i % 16, i / 16)).collect()
    }

    #[test]
    fn test_original_flat_difference() {
        let a = block(|_, _| 10);
        let b = block(|_, _| 7);
        assert_eq!(original::sad::<16, 16>(&a, 16, &b, 16), 3 * 256);
        assert_eq!(original::ssd::<16, 16>(&a, 16, &b, 16), 9 * 256);
        assert_eq!(original::sad::<8, 4>(&a, 16, &b, 16), 3 * 32);
        // A constant residual only has a DC coefficient: 16 * 3 per 4x4, halved.
        assert_eq!(original::satd::<4, 4>(&a, 16, &b, 16), 24);
        assert_eq!(original::satd::<16, 16>(&a, 16, &b, 16), 24 * 16);
    }

    #[test]
    fn test_original_strides() {
        // Only the first 4 samples of each row of `a` belong to the block.
        let a: Vec<u8> = (0..4 * 32).map(|i| if i % 32 < 4 { 5 } else { 200 }).collect();
        let b = vec![1u8; 4 * 24];
        assert_eq!(original::sad::<4, 4>(&a, 32, &b, 24), 16 * 4);
        assert_eq!(original::ssd::<4, 4>(&a, 32, &b, 24), 16 * 16);
    }

    #[test]
    fn test_original_satd_single_sample() {
        // A lone difference spreads evenly over all 16 coefficients.
        let a = block(|x, y| if x == 0 && y == 0 { 9 } else { 0 });
        let b = block(|_, _| 0);
        assert_eq!(original::satd::<4, 4>(&a, 16, &b, 16), 16 * 9 / 2);
    }

    #[test]
    fn test_scalar_opt_matches_original() {
        let reference = PixelFunctions::new(CpuFlags::NONE);
        let fast = PixelFunctions::new(CpuFlags::SCALAR_OPT);
        arbtest::arbtest(|u| {
            let mut a = vec![0u8; 16 * 32];
            let mut b = vec![0u8; 16 * 24];
            u.fill_buffer(&mut a)?;
            u.fill_buffer(&mut b)?;
            for metric in Metric::ALL {
                for i in 0..PARTITIONS.len() {
                    let expected = (reference.metric(metric)[i].function)(&a, 32, &b, 24);
                    let got = (fast.metric(metric)[i].function)(&a, 32, &b, 24);
                    assert_eq!(expected, got, "{} partition {i}", metric.name());
                }
            }
            Ok(())
        });
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_sse2_matches_original() {
        let reference = PixelFunctions::new(CpuFlags::NONE);
        let simd = PixelFunctions::new(CpuFlags::SCALAR_OPT | CpuFlags::SSE2);
        arbtest::arbtest(|u| {
            let mut a = vec![0u8; 16 * 32];
            let mut b = vec![0u8; 16 * 24];
            u.fill_buffer(&mut a)?;
            u.fill_buffer(&mut b)?;
            for metric in [Metric::Sad, Metric::Ssd] {
                for i in 0..PARTITIONS.len() {
                    let expected = (reference.metric(metric)[i].function)(&a, 32, &b, 24);
                    let got = (simd.metric(metric)[i].function)(&a, 32, &b, 24);
                    assert_eq!(expected, got, "{} partition {i}", metric.name());
                }
            }
            Ok(())
        });
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_sse2_extreme_samples() {
        let a = block(|_, _| 255);
        let b = block(|_, _| 0);
        assert_eq!(x86_64_sse2::sad::<16, 16>(&a, 16, &b, 16), 255 * 256);
        assert_eq!(x86_64_sse2::ssd::<16, 16>(&a, 16, &b, 16), 255 * 255 * 256);
        assert_eq!(x86_64_sse2::ssd::<8, 8>(&b, 16, &a, 16), 255 * 255 * 64);
    }

    #[test]
    fn test_table_identities() {
        let reference = PixelFunctions::new(CpuFlags::NONE);
        let scalar = PixelFunctions::new(CpuFlags::SCALAR_OPT);
        assert!(reference.sad.iter().all(|k| k.name == "original"));
        assert!(scalar.satd.iter().all(|k| k.name == "scalar_opt"));

        #[cfg(target_arch = "x86_64")]
        {
            let sse2 = PixelFunctions::new(CpuFlags::SCALAR_OPT | CpuFlags::SSE2);
            assert_eq!(sse2.sad[0].name, "x86_64-sse2");
            // 4-wide partitions are not new at the SSE2 tier.
            assert!(sse2.sad[5].same_impl(&scalar.sad[5]));
            assert!(sse2.satd[0].same_impl(&scalar.satd[0]));
        }
    }
}
