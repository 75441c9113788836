//! CPU capability levels and the tier chain they form.
//!
//! A tier is a named [`CpuFlags`] set. Tiers are ordered so that every tier
//! is a strict superset of the one before it, which lets the harness test
//! only the implementations a tier introduces.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Bitmask of enabled instruction-set extensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CpuFlags(u32);

impl CpuFlags {
    /// No acceleration: every table entry is the portable original.
    pub const NONE: Self = Self(0);
    /// Portable unrolled kernels, available on every target.
    pub const SCALAR_OPT: Self = Self(1 << 0);
    pub const SSE2: Self = Self(1 << 1);
    pub const AVX2: Self = Self(1 << 2);

    const NAMES: [(Self, &'static str); 3] = [
        (Self::SCALAR_OPT, "SCALAR_OPT"),
        (Self::SSE2, "SSE2"),
        (Self::AVX2, "AVX2"),
    ];

    /// True when every flag of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Flags whose kernels were compiled into this build.
    pub fn compiled() -> Self {
        #[allow(unused_mut)]
        let mut flags = Self::SCALAR_OPT;
        #[cfg(target_arch = "x86_64")]
        {
            flags |= Self::SSE2;
        }
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        {
            flags |= Self::AVX2;
        }
        flags
    }

    /// Flags supported by the CPU we are running on.
    pub fn detect() -> Self {
        #[allow(unused_mut)]
        let mut flags = Self::SCALAR_OPT;
        #[cfg(target_arch = "x86_64")]
        {
            if std::arch::is_x86_feature_detected!("sse2") {
                flags |= Self::SSE2;
            }
            if std::arch::is_x86_feature_detected!("avx2") {
                flags |= Self::AVX2;
            }
        }
        flags
    }
}

impl BitOr for CpuFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CpuFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for CpuFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for CpuFlags {
    type Err = Error;

    /// Parses `"sse2|scalar_opt"` or `"sse2,scalar_opt"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let mut flags = Self::NONE;
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("none") {
                continue;
            }
            let (flag, _) = Self::NAMES
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(part))
                .ok_or_else(|| Error::UnknownCpuFlag(part.to_string()))?;
            flags |= *flag;
        }
        Ok(flags)
    }
}

/// A named capability level in the tier chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    pub name: &'static str,
    pub cpu: CpuFlags,
}

impl Tier {
    pub const ORIGINAL: Self = Self {
        name: "original",
        cpu: CpuFlags::NONE,
    };

    /// Builds the ordered tier chain for `available` flags.
    ///
    /// Starts at [`Tier::ORIGINAL`] and adds one tier per flag that is both
    /// compiled in and present in `available`. Each tier keeps the flags of
    /// the tiers before it.
    pub fn chain(available: CpuFlags) -> Vec<Tier> {
        let usable = available.intersection(CpuFlags::compiled());
        let steps = [
            ("scalar_opt", CpuFlags::SCALAR_OPT),
            ("SSE2", CpuFlags::SSE2),
            ("AVX2", CpuFlags::AVX2),
        ];

        let mut tiers = vec![Self::ORIGINAL];
        let mut cpu = CpuFlags::NONE;
        for (name, flag) in steps {
            if usable.contains(flag) {
                cpu |= flag;
                tiers.push(Tier { name, cpu });
            }
        }
        tiers
    }
}

/// Two adjacent tiers: kernels new in `candidate` are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierPair {
    pub baseline: Tier,
    pub candidate: Tier,
}

impl TierPair {
    pub fn adjacent(tiers: &[Tier]) -> impl Iterator<Item = TierPair> + '_ {
        tiers.windows(2).map(|w| TierPair {
            baseline: w[0],
            candidate: w[1],
        })
    }
}

impl fmt::Display for TierPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} against {}", self.candidate.name, self.baseline.name)
    }
}
