//! Run configuration from the environment.

use crate::error::Result;
use crate::utils::{parse_seed, time_seed, CpuFlags};

pub const SEED_VAR: &str = "CHECKASM_SEED";
pub const CPU_VAR: &str = "CHECKASM_CPU";
pub const LOG_VAR: &str = "CHECKASM_LOG";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Pinned seed; a fresh time seed is used when unset.
    pub seed: Option<u64>,
    /// Restricts the detected CPU flags.
    pub cpu_mask: Option<CpuFlags>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Ok(Self {
            seed: get(SEED_VAR).map(|v| parse_seed(&v)).transpose()?,
            cpu_mask: get(CPU_VAR).map(|v| v.parse()).transpose()?,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(time_seed)
    }

    /// Flags the tier chain is built from.
    pub fn cpu_flags(&self, detected: CpuFlags) -> CpuFlags {
        match self.cpu_mask {
            Some(mask) => detected.intersection(mask),
            None => detected,
        }
    }
}
