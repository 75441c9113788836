//! # Codec-Checkasm
//!
//! Differential tests proving that accelerated video codec kernels (pixel
//! metrics, transforms, motion compensation, quantization) produce results
//! bit-identical to their portable originals.
//!
//! The driver walks a chain of CPU capability tiers. For each adjacent pair
//! every family checker builds three dispatch tables (original, baseline,
//! candidate) and compares each implementation the candidate tier
//! introduces against the original on identical inputs.

pub mod check;
pub mod config;
pub mod dct;
pub mod dispatch;
pub mod error;
pub mod mc;
pub mod pixel;
pub mod quant;
pub mod registry;
pub mod utils;

pub use utils::runner::run_checks;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::check::Context;
    pub use crate::config::Config;
    pub use crate::dispatch::{KernelProvider, Native};
    pub use crate::registry::{build_registry, CheckerRegistry, FamilyChecker};
    pub use crate::run_checks;
    pub use crate::utils::{CpuFlags, Outcome, Reporter, Tier, TierPair, Verdict};
}
