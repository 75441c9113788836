//! Drives every family checker over the tier chain.

use crate::check::Context;
use crate::dispatch::KernelProvider;
use crate::registry::CheckerRegistry;
use crate::utils::{Reporter, Tier, TierPair, Verdict};

/// Checks each adjacent tier pair with every registered family.
///
/// Families keep running after a failure so one run surfaces every broken
/// implementation. Returns the verdict without printing the closing
/// message; see [`Reporter::conclude`].
pub fn run_checks(
    registry: &CheckerRegistry,
    provider: &dyn KernelProvider,
    tiers: &[Tier],
    ctx: &mut Context,
    reporter: &mut Reporter,
) -> Verdict {
    for pair in TierPair::adjacent(tiers) {
        tracing::debug!(%pair, "checking tier pair");
        reporter.begin_tier(&pair);
        for checker in registry.all() {
            tracing::debug!(family = checker.name(), "{}", checker.description());
            let ok = checker.check(provider, &pair, ctx, reporter);
            tracing::debug!(family = checker.name(), ok, "family checked");
        }
    }
    reporter.verdict()
}
