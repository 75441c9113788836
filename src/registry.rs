//! Registry of kernel families.
//!
//! Each family (pixel metrics, transforms, motion compensation,
//! quantization) implements [`FamilyChecker`]; the driver walks the
//! registry once per tier pair.

use crate::check::Context;
use crate::dispatch::KernelProvider;
use crate::utils::{Reporter, TierPair};

/// Trait that all family checkers must implement
pub trait FamilyChecker {
    /// Name of the family (e.g., "pixel")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Compares every implementation `pair.candidate` introduces against
    /// the original. Returns false if any report group failed.
    fn check(
        &self,
        provider: &dyn KernelProvider,
        pair: &TierPair,
        ctx: &mut Context,
        reporter: &mut Reporter,
    ) -> bool;
}

/// Ordered list of family checkers.
pub struct CheckerRegistry {
    checkers: Vec<Box<dyn FamilyChecker>>,
}

impl CheckerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    /// Register a family; families run in registration order
    pub fn register<C: FamilyChecker + 'static>(&mut self, checker: C) {
        self.checkers.push(Box::new(checker));
    }

    pub fn all(&self) -> &[Box<dyn FamilyChecker>] {
        &self.checkers
    }

    /// Find family by name
    pub fn find(&self, name: &str) -> Option<&dyn FamilyChecker> {
        self.checkers
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all families
pub fn build_registry() -> CheckerRegistry {
    let mut registry = CheckerRegistry::new();

    registry.register(crate::pixel::PixelChecker);
    registry.register(crate::dct::DctChecker);
    registry.register(crate::mc::McChecker);
    registry.register(crate::quant::QuantChecker);

    registry
}
