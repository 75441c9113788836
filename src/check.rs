//! The generic differential comparator.
//!
//! A [`GroupCheck`] covers one report group (one status line). Each call to
//! [`GroupCheck::compare`] is one sub-test: it runs the original and the
//! candidate implementation on the same inputs, each into its own freshly
//! prepared output, and compares everything they produced. Family checkers
//! only describe their parameter space; this module does the rest.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::utils::report::{Mismatch, Outcome, Reporter, SubTestId};
use crate::utils::{Kernel, TestBuffers};

/// Everything a family checker needs besides its tables.
pub struct Context {
    pub bufs: TestBuffers,
    /// Source of per-call random inputs (quant coefficients, custom matrices).
    pub rng: StdRng,
    pub seed: u64,
}

impl Context {
    pub fn new(seed: u64) -> Result<Self> {
        Ok(Self {
            bufs: TestBuffers::new(seed)?,
            // Distinct stream from the one that filled the buffers.
            rng: StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
            seed,
        })
    }
}

/// The three implementations involved in one sub-test.
pub struct Candidates<'a, F> {
    /// Tier 0 implementation the candidate must agree with.
    pub reference: &'a Kernel<F>,
    /// Implementation at the previous tier.
    pub baseline: &'a Kernel<F>,
    pub candidate: &'a Kernel<F>,
}

impl<F: PartialEq> Candidates<'_, F> {
    /// True when the candidate tier introduced a different implementation.
    pub fn is_new(&self) -> bool {
        !self.candidate.same_impl(self.baseline)
    }
}

/// Values returned by kernels, compared exactly.
pub trait Observed: PartialEq {
    /// Text for the mismatch line, if the value is worth printing.
    fn describe(_reference: &Self, _candidate: &Self) -> Option<String> {
        None
    }
}

impl Observed for () {}

impl Observed for i32 {
    fn describe(reference: &Self, candidate: &Self) -> Option<String> {
        Some(format!("{reference} != {candidate}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubTest {
    /// Same implementation as the baseline tier; nothing to test.
    Skipped,
    Matched,
    Mismatched,
}

/// Accumulates sub-test outcomes for one status line.
pub struct GroupCheck<'r> {
    label: &'static str,
    exercised: usize,
    first_mismatch: Option<Mismatch>,
    reporter: &'r mut Reporter,
}

impl<'r> GroupCheck<'r> {
    pub fn new(reporter: &'r mut Reporter, label: &'static str) -> Self {
        Self {
            label,
            exercised: 0,
            first_mismatch: None,
            reporter,
        }
    }

    pub fn ok(&self) -> bool {
        self.first_mismatch.is_none()
    }

    pub fn exercised(&self) -> usize {
        self.exercised
    }

    /// Runs one sub-test unless the candidate is not new at this tier.
    ///
    /// `prepare` resets an output before each call (sentinel fill, copy of
    /// the prediction, copy of the input coefficients). `invoke` calls one
    /// implementation; it must read its inputs through shared borrows only,
    /// so both calls see identical data.
    pub fn compare<F, S, R>(
        &mut self,
        kernels: Candidates<'_, F>,
        id: SubTestId,
        outputs: (&mut S, &mut S),
        mut prepare: impl FnMut(&mut S),
        mut invoke: impl FnMut(F, &mut S) -> R,
    ) -> SubTest
    where
        F: Copy + PartialEq,
        S: PartialEq + ?Sized,
        R: Observed,
    {
        if !kernels.is_new() {
            tracing::trace!(op = id.op, variant = ?id.variant, "same implementation, skipped");
            return SubTest::Skipped;
        }
        self.exercised += 1;

        let (out_ref, out_new) = outputs;
        prepare(&mut *out_ref);
        let r_ref = invoke(kernels.reference.function, &mut *out_ref);
        prepare(&mut *out_new);
        let r_new = invoke(kernels.candidate.function, &mut *out_new);

        if r_ref == r_new && *out_ref == *out_new {
            return SubTest::Matched;
        }

        let mismatch = Mismatch {
            id,
            implementation: kernels.candidate.name,
            detail: R::describe(&r_ref, &r_new),
        };
        self.reporter.mismatch(&mismatch);
        self.first_mismatch.get_or_insert(mismatch);
        SubTest::Mismatched
    }

    /// [`compare`](Self::compare) for kernels that only return a value.
    pub fn compare_value<F, R>(
        &mut self,
        kernels: Candidates<'_, F>,
        id: SubTestId,
        mut invoke: impl FnMut(F) -> R,
    ) -> SubTest
    where
        F: Copy + PartialEq,
        R: Observed,
    {
        self.compare(kernels, id, (&mut (), &mut ()), |_| {}, |f, _| invoke(f))
    }

    /// Records the group with the reporter; true unless something failed.
    pub fn finish(self) -> bool {
        let outcome = self
            .reporter
            .record(self.label, self.exercised, self.first_mismatch);
        outcome != Outcome::Failed
    }
}
