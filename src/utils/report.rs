//! Result aggregation and the diagnostic stream.
//!
//! Every family check produces one [`ComparisonResult`] per report group.
//! The [`Reporter`] writes status and mismatch lines as they happen and
//! folds all results into a single [`Verdict`].

use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use crate::utils::cpu::TierPair;
use crate::utils::tui;

/// Shape parameters that produced a sub-test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Params {
    None,
    Block { w: usize, h: usize },
    Motion { dx: i32, dy: i32, w: usize, h: usize },
    Weight(i32),
    Cqm(usize),
}

/// Identifies one sub-test: operation, variant and shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubTestId {
    pub op: &'static str,
    pub variant: Option<usize>,
    pub params: Params,
}

impl SubTestId {
    pub const fn new(op: &'static str) -> Self {
        Self {
            op,
            variant: None,
            params: Params::None,
        }
    }

    pub const fn variant(mut self, index: usize) -> Self {
        self.variant = Some(index);
        self
    }

    pub const fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// A sub-test whose candidate disagreed with the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub id: SubTestId,
    /// Name of the candidate implementation.
    pub implementation: &'static str,
    /// `"<original> != <candidate>"` for kernels returning a value.
    pub detail: Option<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.op)?;
        if let Some(index) = self.id.variant {
            write!(f, "[{index}]")?;
        }
        match self.id.params {
            Params::None => {}
            Params::Block { w, h } => write!(f, " {w}x{h}")?,
            Params::Motion { dx, dy, w, h } => write!(f, " mv({dx},{dy}) {w}x{h}")?,
            Params::Weight(weight) => write!(f, " weight={weight}")?,
            Params::Cqm(cqm) => write!(f, " cqm={cqm}")?,
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        write!(f, " ({}) [FAILED]", self.implementation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    /// Nothing new at this tier, so nothing was verified.
    NotApplicable,
}

/// Outcome of one report group for one tier pair.
#[derive(Clone, Debug)]
pub struct ComparisonResult {
    pub tier: String,
    pub label: &'static str,
    pub outcome: Outcome,
    pub exercised: usize,
    pub first_mismatch: Option<Mismatch>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Verdict::Pass => ExitCode::SUCCESS,
            Verdict::Fail => ExitCode::FAILURE,
        }
    }
}

/// Collects results and writes the diagnostic stream.
pub struct Reporter {
    out: Box<dyn Write>,
    lines: Vec<String>,
    results: Vec<ComparisonResult>,
    tier: String,
}

impl Reporter {
    pub fn new(out: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            lines: Vec::new(),
            results: Vec::new(),
            tier: String::new(),
        }
    }

    /// A reporter that only keeps lines in memory.
    pub fn quiet() -> Self {
        Self::new(std::io::sink())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn results(&self) -> &[ComparisonResult] {
        &self.results
    }

    fn emit(&mut self, line: String) {
        let written = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(err) = written {
            tracing::warn!(%err, "failed to write diagnostic line");
        }
        self.lines.push(line);
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.emit(line.into());
    }

    /// Starts a tier pair; later results are attributed to it.
    pub fn begin_tier(&mut self, pair: &TierPair) {
        self.tier = pair.to_string();
        if !self.lines.is_empty() {
            self.emit(String::new());
        }
        self.emit(format!("checkasm: {}", self.tier));
        self.emit(tui::rule());
    }

    pub fn mismatch(&mut self, mismatch: &Mismatch) {
        self.emit(mismatch.to_string());
    }

    /// Records a group result, printing its status line if it ran anything.
    pub fn record(
        &mut self,
        label: &'static str,
        exercised: usize,
        first_mismatch: Option<Mismatch>,
    ) -> Outcome {
        let outcome = match (exercised, &first_mismatch) {
            (0, _) => Outcome::NotApplicable,
            (_, Some(_)) => Outcome::Failed,
            (_, None) => Outcome::Passed,
        };
        if outcome != Outcome::NotApplicable {
            self.emit(tui::status_line(label, outcome == Outcome::Passed));
        }
        tracing::debug!(tier = %self.tier, label, exercised, ?outcome, "group done");
        self.results.push(ComparisonResult {
            tier: self.tier.clone(),
            label,
            outcome,
            exercised,
            first_mismatch,
        });
        outcome
    }

    /// Pass iff no exercised sub-test failed anywhere.
    pub fn verdict(&self) -> Verdict {
        if self.results.iter().any(|r| r.outcome == Outcome::Failed) {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    /// Prints the closing message and returns the verdict.
    pub fn conclude(&mut self) -> Verdict {
        let verdict = self.verdict();
        self.emit(String::new());
        match verdict {
            Verdict::Pass => self.emit("checkasm: all tests passed".to_string()),
            Verdict::Fail => self.emit(
                "checkasm: at least one test has failed, fix the failing implementation"
                    .to_string(),
            ),
        }
        verdict
    }
}
