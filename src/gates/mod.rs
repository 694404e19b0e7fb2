//! Hard eligibility gates between a job profile and a candidate profile.
//!
//! Three gates run in a fixed order and the first failure ends evaluation:
//!
//! 1. [`Gate::AiCore`]: the job may require AI-core capability.
//! 2. [`Gate::WorkMode`]: accepted and offered work modes must intersect.
//! 3. [`Gate::Compensation`]: the job band and the candidate expectation must
//!    overlap.
//!
//! Malformed profile data never surfaces as an error; it is reported as the
//! gate it broke.

mod range;
mod rules;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use range::*;
pub use rules::*;

/// Name of a hard gate, in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    AiCore,
    WorkMode,
    Compensation,
}

impl Gate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiCore => "ai_core",
            Self::WorkMode => "work_mode",
            Self::Compensation => "compensation",
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const REASON_MISSING_AI_CORE: &str = "candidate missing ai_core";
pub const REASON_WORK_MODE_MISMATCH: &str = "work mode mismatch";
pub const REASON_INVALID_COMPENSATION: &str = "invalid or missing compensation range";
pub const REASON_NO_COMPENSATION_OVERLAP: &str = "no compensation overlap";

/// Outcome of a hard-gate evaluation.
///
/// `failed_gate` is `None` exactly when `passed` is true; `reasons` then is
/// empty, otherwise it holds the single reason for the failing gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub passed: bool,
    pub failed_gate: Option<Gate>,
    pub reasons: Vec<String>,
}

impl GateResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            failed_gate: None,
            reasons: Vec::new(),
        }
    }

    pub fn fail(gate: Gate, reason: &str) -> Self {
        Self {
            passed: false,
            failed_gate: Some(gate),
            reasons: vec![reason.to_string()],
        }
    }
}

/// Evaluate the hard gates with the default key aliases.
pub fn evaluate_hard_gates(job_profile: &Value, candidate_profile: &Value) -> GateResult {
    GateRules::default().evaluate(job_profile, candidate_profile)
}

impl GateRules {
    /// Evaluate the hard gates in order, stopping at the first failure.
    ///
    /// Profiles that are not JSON objects are treated as empty.
    pub fn evaluate(&self, job_profile: &Value, candidate_profile: &Value) -> GateResult {
        let empty = Map::new();
        let job = job_profile.as_object().unwrap_or(&empty);
        let candidate = candidate_profile.as_object().unwrap_or(&empty);

        let outcome = self
            .check_ai_core(job, candidate)
            .and_then(|_| self.check_work_mode(job, candidate))
            .and_then(|_| self.check_compensation(job, candidate));

        match outcome {
            Ok(()) => {
                tracing::debug!("All hard gates passed");
                GateResult::pass()
            }
            Err(result) => result,
        }
    }

    fn check_ai_core(&self, job: &Map<String, Value>, candidate: &Map<String, Value>) -> Result<(), GateResult> {
        let required = first_present(job, &self.ai_core_keys).is_some_and(is_truthy);
        if !required {
            return Ok(());
        }

        let has_ai_core = candidate.get(&self.candidate_ai_core_key).is_some_and(is_truthy);
        if has_ai_core {
            Ok(())
        } else {
            tracing::debug!("Gate {} failed: {}", Gate::AiCore, REASON_MISSING_AI_CORE);
            Err(GateResult::fail(Gate::AiCore, REASON_MISSING_AI_CORE))
        }
    }

    fn check_work_mode(&self, job: &Map<String, Value>, candidate: &Map<String, Value>) -> Result<(), GateResult> {
        let Some(job_modes) = job.get(&self.work_mode_key) else {
            return Ok(());
        };

        let accepted = work_modes(Some(job_modes));
        let offered = work_modes(first_truthy_or_last(candidate, &self.candidate_work_mode_keys));

        let intersects = accepted
            .iter()
            .any(|a| offered.iter().any(|o| same_mode(a, o)));
        if intersects {
            Ok(())
        } else {
            tracing::debug!(
                "Gate {} failed: accepted {:?}, offered {:?}",
                Gate::WorkMode,
                accepted,
                offered
            );
            Err(GateResult::fail(Gate::WorkMode, REASON_WORK_MODE_MISMATCH))
        }
    }

    fn check_compensation(
        &self,
        job: &Map<String, Value>,
        candidate: &Map<String, Value>,
    ) -> Result<(), GateResult> {
        let job_comp = first_present(job, &self.job_compensation_keys).filter(|v| !v.is_null());
        let cand_comp = candidate
            .get(&self.candidate_compensation_key)
            .filter(|v| !v.is_null());

        if job_comp.is_none() && cand_comp.is_none() {
            return Ok(());
        }

        let ranges = CompensationRange::extract(job_comp)
            .and_then(|j| CompensationRange::extract(cand_comp).map(|c| (j, c)));
        let (job_range, cand_range) = match ranges {
            Ok(ranges) => ranges,
            Err(e) => {
                tracing::debug!("Gate {} failed: {}", Gate::Compensation, e);
                return Err(GateResult::fail(Gate::Compensation, REASON_INVALID_COMPENSATION));
            }
        };

        if cand_range.overlaps(&job_range) {
            Ok(())
        } else {
            tracing::debug!(
                "Gate {} failed: candidate {:?} outside job {:?}",
                Gate::Compensation,
                cand_range,
                job_range
            );
            Err(GateResult::fail(Gate::Compensation, REASON_NO_COMPENSATION_OVERLAP))
        }
    }
}

/// Null is no modes, a sequence is its elements, anything else is one mode.
fn work_modes(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Numbers and booleans compare by numeric value, so `1`, `1.0` and `true`
/// name the same mode. Everything else compares structurally.
fn same_mode(a: &Value, b: &Value) -> bool {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a == b,
        _ => false,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
