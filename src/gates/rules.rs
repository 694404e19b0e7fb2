use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered key-alias tables consulted by the hard gates.
///
/// Each list is probed front to back and the first key present in the
/// profile wins. The defaults are the spellings job and candidate profiles
/// use in practice; a config file may override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateRules {
    /// Job-side keys stating whether AI-core capability is required.
    pub ai_core_keys: Vec<String>,
    /// Candidate-side flag for AI-core capability.
    pub candidate_ai_core_key: String,
    /// Job-side key holding the accepted work modes.
    pub work_mode_key: String,
    /// Candidate-side keys holding the offered work modes.
    pub candidate_work_mode_keys: Vec<String>,
    /// Job-side keys holding the company compensation band.
    pub job_compensation_keys: Vec<String>,
    /// Candidate-side key holding the expected compensation.
    pub candidate_compensation_key: String,
}

impl Default for GateRules {
    fn default() -> Self {
        Self {
            ai_core_keys: strings(&["ai_core_required", "requires_ai_core", "ai_core"]),
            candidate_ai_core_key: "ai_core".to_string(),
            work_mode_key: "work_mode".to_string(),
            candidate_work_mode_keys: strings(&["work_mode", "work_modes"]),
            job_compensation_keys: strings(&["compensation", "company_compensation", "company_band"]),
            candidate_compensation_key: "compensation".to_string(),
        }
    }
}

fn strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// First key present in `profile`, in priority order, with its value.
/// A key mapped to `null` still counts as present.
pub(crate) fn first_present<'a>(profile: &'a Map<String, Value>, keys: &[String]) -> Option<&'a Value> {
    keys.iter().find_map(|k| profile.get(k))
}

/// Value of the first key holding a truthy value; when none does, whatever
/// the last key holds (possibly a falsy value, possibly nothing).
pub(crate) fn first_truthy_or_last<'a>(profile: &'a Map<String, Value>, keys: &[String]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| profile.get(k))
        .find(|v| is_truthy(v))
        .or_else(|| keys.last().and_then(|k| profile.get(k)))
}

/// Null, `false`, zero, and empty strings, arrays or objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
