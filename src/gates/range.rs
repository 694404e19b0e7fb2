use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key pairs probed, in order, for a compensation band.
const RANGE_KEYS: &[(&str, &str)] = &[
    ("min", "max"),
    ("expected_min", "expected_max"),
    ("low", "high"),
];

/// Keys holding a single expected figure.
const POINT_KEYS: &[&str] = &["expected", "value"];

/// A closed compensation interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompensationRange {
    pub min: f64,
    pub max: f64,
}

/// Why a compensation value could not be read as a range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("missing compensation")]
    Missing,

    #[error("invalid compensation format")]
    Format,

    #[error("compensation field `{0}` is not a number")]
    NotNumeric(String),
}

impl CompensationRange {
    pub fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Extract a range from a bare number or a mapping using one of the
    /// accepted key spellings. The first matching alias wins; a matching
    /// alias with non-numeric values is an error, not a fallthrough.
    pub fn extract(value: Option<&Value>) -> Result<Self, RangeError> {
        let value = match value {
            None | Some(Value::Null) => return Err(RangeError::Missing),
            Some(v) => v,
        };

        match value {
            Value::Number(_) | Value::Bool(_) => {
                let n = coerce_f64(value).ok_or(RangeError::Format)?;
                Ok(Self::point(n))
            }
            Value::Object(map) => {
                for (lo, hi) in RANGE_KEYS {
                    if let (Some(a), Some(b)) = (map.get(*lo), map.get(*hi)) {
                        let min = coerce_f64(a).ok_or_else(|| RangeError::NotNumeric(lo.to_string()))?;
                        let max = coerce_f64(b).ok_or_else(|| RangeError::NotNumeric(hi.to_string()))?;
                        return Ok(Self { min, max });
                    }
                }
                for key in POINT_KEYS {
                    if let Some(v) = map.get(*key) {
                        let n = coerce_f64(v).ok_or_else(|| RangeError::NotNumeric(key.to_string()))?;
                        return Ok(Self::point(n));
                    }
                }
                Err(RangeError::Format)
            }
            _ => Err(RangeError::Format),
        }
    }

    /// Closed-interval overlap; touching boundaries count.
    pub fn overlaps(&self, other: &CompensationRange) -> bool {
        self.max >= other.min && self.min <= other.max
    }
}

/// Numbers, numeric strings and booleans (as 1/0). Non-finite results are
/// rejected so that overlap comparisons stay total.
fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
