use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::KpError;

/// Encode `value` in canonical form: object keys sorted by code point at
/// every level, no whitespace, non-ASCII written literally.
pub fn to_canonical_string<T: Serialize + ?Sized>(value: &T) -> Result<String, KpError> {
    let tree = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&Sorted(&tree))?)
}

/// Serializes a [`Value`] with map entries in key order regardless of how
/// the map itself is ordered.
struct Sorted<'a>(&'a Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Sorted(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                // Byte order of UTF-8 equals code point order.
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    out.serialize_entry(k, &Sorted(v))?;
                }
                out.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}
