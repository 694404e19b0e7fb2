//! Knowledge packs: JSON documents stored with a deterministic byte layout.
//!
//! [`save`] writes any serializable value in canonical form (sorted keys, no
//! whitespace, UTF-8 without escaping). [`load`] parses a pack and returns a
//! [`FrozenValue`] whose containers reject mutation. Saving a loaded pack
//! reproduces the original file byte for byte.

mod canonical;
mod frozen;

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub use canonical::*;
pub use frozen::*;

/// Knowledge-pack errors.
#[derive(Debug, Error)]
pub enum KpError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{container} is immutable: {operation}")]
    Immutable {
        container: &'static str,
        operation: &'static str,
    },
}

impl KpError {
    pub(crate) fn immutable(container: &'static str, operation: &'static str) -> Self {
        Self::Immutable {
            container,
            operation,
        }
    }
}

/// Write `value` to `path` in canonical form, creating parent directories.
pub fn save<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<(), KpError> {
    let path = path.as_ref();
    let text = to_canonical_string(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text.as_bytes())?;

    tracing::debug!("Saved knowledge pack {} ({} bytes)", path.display(), text.len());
    Ok(())
}

/// Read and parse the pack at `path`, freezing every container.
pub fn load(path: impl AsRef<Path>) -> Result<FrozenValue, KpError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    tracing::debug!("Loaded knowledge pack {} ({} bytes)", path.display(), text.len());
    Ok(freeze(value))
}

/// Result of re-encoding a pack and comparing it with the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub original_len: usize,
    pub rewritten_len: usize,
    pub identical: bool,
}

/// Load the pack at `path`, save it again to a scratch file and compare the
/// bytes. A file not written by [`save`] (whitespace, unsorted keys) is
/// reported as not identical.
pub fn verify_round_trip(path: impl AsRef<Path>) -> Result<RoundTrip, KpError> {
    let path = path.as_ref();
    let original = fs::read(path)?;
    let pack = load(path)?;

    let scratch = tempfile::NamedTempFile::new()?;
    save(scratch.path(), &pack)?;
    let rewritten = fs::read(scratch.path())?;

    let result = RoundTrip {
        original_len: original.len(),
        rewritten_len: rewritten.len(),
        identical: original == rewritten,
    };
    if !result.identical {
        tracing::warn!(
            "Round trip of {} differs: {} bytes on disk, {} bytes re-encoded",
            path.display(),
            result.original_len,
            result.rewritten_len
        );
    }
    Ok(result)
}
