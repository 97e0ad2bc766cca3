//! Checksum calculator — deterministic fingerprint of the persisted shape set.
//!
//! DESIGN
//! ======
//! The digest is the cheap drift signal exchanged with the canvas store: the
//! poller compares the local digest against the store's and reloads on
//! unexplained mismatch. For the comparison to mean anything the digest must
//! be identical for logically identical boards, so normalization strips the
//! client-generated shape `id` (two clients invent different ids for the same
//! geometry) and sorts the serialized shapes before hashing (two clients may
//! hold the same shapes in different order).
//!
//! `serde_json` maps are backed by `BTreeMap`, so object keys serialize in a
//! stable alphabetical order and the normalized form is canonical.

#[cfg(test)]
#[path = "checksum_test.rs"]
mod checksum_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::scene::Shape;

/// Opaque 256-bit digest, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the sync digest of a shape collection.
///
/// Pure and synchronous. Shape ids do not affect the result, nor does the
/// order shapes are passed in.
pub fn compute_checksum<'a, I>(shapes: I) -> Digest
where
    I: IntoIterator<Item = &'a Shape>,
{
    let mut normalized: Vec<String> = shapes.into_iter().map(normalize_shape).collect();
    normalized.sort_unstable();

    let mut hasher = Sha256::new();
    for entry in &normalized {
        hasher.update(entry.as_bytes());
        hasher.update(b"\n");
    }
    Digest(hex_encode(&hasher.finalize()))
}

/// Canonical JSON for one shape with the local `id` stripped.
fn normalize_shape(shape: &Shape) -> String {
    let mut value = serde_json::to_value(shape).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.remove("id");
    }
    value.to_string()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
