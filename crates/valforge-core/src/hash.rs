//! Content-addressed fingerprints for specification data.
//!
//! A fingerprint covers the canonical textual content of a value, never the
//! identity of the compiler symbols it was built from, so two instances
//! describing the same logical type hash identically even when they were
//! assembled in different analysis passes.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 digest of a canonical view, usable as a cross-process cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Digest the JSON encoding of `view`.
    ///
    /// `view` must be a canonical projection: plain strings, bools, enums and
    /// sequences of such. Its JSON is streamed straight into the hasher.
    pub fn of(view: &impl Serialize) -> Self {
        let mut hasher = Sha256::new();
        serde_json::to_writer(&mut hasher, view)
            .expect("canonical views contain no maps with non-string keys");
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
