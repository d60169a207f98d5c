//! Digest values carried by fingerprint hashes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::ValidationError;

/// Hash function behind a fingerprint digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

impl DigestAlg {
    /// Name used in JSON output and in `Display`.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlg::Sha256 => "sha-256",
        }
    }
}

/// Hash of a fingerprint, usable as a compact cache key.
///
/// Displays as `sha-256:<b64>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// Hash function used.
    pub alg: DigestAlg,
    /// Hash bytes, base64url without padding.
    pub b64: String,
}

impl Digest {
    /// Builds a digest, rejecting `b64` unless it is 43-44 base64url characters.
    pub fn new(alg: DigestAlg, b64: impl Into<String>) -> Result<Self, ValidationError> {
        let b64 = b64.into();
        let re = Regex::new(r"^[A-Za-z0-9_-]{43,44}$").expect("invalid regex");
        if !re.is_match(&b64) {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value: b64,
            });
        }
        Ok(Digest { alg, b64 })
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.alg.name(), self.b64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_algorithm_name() {
        let digest = Digest::new(DigestAlg::Sha256, "A".repeat(43)).unwrap();
        assert_eq!(digest.to_string(), format!("sha-256:{}", "A".repeat(43)));
    }

    #[test]
    fn padded_or_short_values_are_rejected() {
        assert!(Digest::new(DigestAlg::Sha256, "short").is_err());
        assert!(Digest::new(DigestAlg::Sha256, format!("{}=", "A".repeat(43))).is_err());
    }
}
