//! Fingerprint digests.
//!
//! Digests are computed as:
//! `sha256(domain_separator || profile_id || 0x00 || fingerprint)`
//! so fingerprints produced under different grammar profiles never share a
//! digest.

use crate::{Canonicalizer, Descriptor, Digest, DigestAlg, ProfileId, Scope};
use base64::Engine;
use sha2::{Digest as Sha2Digest, Sha256};

/// Domain separator for fingerprint digests: `b"shapeprint:shape:v1\0"`.
const SHAPE_DOMAIN_SEPARATOR: &[u8] = b"shapeprint:shape:v1\0";

/// Hashes an already computed fingerprint.
///
/// # Example
///
/// ```rust
/// use shapeprint_canonical::{fingerprint_digest, ProfileId};
///
/// let digest = fingerprint_digest(&ProfileId::default(), "_Array(_String)")?;
/// assert_eq!(digest.b64.len(), 43);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn fingerprint_digest(
    profile: &ProfileId,
    fingerprint: &str,
) -> Result<Digest, crate::ValidationError> {
    let mut hasher = Sha256::new();
    hasher.update(SHAPE_DOMAIN_SEPARATOR);
    hasher.update(profile.as_ref().as_bytes());
    hasher.update([0u8]);
    hasher.update(fingerprint.as_bytes());
    let hash_bytes = hasher.finalize();

    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash_bytes);
    Digest::new(DigestAlg::Sha256, b64)
}

/// Canonicalizes `node` and hashes its fingerprint.
///
/// # Example
///
/// ```rust
/// use shapeprint_canonical::{compute_shape_digest, Canonicalizer, Descriptor};
///
/// let canonicalizer = Canonicalizer::default();
/// let a = Descriptor::object([("id", Descriptor::number())]);
/// let b = Descriptor::object([("id", Descriptor::number())]);
/// assert_eq!(
///     compute_shape_digest(&a, None, &canonicalizer)?,
///     compute_shape_digest(&b, None, &canonicalizer)?,
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`DigestError`] if canonicalization fails.
pub fn compute_shape_digest(
    node: &Descriptor,
    scope: Option<&Scope>,
    canonicalizer: &Canonicalizer,
) -> Result<Digest, DigestError> {
    let fingerprint = canonicalizer.shape_of(node, scope)?;
    Ok(fingerprint_digest(canonicalizer.profile(), &fingerprint)?)
}

/// Verifies that a claimed digest matches the digest computed for `node`.
///
/// # Errors
///
/// Returns [`DigestError`] if computation fails.
pub fn verify_shape_digest(
    node: &Descriptor,
    scope: Option<&Scope>,
    claimed: &Digest,
    canonicalizer: &Canonicalizer,
) -> Result<bool, DigestError> {
    let computed = compute_shape_digest(node, scope, canonicalizer)?;
    Ok(claimed == &computed)
}

/// Error during digest computation.
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Shape(#[from] crate::ShapeError),
    /// Digest construction failed.
    #[error("digest construction failed: {0}")]
    Digest(#[from] crate::ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_depends_on_profile() {
        let fingerprint = "_Object(a:_String)";
        let v1 = fingerprint_digest(&ProfileId::default(), fingerprint).unwrap();
        let other = ProfileId::parse("shapeprint-shape-v2").unwrap();
        let v2 = fingerprint_digest(&other, fingerprint).unwrap();
        assert_ne!(v1, v2);
    }

    #[test]
    fn verify_rejects_a_different_shape() {
        let canonicalizer = Canonicalizer::default();
        let original = Descriptor::array(Descriptor::string());
        let claimed = compute_shape_digest(&original, None, &canonicalizer).unwrap();
        assert!(verify_shape_digest(&original, None, &claimed, &canonicalizer).unwrap());

        let changed = Descriptor::array(Descriptor::number());
        assert!(!verify_shape_digest(&changed, None, &claimed, &canonicalizer).unwrap());
    }

    #[test]
    fn unsupported_kind_surfaces_through_digest() {
        let err = compute_shape_digest(&Descriptor::date(), None, &Canonicalizer::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DigestError::Shape(crate::ShapeError::UnsupportedKind { kind: "date" })
        ));
    }
}
