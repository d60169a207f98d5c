//! Structural fingerprints for schema descriptor trees.
//!
//! A descriptor tree describes the shape of a schema: primitive leaves,
//! literals, enums, arrays, tuples, objects, unions, opaque extension
//! leaves and scope boundaries, with optional brand metadata on any node.
//! This crate reads such trees and produces:
//!
//! - a canonical fingerprint string (see [`Canonicalizer`]), comparable
//!   across processes for structural equivalence;
//! - a constructor expression reconstructing the tree (see
//!   [`Regenerator`]) for the context-free subset of node kinds;
//! - a compact digest of a fingerprint, usable as a cache key.
//!
//! Core invariants:
//! - Descriptor trees are never mutated by either traversal
//! - Field, item, option and enum-value order is part of the fingerprint
//! - The first unsupported node aborts a traversal; there is no partial output
//!
#![deny(missing_docs)]

/// Fingerprint generation over descriptor trees.
pub mod canonicalizer;
/// Descriptor tree node variants and constructors.
pub mod descriptor;
/// Digest/identifier primitives.
pub mod digest;
/// Error taxonomy shared by both traversals.
pub mod errors;
/// Hygiene report types emitted during canonicalization.
pub mod hygiene;
/// Validated identifier newtypes.
pub mod identifiers;
/// Brand and scope metadata.
pub mod metadata;
/// Constructor-expression regeneration.
pub mod regenerator;
/// Domain-separated digests of fingerprints.
pub mod shape_digest;
/// Validation helpers used by identifier types.
pub mod validation;

pub use canonicalizer::{same_shape, shape_of, CanonicalizationResult, Canonicalizer};
pub use descriptor::{Descriptor, DescriptorKind, Literal, Node};
pub use digest::{Digest, DigestAlg};
pub use errors::ShapeError;
pub use hygiene::{HygieneReport, HygieneStatus, HygieneWarning};
pub use identifiers::{ContextKey, ProfileId};
pub use metadata::{Brand, Scope};
pub use regenerator::{regenerate, Regenerator};
pub use shape_digest::{
    compute_shape_digest, fingerprint_digest, verify_shape_digest, DigestError,
};
pub use validation::ValidationError;
