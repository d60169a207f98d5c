use thiserror::Error;

/// Failure of a descriptor traversal.
///
/// The first failing node aborts the whole traversal; no partial output is
/// ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The traversal reached a node kind (or, for regeneration, brand
    /// metadata) outside the set it supports.
    #[error("{kind} not supported")]
    UnsupportedKind {
        /// Kind name, as in [`DescriptorKind::name`](crate::DescriptorKind::name),
        /// or `"brand"`.
        kind: &'static str,
    },
    /// The tree nests deeper than the configured bound.
    #[error("descriptor nesting exceeds depth limit {limit}")]
    DepthLimitExceeded {
        /// Configured maximum depth.
        limit: usize,
    },
}

impl ShapeError {
    pub(crate) fn unsupported(kind: crate::DescriptorKind) -> Self {
        ShapeError::UnsupportedKind { kind: kind.name() }
    }
}
