use tracing::{debug, trace};

use crate::descriptor::{Descriptor, Node};
use crate::errors::ShapeError;
use crate::hygiene::{HygieneReport, HygieneStatus};
use crate::identifiers::ProfileId;
use crate::metadata::{Brand, Scope};

/// Maximum nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Result of canonicalization.
#[derive(Debug)]
pub struct CanonicalizationResult {
    /// Canonical fingerprint of the descriptor tree.
    pub fingerprint: String,
    /// Hygiene report describing the labels embedded in the fingerprint.
    pub report: HygieneReport,
}

/// Canonicalizer that emits deterministic structural fingerprints.
///
/// Fingerprint grammar, per node kind:
///
/// | Kind | Encoding |
/// |---|---|
/// | string, number, boolean, undefined, null | `_String`, `_Number`, `_Boolean`, `_Undefined`, `_Null` |
/// | literal | `_Literal(v)` |
/// | enum | `_Enum(v1,v2,...)` |
/// | array | `_Array(e)` |
/// | tuple | `_Tuple(i1,i2,...)` |
/// | object | `_Object(name1:f1,name2:f2,...)` |
/// | union | `_Union(o1,o2,...)` |
/// | opaque | `_Custom(token)` |
///
/// A branded node is wrapped as `_Branded(brand,shape)`; a node under an
/// active scope as `_Scoped(scope,shape)`, outside any brand wrapper.
/// Date, optional, nullable and default nodes are not fingerprintable.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    profile: ProfileId,
    max_depth: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(ProfileId::default())
    }
}

impl Canonicalizer {
    /// Creates a new canonicalizer for the provided profile.
    pub fn new(profile: ProfileId) -> Self {
        Self {
            profile,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum accepted nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Maximum accepted nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Profile reported alongside fingerprints.
    pub fn profile(&self) -> &ProfileId {
        &self.profile
    }

    /// Produces the fingerprint of `node` under the ambient `scope`.
    pub fn shape_of(&self, node: &Descriptor, scope: Option<&Scope>) -> Result<String, ShapeError> {
        self.canonicalize(node, scope).map(|result| result.fingerprint)
    }

    /// Produces the fingerprint + hygiene report.
    pub fn canonicalize(
        &self,
        node: &Descriptor,
        scope: Option<&Scope>,
    ) -> Result<CanonicalizationResult, ShapeError> {
        self.canonicalize_with_report(node, scope)
            .map_err(|(err, _)| err)
    }

    /// Produces the fingerprint + hygiene report, returning the report even on error.
    pub fn canonicalize_with_report(
        &self,
        node: &Descriptor,
        scope: Option<&Scope>,
    ) -> Result<CanonicalizationResult, (ShapeError, HygieneReport)> {
        debug!(kind = %node.kind(), scope = ?scope.map(|s| &s.name), "canonicalizing descriptor");
        let mut report = HygieneReport::new(self.profile.clone());
        if let Some(scope) = scope {
            report.check_label(&scope.name);
        }

        match self.walk(node, scope, 1, &mut report) {
            Ok(fingerprint) => Ok(CanonicalizationResult {
                fingerprint,
                report,
            }),
            Err(err) => {
                debug!(error = %err, "canonicalization aborted");
                report.status = HygieneStatus::Invalid;
                Err((err, report))
            }
        }
    }

    fn walk(
        &self,
        node: &Descriptor,
        scope: Option<&Scope>,
        depth: usize,
        report: &mut HygieneReport,
    ) -> Result<String, ShapeError> {
        if depth > self.max_depth {
            return Err(ShapeError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        report.count("nodes");
        report.observe_depth(depth);
        trace!(kind = %node.kind(), depth, "visiting node");

        let base = match &node.node {
            Node::String => "_String".to_string(),
            Node::Number => "_Number".to_string(),
            Node::Boolean => "_Boolean".to_string(),
            Node::Undefined => "_Undefined".to_string(),
            Node::Null => "_Null".to_string(),
            Node::Literal { value } => {
                let text = value.to_string();
                report.check_literal(value, &text);
                format!("_Literal({})", text)
            }
            Node::Enum { values } => {
                for value in values {
                    report.check_label(value);
                }
                format!("_Enum({})", values.join(","))
            }
            Node::Array { element } => {
                format!("_Array({})", self.walk(element, scope, depth + 1, report)?)
            }
            Node::Tuple { items } => {
                format!("_Tuple({})", self.walk_all(items, scope, depth, report)?)
            }
            Node::Object { fields } => {
                let mut parts = Vec::with_capacity(fields.len());
                for (name, field) in fields {
                    report.check_label(name);
                    let shape = self.walk(field, scope, depth + 1, report)?;
                    parts.push(format!("{}:{}", name, shape));
                }
                format!("_Object({})", parts.join(","))
            }
            Node::Union { options } => {
                format!("_Union({})", self.walk_all(options, scope, depth, report)?)
            }
            Node::Opaque { token } => {
                report.check_label(token);
                format!("_Custom({})", token)
            }
            // The boundary itself is wrapped with the inherited scope below;
            // everything beneath it sees the boundary's own scope.
            Node::ScopeBoundary { inner, scope: own } => {
                report.count("scope_boundaries");
                report.check_label(&own.name);
                self.walk(inner, Some(own), depth + 1, report)?
            }
            Node::Date | Node::Optional { .. } | Node::Nullable { .. } | Node::Default { .. } => {
                return Err(ShapeError::unsupported(node.kind()));
            }
        };

        if let Some(brand) = &node.brand {
            report.count("brands");
            report.check_label(&brand.name);
        }
        Ok(wrap(base, scope, node.brand.as_ref()))
    }

    fn walk_all(
        &self,
        nodes: &[Descriptor],
        scope: Option<&Scope>,
        depth: usize,
        report: &mut HygieneReport,
    ) -> Result<String, ShapeError> {
        let mut parts = Vec::with_capacity(nodes.len());
        for node in nodes {
            parts.push(self.walk(node, scope, depth + 1, report)?);
        }
        Ok(parts.join(","))
    }
}

/// Applies brand then scope wrapping to a node's base shape.
fn wrap(base: String, scope: Option<&Scope>, brand: Option<&Brand>) -> String {
    let branded = match brand {
        Some(brand) => format!("_Branded({},{})", brand.name, base),
        None => base,
    };
    match scope {
        Some(scope) => format!("_Scoped({},{})", scope.name, branded),
        None => branded,
    }
}

/// Fingerprint of `node` under the ambient `scope`, using default settings.
pub fn shape_of(node: &Descriptor, scope: Option<&Scope>) -> Result<String, ShapeError> {
    Canonicalizer::default().shape_of(node, scope)
}

/// Whether two trees are structurally equivalent, i.e. share a fingerprint.
pub fn same_shape(a: &Descriptor, b: &Descriptor) -> Result<bool, ShapeError> {
    let canonicalizer = Canonicalizer::default();
    Ok(canonicalizer.shape_of(a, None)? == canonicalizer.shape_of(b, None)?)
}
