//! Regeneration of constructor expressions from descriptor trees.
//!
//! The output is a `make.*` expression that a compatible schema-construction
//! facility evaluates back into an equivalent descriptor. Only context-free
//! trees are reconstructable: opaque leaves, scope boundaries and branded
//! nodes are rejected, while the optional/nullable/default modifiers that
//! fingerprints do not cover are supported here.

use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

use crate::canonicalizer::DEFAULT_MAX_DEPTH;
use crate::descriptor::{Descriptor, Node};
use crate::errors::ShapeError;

/// Emits constructor expressions.
#[derive(Debug, Clone)]
pub struct Regenerator {
    max_depth: usize,
}

impl Default for Regenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Regenerator {
    /// Creates a regenerator with the default depth bound.
    pub fn new() -> Self {
        Self {
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

    /// Produces the constructor expression for `node`.
    pub fn regenerate(&self, node: &Descriptor) -> Result<String, ShapeError> {
        debug!(kind = %node.kind(), "regenerating descriptor");
        self.walk(node, 1).inspect_err(|err| {
            debug!(error = %err, "regeneration aborted");
        })
    }

    fn walk(&self, node: &Descriptor, depth: usize) -> Result<String, ShapeError> {
        if depth > self.max_depth {
            return Err(ShapeError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        if node.brand.is_some() {
            return Err(ShapeError::UnsupportedKind { kind: "brand" });
        }

        let code = match &node.node {
            Node::String => "make.string()".to_string(),
            Node::Number => "make.number()".to_string(),
            Node::Boolean => "make.boolean()".to_string(),
            Node::Undefined => "make.undefined()".to_string(),
            Node::Null => "make.null()".to_string(),
            Node::Date => "make.date()".to_string(),
            Node::Literal { value } => format!("make.literal({})", quote(&value.to_string())),
            Node::Enum { values } => {
                let labels: Vec<String> = values.iter().map(|v| quote(v)).collect();
                format!("make.enum([{}])", labels.join(","))
            }
            Node::Array { element } => format!("make.array({})", self.walk(element, depth + 1)?),
            Node::Tuple { items } => format!("make.tuple([{}])", self.walk_all(items, depth)?),
            Node::Object { fields } => {
                let mut parts = Vec::with_capacity(fields.len());
                for (name, field) in fields {
                    parts.push(format!("{}:{}", object_key(name), self.walk(field, depth + 1)?));
                }
                format!("make.object({{{}}})", parts.join(","))
            }
            Node::Union { options } => format!("make.union([{}])", self.walk_all(options, depth)?),
            Node::Optional { inner } => format!("{}.optional()", self.walk(inner, depth + 1)?),
            Node::Nullable { inner } => format!("{}.nullable()", self.walk(inner, depth + 1)?),
            Node::Default { inner, value } => {
                format!("{}.default({})", self.walk(inner, depth + 1)?, value)
            }
            Node::Opaque { .. } | Node::ScopeBoundary { .. } => {
                return Err(ShapeError::unsupported(node.kind()));
            }
        };
        Ok(code)
    }

    fn walk_all(&self, nodes: &[Descriptor], depth: usize) -> Result<String, ShapeError> {
        let mut parts = Vec::with_capacity(nodes.len());
        for node in nodes {
            parts.push(self.walk(node, depth + 1)?);
        }
        Ok(parts.join(","))
    }
}

/// Constructor expression for `node`, using default settings.
pub fn regenerate(node: &Descriptor) -> Result<String, ShapeError> {
    Regenerator::new().regenerate(node)
}

/// Double-quoted string literal with JSON escaping.
fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

/// Bare identifier when possible, otherwise a quoted key.
fn object_key(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let is_identifier = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if is_identifier {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(quote(name))
    }
}
