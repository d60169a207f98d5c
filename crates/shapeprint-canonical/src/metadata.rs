//! Brand and scope metadata.
//!
//! Both are plain values set when a descriptor is built. A brand rides on
//! [`Descriptor::brand`]; a scope is introduced by a
//! [`Node::ScopeBoundary`](crate::Node::ScopeBoundary) and applies to the
//! whole subtree beneath it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::Descriptor;
use crate::identifiers::ContextKey;

/// Nominal tag layered on an otherwise structural shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Brand name; the only part that reaches the fingerprint.
    pub name: String,
    /// Authoring-time strictness flag. Does not affect fingerprints.
    #[serde(default)]
    pub strict: bool,
}

impl Brand {
    /// Creates a brand.
    pub fn new(name: impl Into<String>, strict: bool) -> Self {
        Self {
            name: name.into(),
            strict,
        }
    }
}

/// Named contextual requirement attached to a subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    /// Scope name, embedded in fingerprints.
    pub name: String,
    /// External inputs the scope needs to resolve, keyed by `$$.`-prefixed
    /// identifiers. Not part of the fingerprint.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub context: IndexMap<ContextKey, Descriptor>,
}

impl Scope {
    /// Creates a scope with no context inputs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: IndexMap::new(),
        }
    }

    /// Returns `self` with one more required input.
    pub fn with_input(mut self, key: ContextKey, descriptor: Descriptor) -> Self {
        self.context.insert(key, descriptor);
        self
    }

    /// Looks up the descriptor of a context input by its full key.
    pub fn input(&self, key: &str) -> Option<&Descriptor> {
        self.context.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_keys_are_validated_on_parse() {
        let ok: Scope = serde_json::from_value(json!({
            "name": "Request",
            "context": { "$$.user_id": { "type": "string" } }
        }))
        .unwrap();
        assert_eq!(ok.input("$$.user_id"), Some(&Descriptor::string()));

        let bad = serde_json::from_value::<Scope>(json!({
            "name": "Request",
            "context": { "user_id": { "type": "string" } }
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn brand_strict_defaults_to_false() {
        let brand: Brand = serde_json::from_value(json!({ "name": "Email" })).unwrap();
        assert_eq!(brand, Brand::new("Email", false));
    }
}
