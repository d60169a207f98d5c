//! Descriptor tree: the structural representation of a schema.
//!
//! Trees are built once, either by an external schema-definition facility,
//! by deserializing JSON, or with the constructors below, and are read-only
//! afterwards. Field, item and option order is part of a node's identity.
//!
//! The JSON form is internally tagged by `"type"`:
//!
//! ```json
//! {"type": "object", "fields": {"email": {"type": "string", "brand": {"name": "Email"}}}}
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::metadata::{Brand, Scope};

/// A descriptor node together with its side metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Kind-specific payload.
    #[serde(flatten)]
    pub node: Node,
    /// Optional nominal tag layered on the structural shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
}

/// Closed set of descriptor shapes.
///
/// Equality is order-sensitive everywhere, object fields included, so two
/// equal nodes always share a fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Any string.
    String,
    /// Any number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// The undefined value.
    Undefined,
    /// The null value.
    Null,
    /// A date.
    Date,
    /// A single fixed value.
    Literal {
        /// The fixed value.
        value: Literal,
    },
    /// One of an insertion-ordered set of labels.
    Enum {
        /// Allowed labels, in declared order.
        values: Vec<String>,
    },
    /// Homogeneous list.
    Array {
        /// Element descriptor.
        element: Box<Descriptor>,
    },
    /// Fixed-arity positional list.
    Tuple {
        /// Item descriptors, by position.
        items: Vec<Descriptor>,
    },
    /// Record with named fields.
    Object {
        /// Field descriptors in insertion order.
        fields: IndexMap<String, Descriptor>,
    },
    /// Any one of several shapes.
    Union {
        /// Option descriptors, in declared order.
        options: Vec<Descriptor>,
    },
    /// Inner shape, or absent.
    Optional {
        /// Wrapped descriptor.
        inner: Box<Descriptor>,
    },
    /// Inner shape, or null.
    Nullable {
        /// Wrapped descriptor.
        inner: Box<Descriptor>,
    },
    /// Inner shape with a declared default value.
    Default {
        /// Wrapped descriptor.
        inner: Box<Descriptor>,
        /// Declared default, carried as an opaque literal.
        value: Value,
    },
    /// Leaf whose structure is identified only by a caller-supplied token.
    Opaque {
        /// Identifying token.
        token: String,
    },
    /// Subtree that is only resolvable given the named scope's context.
    ScopeBoundary {
        /// Scoped descriptor.
        inner: Box<Descriptor>,
        /// Scope that applies beneath this boundary.
        scope: Scope,
    },
}

/// Scalar payload of a literal node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// `null`.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Unsigned integer beyond the `i64` range.
    UInt(u64),
    /// Non-integer numeric literal.
    Float(f64),
    /// String literal.
    Str(String),
}

impl fmt::Display for Literal {
    /// Renders the literal as bare text, the form embedded in fingerprints.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::UInt(u) => write!(f, "{}", u),
            Literal::Float(x) => write_number(f, *x),
            Literal::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Writes `x` the way JavaScript's `Number.prototype.toString` does:
/// positional notation for `1e-6 <= |x| < 1e21`, exponent notation with an
/// explicit sign otherwise.
fn write_number(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if x == 0.0 {
        return f.write_str("0");
    }
    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", x);
    }
    let exp = format!("{:e}", x);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{}e+{}", mantissa, power),
        _ => f.write_str(&exp),
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::String, Node::String)
            | (Node::Number, Node::Number)
            | (Node::Boolean, Node::Boolean)
            | (Node::Undefined, Node::Undefined)
            | (Node::Null, Node::Null)
            | (Node::Date, Node::Date) => true,
            (Node::Literal { value: a }, Node::Literal { value: b }) => a == b,
            (Node::Enum { values: a }, Node::Enum { values: b }) => a == b,
            (Node::Array { element: a }, Node::Array { element: b }) => a == b,
            (Node::Tuple { items: a }, Node::Tuple { items: b }) => a == b,
            (Node::Object { fields: a }, Node::Object { fields: b }) => a.iter().eq(b.iter()),
            (Node::Union { options: a }, Node::Union { options: b }) => a == b,
            (Node::Optional { inner: a }, Node::Optional { inner: b }) => a == b,
            (Node::Nullable { inner: a }, Node::Nullable { inner: b }) => a == b,
            (
                Node::Default { inner: a, value: x },
                Node::Default { inner: b, value: y },
            ) => a == b && x == y,
            (Node::Opaque { token: a }, Node::Opaque { token: b }) => a == b,
            (
                Node::ScopeBoundary { inner: a, scope: x },
                Node::ScopeBoundary { inner: b, scope: y },
            ) => a == b && x == y,
            _ => false,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Literal::Int(i),
            Err(_) => Literal::UInt(value),
        }
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

/// Fieldless discriminant of [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// [`Node::String`].
    String,
    /// [`Node::Number`].
    Number,
    /// [`Node::Boolean`].
    Boolean,
    /// [`Node::Undefined`].
    Undefined,
    /// [`Node::Null`].
    Null,
    /// [`Node::Date`].
    Date,
    /// [`Node::Literal`].
    Literal,
    /// [`Node::Enum`].
    Enum,
    /// [`Node::Array`].
    Array,
    /// [`Node::Tuple`].
    Tuple,
    /// [`Node::Object`].
    Object,
    /// [`Node::Union`].
    Union,
    /// [`Node::Optional`].
    Optional,
    /// [`Node::Nullable`].
    Nullable,
    /// [`Node::Default`].
    Default,
    /// [`Node::Opaque`].
    Opaque,
    /// [`Node::ScopeBoundary`].
    ScopeBoundary,
}

impl DescriptorKind {
    /// Every kind, in declaration order.
    pub const ALL: [DescriptorKind; 17] = [
        DescriptorKind::String,
        DescriptorKind::Number,
        DescriptorKind::Boolean,
        DescriptorKind::Undefined,
        DescriptorKind::Null,
        DescriptorKind::Date,
        DescriptorKind::Literal,
        DescriptorKind::Enum,
        DescriptorKind::Array,
        DescriptorKind::Tuple,
        DescriptorKind::Object,
        DescriptorKind::Union,
        DescriptorKind::Optional,
        DescriptorKind::Nullable,
        DescriptorKind::Default,
        DescriptorKind::Opaque,
        DescriptorKind::ScopeBoundary,
    ];

    /// Stable name, identical to the JSON `"type"` tag.
    pub fn name(self) -> &'static str {
        match self {
            DescriptorKind::String => "string",
            DescriptorKind::Number => "number",
            DescriptorKind::Boolean => "boolean",
            DescriptorKind::Undefined => "undefined",
            DescriptorKind::Null => "null",
            DescriptorKind::Date => "date",
            DescriptorKind::Literal => "literal",
            DescriptorKind::Enum => "enum",
            DescriptorKind::Array => "array",
            DescriptorKind::Tuple => "tuple",
            DescriptorKind::Object => "object",
            DescriptorKind::Union => "union",
            DescriptorKind::Optional => "optional",
            DescriptorKind::Nullable => "nullable",
            DescriptorKind::Default => "default",
            DescriptorKind::Opaque => "opaque",
            DescriptorKind::ScopeBoundary => "scope_boundary",
        }
    }

    /// Whether fingerprints are defined for this kind.
    pub fn fingerprintable(self) -> bool {
        !matches!(
            self,
            DescriptorKind::Date
                | DescriptorKind::Optional
                | DescriptorKind::Nullable
                | DescriptorKind::Default
        )
    }

    /// Whether this kind can be regenerated (brand metadata aside).
    pub fn regenerable(self) -> bool {
        !matches!(self, DescriptorKind::Opaque | DescriptorKind::ScopeBoundary)
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    /// Returns the discriminant of this node.
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Node::String => DescriptorKind::String,
            Node::Number => DescriptorKind::Number,
            Node::Boolean => DescriptorKind::Boolean,
            Node::Undefined => DescriptorKind::Undefined,
            Node::Null => DescriptorKind::Null,
            Node::Date => DescriptorKind::Date,
            Node::Literal { .. } => DescriptorKind::Literal,
            Node::Enum { .. } => DescriptorKind::Enum,
            Node::Array { .. } => DescriptorKind::Array,
            Node::Tuple { .. } => DescriptorKind::Tuple,
            Node::Object { .. } => DescriptorKind::Object,
            Node::Union { .. } => DescriptorKind::Union,
            Node::Optional { .. } => DescriptorKind::Optional,
            Node::Nullable { .. } => DescriptorKind::Nullable,
            Node::Default { .. } => DescriptorKind::Default,
            Node::Opaque { .. } => DescriptorKind::Opaque,
            Node::ScopeBoundary { .. } => DescriptorKind::ScopeBoundary,
        }
    }
}

impl From<Node> for Descriptor {
    fn from(node: Node) -> Self {
        Descriptor::new(node)
    }
}

impl Descriptor {
    /// Wraps a node without metadata.
    pub fn new(node: Node) -> Self {
        Self { node, brand: None }
    }

    /// `string` leaf.
    pub fn string() -> Self {
        Self::new(Node::String)
    }

    /// `number` leaf.
    pub fn number() -> Self {
        Self::new(Node::Number)
    }

    /// `boolean` leaf.
    pub fn boolean() -> Self {
        Self::new(Node::Boolean)
    }

    /// `undefined` leaf.
    pub fn undefined() -> Self {
        Self::new(Node::Undefined)
    }

    /// `null` leaf.
    pub fn null() -> Self {
        Self::new(Node::Null)
    }

    /// `date` leaf.
    pub fn date() -> Self {
        Self::new(Node::Date)
    }

    /// Literal leaf.
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::new(Node::Literal {
            value: value.into(),
        })
    }

    /// Enum over the given labels, kept in the given order.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Node::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Array of `element`.
    pub fn array(element: Descriptor) -> Self {
        Self::new(Node::Array {
            element: Box::new(element),
        })
    }

    /// Tuple of `items`.
    pub fn tuple(items: impl IntoIterator<Item = Descriptor>) -> Self {
        Self::new(Node::Tuple {
            items: items.into_iter().collect(),
        })
    }

    /// Object with `fields` in iteration order. A repeated name keeps its
    /// first position and takes the last descriptor.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Descriptor)>,
        K: Into<String>,
    {
        Self::new(Node::Object {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    /// Union of `options`.
    pub fn union(options: impl IntoIterator<Item = Descriptor>) -> Self {
        Self::new(Node::Union {
            options: options.into_iter().collect(),
        })
    }

    /// Opaque leaf identified by `token`.
    pub fn opaque(token: impl Into<String>) -> Self {
        Self::new(Node::Opaque {
            token: token.into(),
        })
    }

    /// Marks `inner` as resolvable only within `scope`.
    pub fn scope_boundary(inner: Descriptor, scope: Scope) -> Self {
        Self::new(Node::ScopeBoundary {
            inner: Box::new(inner),
            scope,
        })
    }

    /// Wraps `self` as optional.
    pub fn optional(self) -> Self {
        Self::new(Node::Optional {
            inner: Box::new(self),
        })
    }

    /// Wraps `self` as nullable.
    pub fn nullable(self) -> Self {
        Self::new(Node::Nullable {
            inner: Box::new(self),
        })
    }

    /// Wraps `self` with a declared default value.
    pub fn with_default(self, value: Value) -> Self {
        Self::new(Node::Default {
            inner: Box::new(self),
            value,
        })
    }

    /// Returns `self` carrying the given brand, replacing any previous one.
    pub fn branded(mut self, name: impl Into<String>, strict: bool) -> Self {
        self.brand = Some(Brand::new(name, strict));
        self
    }

    /// Returns the discriminant of the node.
    pub fn kind(&self) -> DescriptorKind {
        self.node.kind()
    }

    /// Direct structural children, in order. Scope context inputs are
    /// metadata and not included.
    pub fn children(&self) -> Vec<&Descriptor> {
        match &self.node {
            Node::Array { element } => vec![element.as_ref()],
            Node::Tuple { items } => items.iter().collect(),
            Node::Object { fields } => fields.values().collect(),
            Node::Union { options } => options.iter().collect(),
            Node::Optional { inner }
            | Node::Nullable { inner }
            | Node::Default { inner, .. }
            | Node::ScopeBoundary { inner, .. } => vec![inner.as_ref()],
            _ => Vec::new(),
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            for child in node.children() {
                stack.push((child, depth + 1));
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(kind: DescriptorKind) -> Descriptor {
        match kind {
            DescriptorKind::String => Descriptor::string(),
            DescriptorKind::Number => Descriptor::number(),
            DescriptorKind::Boolean => Descriptor::boolean(),
            DescriptorKind::Undefined => Descriptor::undefined(),
            DescriptorKind::Null => Descriptor::null(),
            DescriptorKind::Date => Descriptor::date(),
            DescriptorKind::Literal => Descriptor::literal("a"),
            DescriptorKind::Enum => Descriptor::enumeration(["a"]),
            DescriptorKind::Array => Descriptor::array(Descriptor::string()),
            DescriptorKind::Tuple => Descriptor::tuple([Descriptor::string()]),
            DescriptorKind::Object => Descriptor::object([("a", Descriptor::string())]),
            DescriptorKind::Union => Descriptor::union([Descriptor::string()]),
            DescriptorKind::Optional => Descriptor::string().optional(),
            DescriptorKind::Nullable => Descriptor::string().nullable(),
            DescriptorKind::Default => Descriptor::string().with_default(json!("a")),
            DescriptorKind::Opaque => Descriptor::opaque("a"),
            DescriptorKind::ScopeBoundary => {
                Descriptor::scope_boundary(Descriptor::string(), Scope::new("s"))
            }
        }
    }

    #[test]
    fn kind_names_match_json_tags() {
        for kind in DescriptorKind::ALL {
            let descriptor = sample(kind);
            assert_eq!(descriptor.kind(), kind);
            let value = serde_json::to_value(&descriptor).unwrap();
            assert_eq!(value["type"], kind.name());
            let back: Descriptor = serde_json::from_value(value).unwrap();
            assert_eq!(back.kind(), kind);
        }
    }

    #[test]
    fn object_fields_keep_json_order() {
        let parsed: Descriptor = serde_json::from_value(json!({
            "type": "object",
            "fields": {
                "zeta": { "type": "string" },
                "alpha": { "type": "number" }
            }
        }))
        .unwrap();
        let Node::Object { fields } = &parsed.node else {
            panic!("expected object");
        };
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn literal_scalars_deserialize_by_json_type() {
        let cases = [
            (json!(null), Literal::Null),
            (json!(true), Literal::Bool(true)),
            (json!(7), Literal::Int(7)),
            (json!(u64::MAX), Literal::UInt(u64::MAX)),
            (json!(1.5), Literal::Float(1.5)),
            (json!("on"), Literal::Str("on".into())),
        ];
        for (raw, expected) in cases {
            let parsed: Descriptor =
                serde_json::from_value(json!({ "type": "literal", "value": raw })).unwrap();
            assert_eq!(parsed, Descriptor::literal(expected));
        }
    }

    #[test]
    fn brand_round_trips_beside_the_tag() {
        let descriptor = Descriptor::string().branded("Email", true);
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            value,
            json!({ "type": "string", "brand": { "name": "Email", "strict": true } })
        );
        let back: Descriptor = serde_json::from_value(value).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn unknown_kind_is_rejected_at_parse_time() {
        let result = serde_json::from_value::<Descriptor>(json!({ "type": "bigint" }));
        assert!(result.is_err());
    }

    #[test]
    fn depth_counts_nodes_on_longest_path() {
        let tree = Descriptor::object([
            ("a", Descriptor::string()),
            ("b", Descriptor::array(Descriptor::array(Descriptor::number()))),
        ]);
        assert_eq!(tree.depth(), 4);
        assert_eq!(Descriptor::null().depth(), 1);
    }

    #[test]
    fn float_literals_render_like_javascript_numbers() {
        let cases = [
            (3.0, "3"),
            (2.5, "2.5"),
            (-0.0, "0"),
            (0.000001, "0.000001"),
            (1e-7, "1e-7"),
            (1.5e-7, "1.5e-7"),
            (1e20, "100000000000000000000"),
            (1e21, "1e+21"),
            (-1.25e25, "-1.25e+25"),
            (f64::NAN, "NaN"),
            (f64::NEG_INFINITY, "-Infinity"),
        ];
        for (value, expected) in cases {
            assert_eq!(Literal::Float(value).to_string(), expected, "{value:?}");
        }
        assert_eq!(Literal::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Literal::from(5u64), Literal::Int(5));
    }

    #[test]
    fn equality_respects_field_order() {
        let ab = Descriptor::object([("a", Descriptor::string()), ("b", Descriptor::number())]);
        let ba = Descriptor::object([("b", Descriptor::number()), ("a", Descriptor::string())]);
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
        assert_ne!(Descriptor::string(), Descriptor::number());
    }
}
