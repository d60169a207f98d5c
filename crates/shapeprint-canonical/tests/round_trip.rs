//! Regenerated expressions evaluated back into descriptors.
//!
//! `Evaluator` understands exactly the `make.*` grammar the regenerator
//! emits, standing in for a schema-construction facility.

use serde_json::{json, Value};
use shapeprint_canonical::{regenerate, shape_of, Descriptor};

struct Evaluator<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Evaluator<'a> {
    fn eval(src: &'a str) -> Descriptor {
        let mut evaluator = Evaluator { src, pos: 0 };
        let descriptor = evaluator.expr();
        assert_eq!(evaluator.pos, src.len(), "trailing input in {src}");
        descriptor
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) {
        assert!(self.eat(token), "expected {token:?} at {:?}", self.rest());
    }

    fn ident(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn json(&mut self) -> Value {
        let mut stream = serde_json::Deserializer::from_str(self.rest()).into_iter::<Value>();
        let value = stream.next().expect("json value").expect("valid json");
        self.pos += stream.byte_offset();
        value
    }

    /// Scalars are not self-delimiting in a JSON stream, so find the
    /// shortest prefix before a `)` that parses.
    fn default_value(&mut self) -> Value {
        let rest = self.rest();
        for (end, _) in rest.match_indices(')') {
            if let Ok(value) = serde_json::from_str::<Value>(&rest[..end]) {
                self.pos += end;
                return value;
            }
        }
        panic!("unterminated default in {rest:?}");
    }

    fn string(&mut self) -> String {
        match self.json() {
            Value::String(s) => s,
            other => panic!("expected string, got {other}"),
        }
    }

    fn list(&mut self) -> Vec<Descriptor> {
        self.expect("[");
        let mut items = Vec::new();
        while !self.eat("]") {
            if !items.is_empty() {
                self.expect(",");
            }
            items.push(self.expr());
        }
        items
    }

    fn expr(&mut self) -> Descriptor {
        self.expect("make.");
        let constructor = self.ident();
        self.expect("(");
        let mut descriptor = match constructor {
            "string" => Descriptor::string(),
            "number" => Descriptor::number(),
            "boolean" => Descriptor::boolean(),
            "undefined" => Descriptor::undefined(),
            "null" => Descriptor::null(),
            "date" => Descriptor::date(),
            "literal" => Descriptor::literal(self.string()),
            "enum" => {
                let labels = self.json();
                let labels = labels.as_array().expect("enum labels");
                Descriptor::enumeration(labels.iter().map(|l| l.as_str().expect("label")))
            }
            "array" => Descriptor::array(self.expr()),
            "tuple" => Descriptor::tuple(self.list()),
            "union" => Descriptor::union(self.list()),
            "object" => {
                self.expect("{");
                let mut fields = Vec::new();
                while !self.eat("}") {
                    if !fields.is_empty() {
                        self.expect(",");
                    }
                    let key = if self.rest().starts_with('"') {
                        self.string()
                    } else {
                        self.ident().to_string()
                    };
                    self.expect(":");
                    fields.push((key, self.expr()));
                }
                Descriptor::object(fields)
            }
            other => panic!("unknown constructor {other}"),
        };
        self.expect(")");

        loop {
            if self.eat(".optional()") {
                descriptor = descriptor.optional();
            } else if self.eat(".nullable()") {
                descriptor = descriptor.nullable();
            } else if self.eat(".default(") {
                descriptor = descriptor.with_default(self.default_value());
                self.expect(")");
            } else {
                return descriptor;
            }
        }
    }
}

fn fingerprintable_trees() -> Vec<Descriptor> {
    vec![
        Descriptor::string(),
        Descriptor::literal("a \"quoted\" label"),
        Descriptor::literal(7i64),
        Descriptor::enumeration(["draft", "published", "archived"]),
        Descriptor::array(Descriptor::union([Descriptor::number(), Descriptor::null()])),
        Descriptor::tuple(Vec::<Descriptor>::new()),
        Descriptor::tuple([Descriptor::boolean(), Descriptor::undefined()]),
        Descriptor::object(Vec::<(String, Descriptor)>::new()),
        Descriptor::object([
            ("z", Descriptor::string()),
            ("a", Descriptor::array(Descriptor::number())),
            ("with space", Descriptor::object([("inner", Descriptor::boolean())])),
        ]),
    ]
}

#[test]
fn regenerated_code_fingerprints_identically() {
    for tree in fingerprintable_trees() {
        let code = regenerate(&tree).unwrap();
        let rebuilt = Evaluator::eval(&code);
        assert_eq!(
            shape_of(&rebuilt, None).unwrap(),
            shape_of(&tree, None).unwrap(),
            "round trip through {code}"
        );
    }
}

#[test]
fn regenerated_code_reproduces_modifiers() {
    let tree = Descriptor::object([
        ("born", Descriptor::date().optional()),
        ("nick", Descriptor::string().nullable().optional()),
        ("limit", Descriptor::number().with_default(json!(10))),
        ("meta", Descriptor::object([("k", Descriptor::string())]).with_default(json!({"k": "v"}))),
    ]);
    let code = regenerate(&tree).unwrap();
    let rebuilt = Evaluator::eval(&code);
    assert_eq!(rebuilt, tree);
    assert_eq!(regenerate(&rebuilt).unwrap(), code);
}
