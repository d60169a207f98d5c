use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    ProfileId,
    "Identifier of a fingerprint grammar version (pattern: `[A-Za-z0-9_-]{16,128}`)",
    r"^[A-Za-z0-9_-]{16,128}$"
);
newtype!(
    ContextKey,
    "Scope context input identifier in the reserved `$$.` namespace, like `$$.user_id`.",
    r"^\$\$\.[A-Za-z_][A-Za-z0-9_.]*$"
);

impl ProfileId {
    /// Name of the grammar implemented by this crate.
    pub const SHAPE_V1: &'static str = "shapeprint-shape-v1";
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new(Self::SHAPE_V1.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_satisfies_its_own_pattern() {
        assert!(ProfileId::parse(ProfileId::SHAPE_V1).is_ok());
        assert_eq!(ProfileId::default().as_ref(), ProfileId::SHAPE_V1);
    }

    #[test]
    fn context_keys_require_reserved_prefix() {
        assert!(ContextKey::parse("$$.tenant").is_ok());
        assert!(ContextKey::parse("$$.request.locale").is_ok());
        assert!(ContextKey::parse("tenant").is_err());
        assert!(ContextKey::parse("$.tenant").is_err());
        assert!(ContextKey::parse("$$.").is_err());
        assert!(ContextKey::parse("$$.9lives").is_err());
    }

    #[test]
    fn mismatch_names_the_identifier_type() {
        match ContextKey::parse("oops").unwrap_err() {
            ValidationError::PatternMismatch { field, value } => {
                assert_eq!(field, "ContextKey");
                assert_eq!(value, "oops");
            }
        }
    }
}
