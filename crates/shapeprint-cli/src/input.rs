//! Descriptor input from files or stdin.

use serde::Deserialize;
use shapeprint_canonical::Descriptor;
use std::io::{self, Read};
use thiserror::Error;

/// JSON levels allowed beyond two per descriptor level, for default values
/// and scope contexts.
const NESTING_ALLOWANCE: usize = 32;

/// Errors while loading a descriptor.
#[derive(Error, Debug)]
pub enum InputError {
    /// File could not be read.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Stdin could not be read.
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    /// Input nests far deeper than the configured depth bound.
    #[error(
        "descriptor JSON nests {nesting} levels, beyond the {limit} allowed for depth limit {max_depth}"
    )]
    TooDeep {
        /// Deepest bracket nesting found.
        nesting: usize,
        /// Largest nesting accepted.
        limit: usize,
        /// Configured descriptor depth bound.
        max_depth: usize,
    },
    /// Input is not a valid descriptor.
    #[error("invalid descriptor JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads a descriptor from `input`, or from stdin when `input` is `None` or `-`.
///
/// Parsing is not capped by serde_json's recursion limit; nesting is bounded
/// by `max_depth` instead, so over-deep trees reach the traversal's own
/// depth check.
pub fn read_descriptor(input: Option<&str>, max_depth: usize) -> Result<Descriptor, InputError> {
    let json_str = match input {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.to_string(),
                source,
            })?
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(InputError::Stdin)?;
            buffer
        }
    };

    let limit = max_depth.saturating_mul(2).saturating_add(NESTING_ALLOWANCE);
    let nesting = json_nesting(&json_str);
    if nesting > limit {
        return Err(InputError::TooDeep {
            nesting,
            limit,
            max_depth,
        });
    }

    let mut json = serde_json::Deserializer::from_str(&json_str);
    json.disable_recursion_limit();
    let descriptor = Descriptor::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    tracing::debug!(kind = %descriptor.kind(), depth = descriptor.depth(), "loaded descriptor");
    Ok(descriptor)
}

/// Deepest `{`/`[` nesting in `text`, ignoring brackets inside strings.
fn json_nesting(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
