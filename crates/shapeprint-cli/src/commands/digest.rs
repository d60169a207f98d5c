//! Digest command implementation.

use crate::input::read_descriptor;
use shapeprint_canonical::{compute_shape_digest, Scope};

pub fn run(
    input: Option<String>,
    scope: Option<String>,
    profile: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let canonicalizer = super::canonicalizer(profile, None)?;
    let descriptor = read_descriptor(input.as_deref(), canonicalizer.max_depth())?;
    let scope = scope.map(Scope::new);

    let digest = compute_shape_digest(&descriptor, scope.as_ref(), &canonicalizer)
        .map_err(|e| format!("Digest failed: {}", e))?;

    println!("{}", digest.b64);
    Ok(())
}
