//! Fingerprint command implementation.

use crate::input::read_descriptor;
use crate::output::format_json;
use serde_json::json;
use shapeprint_canonical::{fingerprint_digest, HygieneStatus, Scope};

pub fn run(
    input: Option<String>,
    scope: Option<String>,
    max_depth: Option<usize>,
    profile: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let canonicalizer = super::canonicalizer(profile, max_depth)?;
    let descriptor = read_descriptor(input.as_deref(), canonicalizer.max_depth())?;
    let scope = scope.map(Scope::new);

    let result = canonicalizer
        .canonicalize(&descriptor, scope.as_ref())
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    if result.report.status == HygieneStatus::Ambiguous {
        tracing::warn!(warnings = ?result.report.warnings, "fingerprint embeds ambiguous labels");
    }

    if json_output {
        let digest = fingerprint_digest(canonicalizer.profile(), &result.fingerprint)?;
        let output = json!({
            "fingerprint": result.fingerprint,
            "digest": serde_json::to_value(&digest)?,
            "report": serde_json::to_value(&result.report)?,
        });
        println!("{}", format_json(&output));
    } else {
        println!("{}", result.fingerprint);
    }
    Ok(())
}
