//! Compare command implementation.

use crate::input::read_descriptor;
use crate::output::format_json;
use serde_json::json;
use shapeprint_canonical::Canonicalizer;

pub fn run(
    left: String,
    right: String,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let canonicalizer = Canonicalizer::default();

    let mut fingerprints = Vec::with_capacity(2);
    for path in [&left, &right] {
        let descriptor = read_descriptor(Some(path.as_str()), canonicalizer.max_depth())?;
        let fingerprint = canonicalizer
            .shape_of(&descriptor, None)
            .map_err(|e| format!("Canonicalization of {} failed: {}", path, e))?;
        fingerprints.push(fingerprint);
    }
    let equivalent = fingerprints[0] == fingerprints[1];
    tracing::info!(equivalent, "compared descriptors");

    if json_output {
        let output = json!({
            "equivalent": equivalent,
            "left": fingerprints[0],
            "right": fingerprints[1],
        });
        println!("{}", format_json(&output));
    } else if equivalent {
        println!("equivalent");
    } else {
        println!("different");
        println!("  {}: {}", left, fingerprints[0]);
        println!("  {}: {}", right, fingerprints[1]);
    }

    if strict && !equivalent {
        std::process::exit(1);
    }

    Ok(())
}
