pub mod compare;
pub mod digest;
pub mod fingerprint;
pub mod kinds;
pub mod regenerate;

use shapeprint_canonical::{Canonicalizer, ProfileId};

/// Builds a canonicalizer from the shared command-line options.
pub(crate) fn canonicalizer(
    profile: Option<String>,
    max_depth: Option<usize>,
) -> Result<Canonicalizer, Box<dyn std::error::Error>> {
    let profile = match profile {
        Some(p) => ProfileId::parse(p).map_err(|e| format!("Invalid profile ID: {}", e))?,
        None => ProfileId::default(),
    };
    let canonicalizer = Canonicalizer::new(profile);
    Ok(match max_depth {
        Some(depth) => canonicalizer.with_max_depth(depth),
        None => canonicalizer,
    })
}
