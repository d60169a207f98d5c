//! Kinds command implementation.

use crate::output;
use serde_json::json;
use shapeprint_canonical::DescriptorKind;

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        for kind in DescriptorKind::ALL {
            let row = json!({
                "kind": kind.name(),
                "fingerprint": kind.fingerprintable(),
                "regenerate": kind.regenerable(),
            });
            println!("{}", serde_json::to_string(&row)?);
        }
    } else {
        output::print_kind_header();
        for kind in DescriptorKind::ALL {
            println!(
                "{}",
                output::format_kind_row(kind, kind.fingerprintable(), kind.regenerable())
            );
        }
    }
    Ok(())
}
