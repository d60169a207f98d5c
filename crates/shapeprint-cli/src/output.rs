//! Output formatting utilities.

use serde_json::Value;
use shapeprint_canonical::DescriptorKind;

/// Formats a value as JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a kind and its support flags as a table row.
pub fn format_kind_row(kind: DescriptorKind, fingerprint: bool, regenerate: bool) -> String {
    format!(
        "{:<16} {:<12} {}",
        kind.name(),
        yes_no(fingerprint),
        yes_no(regenerate)
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_kind_header() {
    println!("{:<16} {:<12} {}", "KIND", "FINGERPRINT", "REGENERATE");
    println!("{}", "-".repeat(40));
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
