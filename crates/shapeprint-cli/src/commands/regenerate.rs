//! Regenerate command implementation.

use crate::input::read_descriptor;
use shapeprint_canonical::Regenerator;

pub fn run(input: Option<String>, max_depth: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let regenerator = match max_depth {
        Some(depth) => Regenerator::new().with_max_depth(depth),
        None => Regenerator::new(),
    };
    let descriptor = read_descriptor(input.as_deref(), regenerator.max_depth())?;

    let code = regenerator
        .regenerate(&descriptor)
        .map_err(|e| format!("Regeneration failed: {}", e))?;

    println!("{}", code);
    Ok(())
}
