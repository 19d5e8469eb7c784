//! Check command implementation.

use anyhow::Result;
use console::style;

use super::common::load_platform;

/// Execute the check command.
pub fn execute(file: &str, use_models: bool) -> Result<()> {
    let platform = load_platform(file, use_models)?;

    println!(
        "{} {} assembled: {} qubits, {} pairs, {} channels, {} instruments",
        style("✓").green().bold(),
        style(platform.name()).cyan().bold(),
        platform.qubits().len(),
        platform.pairs().len(),
        platform.channels().len(),
        platform.instruments().len()
    );

    let notes = platform.review_notes();
    if !notes.is_empty() {
        println!("\n{} review notes:", style(notes.len()).yellow().bold());
        for note in notes {
            println!("  {} {}", style("!").yellow(), note);
        }
    }

    Ok(())
}
