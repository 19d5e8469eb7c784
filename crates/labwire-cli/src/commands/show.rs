//! Show command implementation.

use anyhow::{Context, Result};
use console::style;

use labwire_platform::Platform;

use super::common::load_platform;

/// Execute the show command.
pub fn execute(file: &str, format: &str, use_models: bool) -> Result<()> {
    let platform = load_platform(file, use_models)?;

    match format.to_lowercase().as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&platform)
                .context("Failed to serialize platform as JSON")?;
            println!("{json}");
        }
        "yaml" | "yml" => {
            let yaml = serde_yaml_ng::to_string(&platform)
                .context("Failed to serialize platform as YAML")?;
            print!("{yaml}");
        }
        "table" => print_table(&platform),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json, yaml"),
    }

    Ok(())
}

fn print_table(platform: &Platform) {
    println!(
        "{} ({} resonator, {} shots, relaxation {} ns)\n",
        style(platform.name()).cyan().bold(),
        platform.resonator_type(),
        platform.settings().nshots,
        platform.settings().relaxation_time
    );

    println!(
        "  {:<8} {:<9} {:<14} {:<16} {:<6} {:<6} {}",
        style("Qubit").bold(),
        style("Role").bold(),
        style("Channel").bold(),
        style("Instrument").bold(),
        style("Port").bold(),
        style("Dir").bold(),
        style("LO").bold()
    );

    for (qubit, role, resolved) in platform.wiring() {
        let lo = match resolved.local_oscillator.and_then(|lo| {
            lo.oscillator()
                .map(|settings| (lo.name(), settings.frequency, settings.power))
        }) {
            Some((name, frequency, power)) => {
                format!("{name} @ {:.4} GHz, {power} dBm", frequency / 1e9)
            }
            None => resolved
                .channel
                .local_oscillator()
                .unwrap_or("-")
                .to_string(),
        };

        println!(
            "  {:<8} {:<9} {:<14} {:<16} {:<6} {:<6} {}",
            qubit.to_string(),
            role.to_string(),
            resolved.channel.name(),
            resolved.instrument.name(),
            resolved.port.name,
            resolved.port.direction.to_string(),
            style(lo).dim()
        );
    }

    if !platform.pairs().is_empty() {
        let pairs: Vec<_> = platform.pairs().iter().map(ToString::to_string).collect();
        println!("\n  Pairs: {}", pairs.join(", "));
    }

    let notes = platform.review_notes();
    if !notes.is_empty() {
        println!();
        for note in notes {
            println!("  {} {}", style("!").yellow(), note);
        }
    }
}
