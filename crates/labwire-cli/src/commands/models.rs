//! Models command implementation.

use console::style;

use labwire_hal::{DriverCapabilities, DriverRegistry};
use labwire_platform::PortDirection;

/// Execute the models command.
pub fn execute() {
    let registry = DriverRegistry::with_builtins();
    let builtins = DriverCapabilities::builtins();

    println!("{} Known instrument models:\n", style("labwire").cyan().bold());

    for model in registry.available_models() {
        let Some(caps) = builtins.iter().find(|caps| caps.model == model) else {
            println!("  {} {}", style("○").dim(), style(&model).bold());
            continue;
        };

        println!(
            "  {} {} ({}, {})",
            style("●").green(),
            style(&caps.model).bold(),
            caps.vendor,
            caps.kind
        );

        let names = move |direction: PortDirection| {
            caps.ports
                .iter()
                .filter(|port| port.direction == direction)
                .map(|port| port.name.as_str())
                .collect::<Vec<_>>()
        };
        let outputs = names(PortDirection::Output);
        let inputs = names(PortDirection::Input);
        if !outputs.is_empty() {
            println!("    Outputs: {}", outputs.join(", "));
        }
        if !inputs.is_empty() {
            println!("    Inputs: {}", inputs.join(", "));
        }
        if let (Some(frequency), Some(power)) = (&caps.frequency_range, &caps.power_range) {
            println!(
                "    Frequency: {} - {} GHz",
                frequency.start() / 1e9,
                frequency.end() / 1e9
            );
            println!("    Power: {} - {} dBm", power.start(), power.end());
        }
        println!();
    }
}
