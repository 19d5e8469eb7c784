//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum lab platform assembly",
        style("labwire").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  labwire-platform  Platform model and assembler");
    println!("  labwire-hal       Instrument models and driver registry");
    println!("  labwire-cli       Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
