//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use labwire_hal::DriverRegistry;
use labwire_platform::{Platform, PlatformDescriptor};

/// Load a descriptor set from a YAML or JSON file.
pub fn load_descriptor(path: &str) -> Result<PlatformDescriptor> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse JSON descriptor: {path}")),
        _ => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Failed to parse YAML descriptor: {path}")),
    }
}

/// Load, complete from the model registry, and assemble a platform.
pub fn load_platform(path: &str, use_models: bool) -> Result<Platform> {
    let mut descriptor = load_descriptor(path)?;
    info!(
        "Loaded '{}': {} instruments, {} channels, {} role assignments",
        descriptor.name,
        descriptor.instruments.len(),
        descriptor.channels.len(),
        descriptor.roles.len()
    );

    if use_models {
        let registry = DriverRegistry::with_builtins();
        descriptor = registry
            .prepare(descriptor)
            .with_context(|| format!("Failed to resolve instrument models in {path}"))?;
    }

    descriptor
        .assemble()
        .with_context(|| format!("Failed to assemble {path}"))
}
