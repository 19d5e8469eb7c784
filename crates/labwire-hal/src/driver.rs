//! Driver trait and the catalog driver backing built-in models.
//!
//! A driver stands in for the live instrument handle. Only what the
//! assembler needs is exposed here: the model name and its capabilities,
//! which MUST be available without talking to the hardware.

use labwire_platform::{InstrumentDescriptor, OscillatorSettings};

use crate::capability::DriverCapabilities;
use crate::error::{HalError, HalResult};

/// Trait for instrument drivers.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible. Implementations
///   cache capabilities at construction time.
/// - `check_oscillator()` has a default implementation that checks the
///   capability ranges.
pub trait InstrumentDriver: Send + Sync {
    /// Model name this driver serves.
    fn model(&self) -> &str;

    /// Capabilities of the model.
    fn capabilities(&self) -> &DriverCapabilities;

    /// Check that oscillator settings are within the model's limits.
    fn check_oscillator(&self, instrument: &str, settings: &OscillatorSettings) -> HalResult<()> {
        let caps = self.capabilities();
        let (Some(frequency), Some(power)) = (&caps.frequency_range, &caps.power_range) else {
            return Err(HalError::Unsupported(format!(
                "model '{}' of instrument '{}' has no oscillator output",
                caps.model, instrument
            )));
        };

        if !frequency.contains(&settings.frequency) {
            return Err(HalError::OutOfRange {
                instrument: instrument.to_string(),
                parameter: "frequency",
                value: settings.frequency,
                min: *frequency.start(),
                max: *frequency.end(),
            });
        }
        if !power.contains(&settings.power) {
            return Err(HalError::OutOfRange {
                instrument: instrument.to_string(),
                parameter: "power",
                value: settings.power,
                min: *power.start(),
                max: *power.end(),
            });
        }
        Ok(())
    }
}

/// Trait for creating drivers from an instrument descriptor.
pub trait DriverFactory: InstrumentDriver + Sized {
    /// Create a driver for the described instrument.
    fn from_descriptor(descriptor: &InstrumentDescriptor) -> HalResult<Self>;
}

/// Driver whose behaviour is fully described by static capabilities.
#[derive(Debug, Clone)]
pub struct CatalogDriver {
    capabilities: DriverCapabilities,
}

impl CatalogDriver {
    /// Wrap capabilities in a driver.
    pub fn new(capabilities: DriverCapabilities) -> Self {
        Self { capabilities }
    }
}

impl InstrumentDriver for CatalogDriver {
    fn model(&self) -> &str {
        &self.capabilities.model
    }

    fn capabilities(&self) -> &DriverCapabilities {
        &self.capabilities
    }
}
