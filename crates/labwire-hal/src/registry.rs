//! Driver registry for instrument models.
//!
//! The [`DriverRegistry`] maps model names to driver factories. It also
//! prepares descriptor sets for assembly: instruments that name a model get
//! their port list and kind filled in from the model, and their oscillator
//! settings checked against its limits.

use rustc_hash::FxHashMap;
use tracing::debug;

use labwire_platform::{InstrumentDescriptor, PlatformDescriptor};

use crate::capability::DriverCapabilities;
use crate::driver::{CatalogDriver, DriverFactory, InstrumentDriver};
use crate::error::{HalError, HalResult};

/// Factory function type for drivers.
type Factory =
    Box<dyn Fn(&InstrumentDescriptor) -> HalResult<Box<dyn InstrumentDriver>> + Send + Sync>;

/// Central registry of instrument models.
pub struct DriverRegistry {
    factories: FxHashMap<String, Factory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Create a registry holding every built-in model.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for capabilities in DriverCapabilities::builtins() {
            registry.register_capabilities(capabilities);
        }
        registry
    }

    /// Register a driver type.
    pub fn register<D>(&mut self, model: impl Into<String>)
    where
        D: DriverFactory + 'static,
    {
        let model = model.into();
        debug!("Registering driver: {}", model);
        self.factories.insert(
            model,
            Box::new(|descriptor| {
                let driver = D::from_descriptor(descriptor)?;
                Ok(Box::new(driver))
            }),
        );
    }

    /// Register a driver factory with a custom constructor.
    pub fn register_factory(
        &mut self,
        model: impl Into<String>,
        factory: impl Fn(&InstrumentDescriptor) -> HalResult<Box<dyn InstrumentDriver>>
        + Send
        + Sync
        + 'static,
    ) {
        let model = model.into();
        debug!("Registering factory driver: {}", model);
        self.factories.insert(model, Box::new(factory));
    }

    /// Register a model described entirely by its capabilities.
    pub fn register_capabilities(&mut self, capabilities: DriverCapabilities) {
        let model = capabilities.model.clone();
        self.register_factory(model, move |_descriptor| {
            Ok(Box::new(CatalogDriver::new(capabilities.clone())))
        });
    }

    /// Create a driver for `descriptor` using `model`.
    pub fn create(
        &self,
        model: &str,
        descriptor: &InstrumentDescriptor,
    ) -> HalResult<Box<dyn InstrumentDriver>> {
        match self.factories.get(model) {
            Some(factory) => factory(descriptor),
            None => Err(HalError::UnknownModel(model.to_string())),
        }
    }

    /// List all model names, sorted.
    pub fn available_models(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a model is registered.
    pub fn has_model(&self, model: &str) -> bool {
        self.factories.contains_key(model)
    }

    /// Complete one instrument descriptor from its model.
    ///
    /// Instruments without a model are left untouched.
    pub fn prepare_instrument(&self, descriptor: &mut InstrumentDescriptor) -> HalResult<()> {
        let Some(model) = descriptor.model.clone() else {
            return Ok(());
        };
        let driver = self.create(&model, descriptor)?;
        let caps = driver.capabilities();

        if descriptor.ports.is_empty() {
            descriptor.ports = caps.port_descriptors();
        } else {
            for port in &mut descriptor.ports {
                let Some(spec) = caps
                    .port(&port.name)
                    .filter(|spec| spec.direction == port.direction)
                else {
                    return Err(HalError::PortMismatch {
                        instrument: descriptor.name.clone(),
                        model,
                        port: port.name.clone(),
                    });
                };
                port.line.get_or_insert(spec.line);
            }
        }

        descriptor.kind.get_or_insert(caps.kind);

        if let Some(settings) = &descriptor.oscillator {
            driver.check_oscillator(&descriptor.name, settings)?;
        }

        debug!(
            "Prepared instrument '{}' as {} ({} ports)",
            descriptor.name,
            model,
            descriptor.ports.len()
        );
        Ok(())
    }

    /// Complete every instrument of a descriptor set.
    pub fn prepare(&self, mut descriptor: PlatformDescriptor) -> HalResult<PlatformDescriptor> {
        for instrument in &mut descriptor.instruments {
            self.prepare_instrument(instrument)?;
        }
        Ok(descriptor)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
