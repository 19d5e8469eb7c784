//! Instrument capability introspection.
//!
//! [`DriverCapabilities`] describes what an instrument model exposes:
//! its kind, its ports (name, direction, physical line) and, for local
//! oscillators, the frequency and power it can be set to. The registry
//! uses these to complete and check instrument descriptors before
//! assembly.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use labwire_platform::{InstrumentKind, PortDescriptor, PortDirection};

/// A port provided by an instrument model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Port name.
    pub name: String,
    /// Signal direction.
    pub direction: PortDirection,
    /// Physical line number.
    pub line: u32,
}

impl PortSpec {
    /// Output port.
    pub fn output(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Output,
            line,
        }
    }

    /// Input port.
    pub fn input(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Input,
            line,
        }
    }
}

/// Capabilities of an instrument model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverCapabilities {
    /// Model name, the registry key.
    pub model: String,
    /// Manufacturer.
    pub vendor: String,
    /// What the instrument is.
    pub kind: InstrumentKind,
    /// Ports, in line order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortSpec>,
    /// Settable output frequency in Hz, for oscillators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_range: Option<RangeInclusive<f64>>,
    /// Settable output power in dBm, for oscillators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_range: Option<RangeInclusive<f64>>,
}

impl DriverCapabilities {
    /// Capabilities with no ports and no oscillator output.
    pub fn new(model: impl Into<String>, vendor: impl Into<String>, kind: InstrumentKind) -> Self {
        Self {
            model: model.into(),
            vendor: vendor.into(),
            kind,
            ports: Vec::new(),
            frequency_range: None,
            power_range: None,
        }
    }

    /// Qblox cluster chassis. Hosts modules; exposes no ports itself.
    pub fn qblox_cluster() -> Self {
        Self::new("qblox_cluster", "Qblox", InstrumentKind::Controller)
    }

    /// Qblox QRM-RF readout module: one output, one input.
    pub fn qblox_qrm_rf() -> Self {
        Self::new("qblox_qrm_rf", "Qblox", InstrumentKind::Module)
            .with_ports([PortSpec::output("o1", 0), PortSpec::input("i1", 0)])
    }

    /// Qblox QCM-RF control module: two outputs.
    pub fn qblox_qcm_rf() -> Self {
        Self::new("qblox_qcm_rf", "Qblox", InstrumentKind::Module)
            .with_ports([PortSpec::output("o1", 0), PortSpec::output("o2", 1)])
    }

    /// Qblox QCM baseband module: four outputs, typically flux.
    pub fn qblox_qcm_bb() -> Self {
        Self::new("qblox_qcm_bb", "Qblox", InstrumentKind::Module)
            .with_ports((0..4).map(|line| PortSpec::output(format!("o{}", line + 1), line)))
    }

    /// Xilinx ZCU216 board running qibosoq: 16 DACs (`o0`..`o15`), 16 ADCs (`i0`..`i15`).
    pub fn rfsoc_zcu216() -> Self {
        Self::rfsoc("rfsoc_zcu216", 16, 16)
    }

    /// RFSoC 4x2 board: 2 DACs, 2 ADCs.
    pub fn rfsoc_4x2() -> Self {
        Self::rfsoc("rfsoc_4x2", 2, 2)
    }

    fn rfsoc(model: &str, dacs: u32, adcs: u32) -> Self {
        let outputs = (0..dacs).map(|line| PortSpec::output(format!("o{line}"), line));
        let inputs = (0..adcs).map(|line| PortSpec::input(format!("i{line}"), line));
        Self::new(model, "Xilinx", InstrumentKind::Controller).with_ports(outputs.chain(inputs))
    }

    /// Rohde & Schwarz SGS100A signal generator.
    pub fn rs_sgs100a() -> Self {
        Self::new("rs_sgs100a", "Rohde & Schwarz", InstrumentKind::LocalOscillator)
            .with_oscillator_range(1.0e6..=12.75e9, -120.0..=25.0)
    }

    /// ERASynth+ signal generator.
    pub fn erasynth() -> Self {
        Self::new("erasynth", "ERA Instruments", InstrumentKind::LocalOscillator)
            .with_oscillator_range(250.0e3..=15.0e9, -60.0..=20.0)
    }

    /// Every built-in model.
    pub fn builtins() -> Vec<Self> {
        vec![
            Self::qblox_cluster(),
            Self::qblox_qrm_rf(),
            Self::qblox_qcm_rf(),
            Self::qblox_qcm_bb(),
            Self::rfsoc_zcu216(),
            Self::rfsoc_4x2(),
            Self::rs_sgs100a(),
            Self::erasynth(),
        ]
    }

    /// Append ports.
    pub fn with_ports(mut self, ports: impl IntoIterator<Item = PortSpec>) -> Self {
        self.ports.extend(ports);
        self
    }

    /// Set oscillator frequency (Hz) and power (dBm) ranges.
    pub fn with_oscillator_range(
        mut self,
        frequency: RangeInclusive<f64>,
        power: RangeInclusive<f64>,
    ) -> Self {
        self.frequency_range = Some(frequency);
        self.power_range = Some(power);
        self
    }

    /// Look up a port by name.
    pub fn port(&self, name: &str) -> Option<&PortSpec> {
        self.ports.iter().find(|port| port.name == name)
    }

    /// Ports as descriptor entries, lines included.
    pub fn port_descriptors(&self) -> Vec<PortDescriptor> {
        self.ports
            .iter()
            .map(|port| PortDescriptor {
                name: port.name.clone(),
                direction: port.direction,
                line: Some(port.line),
            })
            .collect()
    }
}
