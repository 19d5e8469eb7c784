//! Declarative descriptor sets consumed by the assembler.
//!
//! Descriptors are plain data: they deserialize from YAML or JSON and
//! carry names rather than references. Nothing here is validated until
//! [`PlatformDescriptor::assemble`] runs.

use serde::{Deserialize, Serialize};

use crate::assembler;
use crate::channel::PortRef;
use crate::error::AssemblyResult;
use crate::instrument::{Address, InstrumentKind, OscillatorSettings, PortDirection};
use crate::platform::Platform;
use crate::qubit::{QubitId, Role};
use crate::settings::{ResonatorType, Settings};

/// A port as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    /// Port name.
    pub name: String,
    /// Signal direction.
    pub direction: PortDirection,
    /// Physical line; defaults to the port's position in the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl PortDescriptor {
    /// Output port with an implicit line.
    pub fn output(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Output,
            line: None,
        }
    }

    /// Input port with an implicit line.
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Input,
            line: None,
        }
    }

    /// Set the physical line.
    pub fn on_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// An instrument as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentDescriptor {
    /// Unique instrument name.
    pub name: String,
    /// Instrument kind. When unset it comes from the model, or is a local
    /// oscillator if oscillator settings are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InstrumentKind>,
    /// Registry model providing the port layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Network address.
    pub address: Address,
    /// Declared ports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortDescriptor>,
    /// Hosting instrument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Local oscillator output settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscillator: Option<OscillatorSettings>,
    /// Driver parameters passed through unchanged.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl InstrumentDescriptor {
    /// Create a descriptor with no ports.
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            kind: None,
            model: None,
            address,
            ports: Vec::new(),
            parent: None,
            oscillator: None,
            parameters: serde_json::Map::new(),
        }
    }

    /// Set the kind.
    pub fn with_kind(mut self, kind: InstrumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the registry model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add a port.
    pub fn with_port(mut self, port: PortDescriptor) -> Self {
        self.ports.push(port);
        self
    }

    /// Set the parent instrument.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set oscillator output.
    pub fn with_oscillator(mut self, frequency: f64, power: f64) -> Self {
        self.oscillator = Some(OscillatorSettings { frequency, power });
        self
    }

    /// Kind the instrument is assembled with.
    pub fn effective_kind(&self) -> InstrumentKind {
        match (self.kind, &self.oscillator) {
            (Some(kind), _) => kind,
            (None, Some(_)) => InstrumentKind::LocalOscillator,
            (None, None) => InstrumentKind::Other,
        }
    }

    /// Add a driver parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// A channel as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Channel name.
    pub name: String,
    /// Instrument port carrying the channel.
    pub port: PortRef,
    /// Local oscillator instrument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_oscillator: Option<String>,
}

impl ChannelDescriptor {
    /// Create a channel bound to `port`.
    pub fn new(name: impl Into<String>, port: PortRef) -> Self {
        Self {
            name: name.into(),
            port,
            local_oscillator: None,
        }
    }

    /// Attach a local oscillator.
    pub fn with_local_oscillator(mut self, instrument: impl Into<String>) -> Self {
        self.local_oscillator = Some(instrument.into());
        self
    }
}

/// One qubit-role assignment.
///
/// The role stays a string until assembly so that misspelled roles surface
/// as assembly errors rather than parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDescriptor {
    /// Qubit receiving the channel.
    pub qubit: QubitId,
    /// Role name.
    pub role: String,
    /// Channel name.
    pub channel: String,
}

impl RoleDescriptor {
    /// Create an assignment.
    pub fn new(qubit: impl Into<QubitId>, role: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            qubit: qubit.into(),
            role: role.into(),
            channel: channel.into(),
        }
    }
}

/// The complete input of one assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    /// Platform name.
    pub name: String,
    /// Resonator geometry.
    #[serde(default)]
    pub resonator_type: ResonatorType,
    /// Instruments.
    #[serde(default)]
    pub instruments: Vec<InstrumentDescriptor>,
    /// Channels.
    #[serde(default)]
    pub channels: Vec<ChannelDescriptor>,
    /// Qubits that exist even without channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qubits: Vec<QubitId>,
    /// Qubit-role assignments.
    #[serde(default)]
    pub roles: Vec<RoleDescriptor>,
    /// Coupled qubit pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairs: Vec<(QubitId, QubitId)>,
    /// Execution settings.
    #[serde(default)]
    pub settings: Settings,
}

impl PlatformDescriptor {
    /// Create an empty descriptor set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resonator_type: ResonatorType::default(),
            instruments: Vec::new(),
            channels: Vec::new(),
            qubits: Vec::new(),
            roles: Vec::new(),
            pairs: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Add an instrument.
    pub fn instrument(mut self, instrument: InstrumentDescriptor) -> Self {
        self.instruments.push(instrument);
        self
    }

    /// Add a channel.
    pub fn channel(mut self, channel: ChannelDescriptor) -> Self {
        self.channels.push(channel);
        self
    }

    /// Declare a qubit.
    pub fn qubit(mut self, qubit: impl Into<QubitId>) -> Self {
        self.qubits.push(qubit.into());
        self
    }

    /// Assign a channel to a qubit role.
    pub fn assign(mut self, qubit: impl Into<QubitId>, role: Role, channel: impl Into<String>) -> Self {
        self.roles.push(RoleDescriptor::new(qubit, role.as_str(), channel));
        self
    }

    /// Add a role assignment as written, without checking the role name.
    pub fn role(mut self, role: RoleDescriptor) -> Self {
        self.roles.push(role);
        self
    }

    /// Couple two qubits.
    pub fn pair(mut self, first: impl Into<QubitId>, second: impl Into<QubitId>) -> Self {
        self.pairs.push((first.into(), second.into()));
        self
    }

    /// Validate the descriptor set and build the platform.
    pub fn assemble(&self) -> AssemblyResult<Platform> {
        assembler::assemble(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: demo
resonator_type: 3D
instruments:
  - name: qrm_rf0
    kind: module
    address: "192.168.0.2:1"
    ports:
      - { name: o1, direction: output }
      - { name: i1, direction: input }
  - name: lo
    address: 192.168.0.35
    oscillator: { frequency: 7.5e9, power: 10 }
channels:
  - { name: W5-R, port: qrm_rf0.o1, local_oscillator: lo }
roles:
  - { qubit: 0, role: readout, channel: W5-R }
settings:
  nshots: 2048
"#;

    #[test]
    fn test_deserialize_yaml() {
        let descriptor: PlatformDescriptor = serde_yaml_ng::from_str(YAML).unwrap();
        assert_eq!(descriptor.name, "demo");
        assert_eq!(descriptor.resonator_type, ResonatorType::ThreeD);
        assert_eq!(descriptor.instruments.len(), 2);
        assert_eq!(descriptor.instruments[0].kind, Some(InstrumentKind::Module));
        assert_eq!(descriptor.instruments[0].address.port, Some(1));
        assert_eq!(descriptor.instruments[1].kind, None);
        assert_eq!(descriptor.channels[0].port, PortRef::new("qrm_rf0", "o1"));
        assert_eq!(descriptor.roles[0].qubit, QubitId::Index(0));
        assert_eq!(descriptor.settings.nshots, 2048);
    }

    #[test]
    fn test_yaml_oscillator_assembles_as_local_oscillator() {
        let descriptor: PlatformDescriptor = serde_yaml_ng::from_str(YAML).unwrap();
        assert_eq!(
            descriptor.instruments[1].effective_kind(),
            InstrumentKind::LocalOscillator
        );

        let platform = descriptor.assemble().unwrap();
        let readout = platform.resolve(&QubitId::Index(0), Role::Readout).unwrap();
        assert_eq!(readout.local_oscillator.map(|lo| lo.name()), Some("lo"));
        assert_eq!(
            platform.instrument("lo").map(|lo| lo.kind()),
            Some(InstrumentKind::LocalOscillator)
        );
    }

    #[test]
    fn test_explicit_kind_wins_over_oscillator() {
        let source = InstrumentDescriptor::new("awg", Address::new("192.168.0.40"))
            .with_kind(InstrumentKind::Other)
            .with_oscillator(5.0e9, 0.0);
        assert_eq!(source.kind, Some(InstrumentKind::Other));
        assert_eq!(source.effective_kind(), InstrumentKind::Other);
    }

    #[test]
    fn test_builder_matches_fields() {
        let descriptor = PlatformDescriptor::new("b")
            .instrument(
                InstrumentDescriptor::new("A", Address::new("10.0.0.1"))
                    .with_port(PortDescriptor::output("o1")),
            )
            .channel(ChannelDescriptor::new("ro", PortRef::new("A", "o1")))
            .assign(0, Role::Readout, "ro")
            .pair(0, 1);
        assert_eq!(descriptor.roles[0].role, "readout");
        assert_eq!(descriptor.pairs, vec![(QubitId::Index(0), QubitId::Index(1))]);
    }

    #[test]
    fn test_with_oscillator_implies_kind() {
        let lo = InstrumentDescriptor::new("twpa", Address::new("192.168.0.37"))
            .with_oscillator(6.5359e9, 4.0);
        assert_eq!(lo.kind, None);
        assert_eq!(lo.effective_kind(), InstrumentKind::LocalOscillator);
        assert_eq!(lo.oscillator.map(|o| o.power), Some(4.0));
    }
}
