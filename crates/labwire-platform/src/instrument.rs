//! Instruments, their network addresses and ports.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Network address of an instrument: a host with an optional port.
///
/// Written as `host` or `host:port`. Qblox cluster modules use the port
/// position for their slot (`192.168.0.2:10`). IPv6 hosts are bracketed:
/// `[fe80::1]` or `[fe80::1]:6000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    /// Host name or IP address.
    pub host: String,
    /// Optional port (or slot) number.
    pub port: Option<u16>,
}

impl Address {
    /// Create an address without a port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
        }
    }

    /// Create an address with a port.
    pub fn with_port(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port: Some(port),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]", self.host)?;
        } else {
            f.write_str(&self.host)?;
        }
        match self.port {
            Some(port) => write!(f, ":{port}"),
            None => Ok(()),
        }
    }
}

impl FromStr for Address {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        let s = s.trim();
        let invalid = || ModelError::InvalidAddress(s.to_string());

        let (host, port) = match s.strip_prefix('[') {
            Some(rest) => {
                let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
                match tail {
                    "" => (host, None),
                    _ => (host, Some(tail.strip_prefix(':').ok_or_else(invalid)?)),
                }
            }
            None => match s.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (s, None),
            },
        };

        if host.is_empty() || (s.starts_with('[') != host.contains(':')) {
            return Err(invalid());
        }
        match port {
            Some(port) => Ok(Self::with_port(host, port.parse().map_err(|_| invalid())?)),
            None => Ok(Self::new(host)),
        }
    }
}

impl TryFrom<String> for Address {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

/// Signal direction of a port, seen from the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    /// Acquires a signal (ADC, readout input).
    Input,
    /// Emits a signal (DAC, drive or flux output).
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// A named port on an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within its instrument (`o1`, `i1`, ...).
    pub name: String,
    /// Signal direction.
    pub direction: PortDirection,
    /// Physical line number on the instrument.
    pub line: u32,
}

impl Port {
    /// Create a new port.
    pub fn new(name: impl Into<String>, direction: PortDirection, line: u32) -> Self {
        Self {
            name: name.into(),
            direction,
            line,
        }
    }

    /// Create an output port.
    pub fn output(name: impl Into<String>, line: u32) -> Self {
        Self::new(name, PortDirection::Output, line)
    }

    /// Create an input port.
    pub fn input(name: impl Into<String>, line: u32) -> Self {
        Self::new(name, PortDirection::Input, line)
    }
}

/// What role an instrument plays in the rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Top-level controller (cluster, RFSoC board, OPX).
    Controller,
    /// Module hosted by a controller.
    Module,
    /// Local oscillator or pump source.
    LocalOscillator,
    /// Anything else.
    #[default]
    Other,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKind::Controller => "controller",
            InstrumentKind::Module => "module",
            InstrumentKind::LocalOscillator => "local oscillator",
            InstrumentKind::Other => "generic instrument",
        };
        f.write_str(name)
    }
}

/// Output settings of a local oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorSettings {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Power in dBm.
    pub power: f64,
}

/// A named, addressable instrument exposing ports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instrument {
    name: String,
    kind: InstrumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    address: Address,
    ports: BTreeMap<String, Port>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    oscillator: Option<OscillatorSettings>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    parameters: serde_json::Map<String, serde_json::Value>,
}

impl Instrument {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        kind: InstrumentKind,
        model: Option<String>,
        address: Address,
        ports: BTreeMap<String, Port>,
        parent: Option<String>,
        oscillator: Option<OscillatorSettings>,
        parameters: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            name,
            kind,
            model,
            address,
            ports,
            parent,
            oscillator,
            parameters,
        }
    }

    /// Instrument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instrument kind.
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Registry model name, if one was given.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Network address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Look up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    /// Check whether the instrument exposes a port.
    pub fn has_port(&self, name: &str) -> bool {
        self.ports.contains_key(name)
    }

    /// All ports, ordered by name.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    /// Parent instrument (the controller hosting a module).
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Oscillator settings, for local oscillators.
    pub fn oscillator(&self) -> Option<&OscillatorSettings> {
        self.oscillator.as_ref()
    }

    /// Driver-specific parameters passed through unchanged.
    pub fn parameters(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.parameters
    }
}
