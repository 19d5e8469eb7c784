//! Channels and instrument port references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Reference to a port on a named instrument, written `instrument.port`.
///
/// The split happens at the last `.`, so instrument names may contain dots
/// while port names may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortRef {
    /// Instrument name.
    pub instrument: String,
    /// Port name on that instrument.
    pub port: String,
}

impl PortRef {
    /// Create a new port reference.
    pub fn new(instrument: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.instrument, self.port)
    }
}

impl FromStr for PortRef {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().rsplit_once('.') {
            Some((instrument, port)) if !instrument.is_empty() && !port.is_empty() => {
                Ok(Self::new(instrument, port))
            }
            _ => Err(ModelError::InvalidPortRef(s.to_string())),
        }
    }
}

impl TryFrom<String> for PortRef {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        value.parse()
    }
}

impl From<PortRef> for String {
    fn from(port: PortRef) -> Self {
        port.to_string()
    }
}

/// A named signal path bound to one instrument port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Channel {
    name: String,
    port: PortRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_oscillator: Option<String>,
}

impl Channel {
    pub(crate) fn new(name: String, port: PortRef, local_oscillator: Option<String>) -> Self {
        Self {
            name,
            port,
            local_oscillator,
        }
    }

    /// Channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The instrument port carrying this channel.
    pub fn port(&self) -> &PortRef {
        &self.port
    }

    /// Name of the local oscillator instrument, if the channel has one.
    pub fn local_oscillator(&self) -> Option<&str> {
        self.local_oscillator.as_deref()
    }
}
