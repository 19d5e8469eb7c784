//! Qubit identifiers, roles and channel assignments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ModelError, ModelResult};

/// Identifier of a qubit: a chip index or a label such as `"Q1"`.
///
/// Indices order before labels. A numeric string such as `"3"` is read as
/// an index, whether it comes from YAML, JSON or [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum QubitId {
    /// Numeric index.
    Index(u32),
    /// Free-form, non-numeric label.
    Label(String),
}

impl<'de> Deserialize<'de> for QubitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(u32),
            Label(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Index(index) => QubitId::Index(index),
            Raw::Label(label) => QubitId::from(label),
        })
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitId::Index(index) => write!(f, "{index}"),
            QubitId::Label(label) => f.write_str(label),
        }
    }
}

impl From<u32> for QubitId {
    fn from(index: u32) -> Self {
        QubitId::Index(index)
    }
}

impl From<&str> for QubitId {
    fn from(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| QubitId::Label(label.to_string()))
    }
}

impl From<String> for QubitId {
    fn from(label: String) -> Self {
        QubitId::from(label.as_str())
    }
}

impl FromStr for QubitId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u32>() {
            Ok(index) => QubitId::Index(index),
            Err(_) => QubitId::Label(s.to_string()),
        })
    }
}

/// Functional purpose a channel serves for a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Readout probe tone.
    Readout,
    /// Acquisition of the readout signal.
    Feedback,
    /// Single-qubit drive.
    Drive,
    /// Flux bias line.
    Flux,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 4] = [Role::Readout, Role::Feedback, Role::Drive, Role::Flux];

    /// Lower-case role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Readout => "readout",
            Role::Feedback => "feedback",
            Role::Drive => "drive",
            Role::Flux => "flux",
        }
    }

    /// Whether several qubits routinely share a channel in this role.
    ///
    /// Readout lines are frequency-multiplexed; the other roles are not.
    pub fn is_multiplexed(&self) -> bool {
        matches!(self, Role::Readout)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "readout" => Ok(Role::Readout),
            "feedback" => Ok(Role::Feedback),
            "drive" => Ok(Role::Drive),
            "flux" => Ok(Role::Flux),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

/// A qubit and the channels assigned to its roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Qubit {
    id: QubitId,
    #[serde(skip_serializing_if = "Option::is_none")]
    readout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flux: Option<String>,
}

impl Qubit {
    pub(crate) fn new(id: QubitId) -> Self {
        Self {
            id,
            readout: None,
            feedback: None,
            drive: None,
            flux: None,
        }
    }

    /// Qubit identifier.
    pub fn id(&self) -> &QubitId {
        &self.id
    }

    /// Name of the channel serving `role`, if any.
    pub fn channel(&self, role: Role) -> Option<&str> {
        self.slot(role).as_deref()
    }

    /// Readout channel name.
    pub fn readout(&self) -> Option<&str> {
        self.channel(Role::Readout)
    }

    /// Feedback channel name.
    pub fn feedback(&self) -> Option<&str> {
        self.channel(Role::Feedback)
    }

    /// Drive channel name.
    pub fn drive(&self) -> Option<&str> {
        self.channel(Role::Drive)
    }

    /// Flux channel name.
    pub fn flux(&self) -> Option<&str> {
        self.channel(Role::Flux)
    }

    /// Assigned roles with their channel names, in [`Role::ALL`] order.
    pub fn assignments(&self) -> impl Iterator<Item = (Role, &str)> {
        Role::ALL
            .into_iter()
            .filter_map(|role| self.channel(role).map(|channel| (role, channel)))
    }

    /// Assign `channel` to `role`, returning the channel it replaced.
    pub(crate) fn assign(&mut self, role: Role, channel: String) -> Option<String> {
        self.slot_mut(role).replace(channel)
    }

    fn slot(&self, role: Role) -> &Option<String> {
        match role {
            Role::Readout => &self.readout,
            Role::Feedback => &self.feedback,
            Role::Drive => &self.drive,
            Role::Flux => &self.flux,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Readout => &mut self.readout,
            Role::Feedback => &mut self.feedback,
            Role::Drive => &mut self.drive,
            Role::Flux => &mut self.flux,
        }
    }
}

/// An ordered pair of coupled qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitPair(pub QubitId, pub QubitId);

impl fmt::Display for QubitPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
