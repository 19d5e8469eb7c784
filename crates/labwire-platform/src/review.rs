//! Non-fatal findings raised during assembly.
//!
//! A review note marks wiring that is legal but often an authoring slip,
//! such as two qubits flux-biased through one line.

use std::fmt;

use serde::Serialize;

use crate::channel::PortRef;
use crate::instrument::PortDirection;
use crate::qubit::{QubitId, QubitPair, Role};

/// A finding attached to an assembled platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "note", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ReviewNote {
    /// The same assignment appears more than once.
    RepeatedAssignment {
        /// Qubit.
        qubit: QubitId,
        /// Role.
        role: Role,
        /// Channel.
        channel: String,
    },
    /// A non-multiplexed role shares one channel across qubits.
    SharedChannel {
        /// Shared channel.
        channel: String,
        /// Role it serves.
        role: Role,
        /// Qubits using it, ordered.
        qubits: Vec<QubitId>,
    },
    /// A role is bound to a port of the wrong direction.
    DirectionMismatch {
        /// Channel carrying the role.
        channel: String,
        /// Role.
        role: Role,
        /// Port the channel is bound to.
        port: PortRef,
        /// Direction of that port.
        direction: PortDirection,
    },
    /// A declared channel that no qubit uses.
    UnassignedChannel {
        /// Channel name.
        channel: String,
    },
    /// A pair listed more than once.
    RepeatedPair {
        /// The pair.
        pair: QubitPair,
    },
}

impl fmt::Display for ReviewNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewNote::RepeatedAssignment {
                qubit,
                role,
                channel,
            } => write!(f, "qubit {qubit} {role} assigned to '{channel}' more than once"),
            ReviewNote::SharedChannel {
                channel,
                role,
                qubits,
            } => {
                let qubits: Vec<String> = qubits.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "channel '{channel}' is the {role} line of qubits {}",
                    qubits.join(", ")
                )
            }
            ReviewNote::DirectionMismatch {
                channel,
                role,
                port,
                direction,
            } => write!(
                f,
                "{role} channel '{channel}' is bound to {direction} port {port}"
            ),
            ReviewNote::UnassignedChannel { channel } => {
                write!(f, "channel '{channel}' is not assigned to any qubit")
            }
            ReviewNote::RepeatedPair { pair } => write!(f, "pair {pair} is listed more than once"),
        }
    }
}

/// Direction a role's port is expected to have.
pub(crate) fn expected_direction(role: Role) -> PortDirection {
    match role {
        Role::Feedback => PortDirection::Input,
        Role::Readout | Role::Drive | Role::Flux => PortDirection::Output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_shared_channel() {
        let note = ReviewNote::SharedChannel {
            channel: "L1-06".into(),
            role: Role::Flux,
            qubits: vec!["Q1".into(), "Q2".into()],
        };
        assert_eq!(note.to_string(), "channel 'L1-06' is the flux line of qubits Q1, Q2");
    }

    #[test]
    fn test_serialize_tagged() {
        let note = ReviewNote::UnassignedChannel {
            channel: "L1-05".into(),
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"note": "unassigned_channel", "channel": "L1-05"})
        );
    }

    #[test]
    fn test_expected_direction() {
        assert_eq!(expected_direction(Role::Feedback), PortDirection::Input);
        assert_eq!(expected_direction(Role::Drive), PortDirection::Output);
    }
}
