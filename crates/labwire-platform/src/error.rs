//! Error types for the platform crate.

use thiserror::Error;

use crate::channel::PortRef;
use crate::qubit::QubitId;

/// Errors raised while parsing model values (addresses, port references, roles).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Address is not `host` or `host:port`.
    #[error("Invalid address '{0}': expected 'host' or 'host:port'")]
    InvalidAddress(String),

    /// Port reference is not `instrument.port`.
    #[error("Invalid port reference '{0}': expected 'instrument.port'")]
    InvalidPortRef(String),

    /// Role name is not one of readout, feedback, drive, flux.
    #[error("Unknown role '{0}': expected one of readout, feedback, drive, flux")]
    UnknownRole(String),
}

/// Result type for model parsing.
pub type ModelResult<T> = Result<T, ModelError>;

/// Configuration-integrity errors detected while assembling a platform.
///
/// Variants are listed in the order the assembler checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AssemblyError {
    /// Two instruments share a name.
    #[error("Duplicate instrument '{name}'")]
    DuplicateInstrument {
        /// The repeated instrument name.
        name: String,
    },

    /// An instrument lists the same port twice.
    #[error("Instrument '{instrument}' declares port '{port}' more than once")]
    DuplicatePort {
        /// Instrument declaring the port.
        instrument: String,
        /// The repeated port name.
        port: String,
    },

    /// An instrument names a parent that is not declared.
    #[error("Instrument '{instrument}' names unknown parent '{parent}'")]
    UnresolvedParent {
        /// Child instrument.
        instrument: String,
        /// Missing parent.
        parent: String,
    },

    /// Parent references loop back onto the instrument.
    #[error("Instrument '{instrument}' is its own ancestor")]
    ParentCycle {
        /// An instrument on the cycle.
        instrument: String,
    },

    /// A channel's port reference does not match any declared instrument port.
    #[error("Channel '{channel}' references unknown port '{port}'")]
    UnresolvedPort {
        /// Channel holding the reference.
        channel: String,
        /// The unresolved reference.
        port: PortRef,
    },

    /// A channel's local oscillator is not a declared instrument.
    #[error("Channel '{channel}' references unknown local oscillator '{instrument}'")]
    UnresolvedOscillator {
        /// Channel holding the reference.
        channel: String,
        /// Missing instrument.
        instrument: String,
    },

    /// A channel's local oscillator names an instrument of another kind.
    #[error("Channel '{channel}' uses '{instrument}' as local oscillator, but it is a {kind}")]
    NotAnOscillator {
        /// Channel holding the reference.
        channel: String,
        /// Referenced instrument.
        instrument: String,
        /// Actual kind of the instrument.
        kind: String,
    },

    /// Two channels share a name.
    #[error("Duplicate channel '{name}'")]
    DuplicateChannel {
        /// The repeated channel name.
        name: String,
    },

    /// A role assignment names a channel that is not declared.
    #[error("Qubit {qubit} role '{role}' references unknown channel '{channel}'")]
    UnresolvedChannel {
        /// Qubit receiving the assignment.
        qubit: QubitId,
        /// Role as written in the descriptor.
        role: String,
        /// Missing channel.
        channel: String,
    },

    /// A role assignment uses a role name outside readout, feedback, drive, flux.
    #[error("Qubit {qubit} has invalid role '{role}' (channel '{channel}')")]
    InvalidRole {
        /// Qubit receiving the assignment.
        qubit: QubitId,
        /// Role as written in the descriptor.
        role: String,
        /// Channel named by the assignment.
        channel: String,
    },

    /// The same role of one qubit is assigned two different channels.
    #[error("Qubit {qubit} role '{role}' assigned to both '{existing}' and '{requested}'")]
    ConflictingRole {
        /// Qubit receiving the assignments.
        qubit: QubitId,
        /// The contested role.
        role: String,
        /// Channel from the earlier assignment.
        existing: String,
        /// Channel from the later assignment.
        requested: String,
    },

    /// A pair names a qubit that the platform does not contain.
    #[error("Pair ({first}, {second}) references unknown qubit {qubit}")]
    UnresolvedQubit {
        /// First qubit of the pair.
        first: QubitId,
        /// Second qubit of the pair.
        second: QubitId,
        /// The qubit that could not be found.
        qubit: QubitId,
    },

    /// A pair couples a qubit with itself.
    #[error("Pair couples qubit {0} with itself")]
    InvalidPair(QubitId),
}

/// Result type for platform assembly.
pub type AssemblyResult<T> = Result<T, AssemblyError>;
