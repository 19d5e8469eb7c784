//! labwire Platform Assembler
//!
//! This crate turns declarative descriptor sets (instruments, channels,
//! qubit-role assignments, pairs and settings) into an immutable
//! [`Platform`] that an experiment engine can consume.
//!
//! # Overview
//!
//! - [`Instrument`]s are addressable controllers exposing named [`Port`]s
//! - [`Channel`]s bind a signal path to one instrument port, optionally
//!   through a local oscillator
//! - [`Qubit`]s hold up to four channels by [`Role`]: readout, feedback,
//!   drive, flux
//! - [`assemble`] checks referential integrity and builds the [`Platform`],
//!   or reports the first [`AssemblyError`]
//! - [`ReviewNote`]s flag wiring that is legal but suspicious
//!
//! # Example
//!
//! ```rust
//! use labwire_platform::{
//!     Address, ChannelDescriptor, InstrumentDescriptor, PlatformDescriptor, PortDescriptor,
//!     PortRef, QubitId, Role,
//! };
//!
//! let descriptor = PlatformDescriptor::new("demo")
//!     .instrument(
//!         InstrumentDescriptor::new("A", Address::new("192.168.0.2"))
//!             .with_port(PortDescriptor::output("o1")),
//!     )
//!     .instrument(
//!         InstrumentDescriptor::new("B", "192.168.0.3:1".parse().unwrap())
//!             .with_port(PortDescriptor::output("o1"))
//!             .with_port(PortDescriptor::input("i1")),
//!     )
//!     .channel(ChannelDescriptor::new("ro", PortRef::new("A", "o1")))
//!     .channel(ChannelDescriptor::new("fb", PortRef::new("B", "i1")))
//!     .assign(0, Role::Readout, "ro")
//!     .assign(0, Role::Feedback, "fb");
//!
//! let platform = descriptor.assemble().unwrap();
//! let readout = platform.resolve(&QubitId::Index(0), Role::Readout).unwrap();
//! assert_eq!(readout.instrument.name(), "A");
//! assert_eq!(readout.port.name, "o1");
//! ```

pub mod assembler;
pub mod channel;
pub mod descriptor;
pub mod error;
pub mod instrument;
pub mod platform;
pub mod qubit;
pub mod review;
pub mod settings;

pub use assembler::assemble;
pub use channel::{Channel, PortRef};
pub use descriptor::{
    ChannelDescriptor, InstrumentDescriptor, PlatformDescriptor, PortDescriptor, RoleDescriptor,
};
pub use error::{AssemblyError, AssemblyResult, ModelError, ModelResult};
pub use instrument::{Address, Instrument, InstrumentKind, OscillatorSettings, Port, PortDirection};
pub use platform::{Platform, ResolvedRole};
pub use qubit::{Qubit, QubitId, QubitPair, Role};
pub use review::ReviewNote;
pub use settings::{ResonatorType, Settings};
