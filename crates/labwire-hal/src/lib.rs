//! labwire Instrument Models
//!
//! This crate knows the instruments a platform is wired from: which ports a
//! model exposes and what a local oscillator can be set to. It completes
//! descriptor sets before they reach the assembler.
//!
//! # Overview
//!
//! - An [`InstrumentDriver`] trait exposing a model's [`DriverCapabilities`]
//! - A [`DriverRegistry`] keyed by model name, preloaded with the built-in
//!   models through [`DriverRegistry::with_builtins`]
//! - [`DriverRegistry::prepare`], which fills in ports and kinds for
//!   instruments that name a model and rejects ports or oscillator settings
//!   the model cannot provide
//!
//! # Built-in Models
//!
//! | Model | Vendor | Ports |
//! |-------|--------|-------|
//! | `qblox_cluster` | Qblox | none |
//! | `qblox_qrm_rf` | Qblox | `o1`, `i1` |
//! | `qblox_qcm_rf` | Qblox | `o1`, `o2` |
//! | `qblox_qcm_bb` | Qblox | `o1`..`o4` |
//! | `rfsoc_zcu216` | Xilinx | `o0`..`o15`, `i0`..`i15` |
//! | `rfsoc_4x2` | Xilinx | `o0`, `o1`, `i0`, `i1` |
//! | `rs_sgs100a` | Rohde & Schwarz | oscillator |
//! | `erasynth` | ERA Instruments | oscillator |
//!
//! # Example
//!
//! ```rust
//! use labwire_hal::DriverRegistry;
//! use labwire_platform::{
//!     Address, ChannelDescriptor, InstrumentDescriptor, PlatformDescriptor, PortRef, Role,
//! };
//!
//! let descriptor = PlatformDescriptor::new("tii1q_b1")
//!     .instrument(
//!         InstrumentDescriptor::new("tii_rfsoc4x2", Address::with_port("192.168.0.72", 6000))
//!             .with_model("rfsoc_4x2"),
//!     )
//!     .channel(ChannelDescriptor::new("L3-18_ro", PortRef::new("tii_rfsoc4x2", "o0")))
//!     .channel(ChannelDescriptor::new("L2-RO", PortRef::new("tii_rfsoc4x2", "i0")))
//!     .assign(0, Role::Readout, "L3-18_ro")
//!     .assign(0, Role::Feedback, "L2-RO");
//!
//! let registry = DriverRegistry::with_builtins();
//! let platform = registry.prepare(descriptor).unwrap().assemble().unwrap();
//! assert!(platform.instrument("tii_rfsoc4x2").unwrap().has_port("i1"));
//! ```

pub mod capability;
pub mod driver;
pub mod error;
pub mod registry;

pub use capability::{DriverCapabilities, PortSpec};
pub use driver::{CatalogDriver, DriverFactory, InstrumentDriver};
pub use error::{HalError, HalResult};
pub use registry::DriverRegistry;
