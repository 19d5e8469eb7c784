//! Execution settings and platform-wide options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of shots per execution.
pub const DEFAULT_NSHOTS: u32 = 1024;

/// Default wait between shots, in nanoseconds.
pub const DEFAULT_RELAXATION_TIME: u32 = 20_000;

/// Execution settings handed to the experiment engine unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Number of shots.
    #[serde(default = "default_nshots")]
    pub nshots: u32,
    /// Relaxation time between shots, in ns.
    #[serde(default = "default_relaxation_time")]
    pub relaxation_time: u32,
    /// Any further keys.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_nshots() -> u32 {
    DEFAULT_NSHOTS
}

fn default_relaxation_time() -> u32 {
    DEFAULT_RELAXATION_TIME
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nshots: DEFAULT_NSHOTS,
            relaxation_time: DEFAULT_RELAXATION_TIME,
            extra: serde_json::Map::new(),
        }
    }
}

/// Geometry of the readout resonators on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResonatorType {
    /// Planar resonators.
    #[default]
    #[serde(rename = "2D")]
    TwoD,
    /// 3D cavity.
    #[serde(rename = "3D")]
    ThreeD,
}

impl fmt::Display for ResonatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResonatorType::TwoD => write!(f, "2D"),
            ResonatorType::ThreeD => write!(f, "3D"),
        }
    }
}
