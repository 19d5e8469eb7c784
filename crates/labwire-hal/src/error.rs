//! Error types for the HAL crate.

use thiserror::Error;

/// Errors raised while resolving instrument models.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No driver is registered under this model name.
    #[error("Unknown instrument model '{0}'")]
    UnknownModel(String),

    /// A declared port does not exist on the model, or has another direction.
    #[error("Instrument '{instrument}' declares port '{port}', which model '{model}' does not provide")]
    PortMismatch {
        /// Instrument name.
        instrument: String,
        /// Model name.
        model: String,
        /// Offending port.
        port: String,
    },

    /// An oscillator setting lies outside the model's range.
    #[error("Instrument '{instrument}' {parameter} {value} outside [{min}, {max}]")]
    OutOfRange {
        /// Instrument name.
        instrument: String,
        /// Setting name (`frequency`, `power`).
        parameter: &'static str,
        /// Requested value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
