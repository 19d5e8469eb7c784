//! CLI command implementations.

pub mod check;
pub mod common;
pub mod models;
pub mod show;
pub mod version;
