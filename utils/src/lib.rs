//! Shared utilities for the KYC core.

pub mod logging;

pub use logging::{init_logging, LogFormat};
