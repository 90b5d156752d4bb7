//! Common utilities and definitions shared across modules
//!
//! This module contains shared configuration, error definitions and
//! constants used throughout tolmut.

pub mod config;
pub mod consts;
pub mod error;

// Re-export commonly used items for convenience
pub use config::Config;
pub use consts::*;
pub use error::{Error, Result};
