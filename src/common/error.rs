use thiserror::Error;

use crate::codegen::error::{BytecodeError, DescriptorError};
use crate::parser::ListingError;

/// Result type for tolmut operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the tolmut transformer and its front ends
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Bytecode error: {0}")]
    Bytecode(#[from] BytecodeError),

    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    #[error("Unknown mutator: {name}")]
    UnknownMutator { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}
