use super::span::Location;
use thiserror::Error;

/// Errors reading an instruction listing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("{location}: unrecognised input `{text}`")]
    Lexical { text: String, location: Location },

    #[error("{location}: `{mnemonic}` expects {expected} operands, found {found}")]
    OperandCount {
        mnemonic: String,
        expected: String,
        found: usize,
        location: Location,
    },

    #[error("{location}: unexpected `{found}` after `{mnemonic}`, expected `itf`")]
    UnexpectedOperand {
        mnemonic: String,
        found: String,
        location: Location,
    },
}

impl ListingError {
    pub fn operand_count(mnemonic: &str, expected: &str, found: usize, location: Location) -> Self {
        ListingError::OperandCount {
            mnemonic: mnemonic.to_string(),
            expected: expected.to_string(),
            found,
            location,
        }
    }

    /// Where in the listing the error was found
    pub fn location(&self) -> Location {
        match self {
            ListingError::Lexical { location, .. }
            | ListingError::OperandCount { location, .. }
            | ListingError::UnexpectedOperand { location, .. } => *location,
        }
    }
}

pub type ListingResult<T> = std::result::Result<T, ListingError>;
