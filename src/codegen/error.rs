//! Specific error types for bytecode model operations

use thiserror::Error;

/// Errors that can occur while parsing type and method descriptors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Invalid type descriptor: {descriptor}")]
    InvalidTypeDescriptor { descriptor: String },
    #[error("Invalid method descriptor: {descriptor}")]
    InvalidMethodDescriptor { descriptor: String },
    #[error("Unterminated class name in descriptor: {descriptor}")]
    UnterminatedClassName { descriptor: String },
    #[error("Void is only allowed as a method return type: {descriptor}")]
    MisplacedVoid { descriptor: String },
}

/// Errors that can occur while simulating or decoding bytecode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BytecodeError {
    #[error("Stack underflow at {instruction}")]
    StackUnderflow { instruction: String },
    #[error("Operand category mismatch at {instruction}: {message}")]
    CategoryMismatch { instruction: String, message: String },
    #[error("Type mismatch at {instruction}: expected {expected}, found {found}")]
    TypeMismatch {
        instruction: String,
        expected: String,
        found: String,
    },
    #[error("Invalid opcode: {opcode:#04x}")]
    InvalidOpcode { opcode: u8 },
    #[error("Unknown stack effect for instruction: {instruction}")]
    UnknownEffect { instruction: String },
    #[error("Invalid descriptor: {0}")]
    Descriptor(#[from] DescriptorError),
}

/// Generic result type for descriptor operations
pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Generic result type for bytecode operations
pub type BytecodeResult<T> = Result<T, BytecodeError>;
