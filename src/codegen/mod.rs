//! JVM bytecode model
//!
//! Descriptors, instructions and the operand-stack effects the mutation
//! stages reason about.

pub mod descriptor;
pub mod error;
pub mod insn;
pub mod opcodes;
pub mod stack;

pub use descriptor::{parse_method_descriptor, JvmType, MethodDescriptor, ValueCategory};
pub use error::{BytecodeError, BytecodeResult, DescriptorError, DescriptorResult};
pub use insn::{Insn, InvokeKind, MethodInsn};
pub use stack::{net_stack_delta, stack_delta, OperandStack, StackType};
