//! Instruction records flowing through a method-body pipeline
//!
//! Instructions arrive already decoded. Invocations carry everything the
//! call-removal stage needs; zero-operand instructions carry just their opcode;
//! anything else is kept opaque and forwarded untouched.

use super::descriptor::{parse_method_descriptor, MethodDescriptor};
use super::error::{BytecodeError, BytecodeResult, DescriptorResult};
use super::opcodes;
use crate::common::consts::CONSTRUCTOR_NAME;
use std::fmt;

/// Dispatch kind of a method invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvokeKind {
    Virtual,
    Special,
    Static,
    Interface,
}

impl InvokeKind {
    /// Decode an invoke opcode. `invokedynamic` and every other opcode are rejected.
    pub fn from_opcode(opcode: u8) -> BytecodeResult<Self> {
        match opcode {
            opcodes::INVOKEVIRTUAL => Ok(InvokeKind::Virtual),
            opcodes::INVOKESPECIAL => Ok(InvokeKind::Special),
            opcodes::INVOKESTATIC => Ok(InvokeKind::Static),
            opcodes::INVOKEINTERFACE => Ok(InvokeKind::Interface),
            _ => Err(BytecodeError::InvalidOpcode { opcode }),
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic.to_ascii_lowercase().as_str() {
            "invokevirtual" => Some(InvokeKind::Virtual),
            "invokespecial" => Some(InvokeKind::Special),
            "invokestatic" => Some(InvokeKind::Static),
            "invokeinterface" => Some(InvokeKind::Interface),
            _ => None,
        }
    }

    pub fn opcode(self) -> u8 {
        match self {
            InvokeKind::Virtual => opcodes::INVOKEVIRTUAL,
            InvokeKind::Special => opcodes::INVOKESPECIAL,
            InvokeKind::Static => opcodes::INVOKESTATIC,
            InvokeKind::Interface => opcodes::INVOKEINTERFACE,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            InvokeKind::Virtual => "invokevirtual",
            InvokeKind::Special => "invokespecial",
            InvokeKind::Static => "invokestatic",
            InvokeKind::Interface => "invokeinterface",
        }
    }

    pub fn is_static(self) -> bool {
        self == InvokeKind::Static
    }
}

/// A method invocation instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodInsn {
    pub kind: InvokeKind,
    /// Internal name of the declaring class (`java/lang/String`)
    pub owner: String,
    pub name: String,
    pub descriptor: String,
    /// Whether the owner is an interface
    pub is_interface: bool,
}

impl MethodInsn {
    pub fn new(
        kind: InvokeKind,
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
            is_interface: kind == InvokeKind::Interface,
        }
    }

    /// Mark an `invokestatic`/`invokespecial` as targeting an interface method
    pub fn with_interface(mut self, is_interface: bool) -> Self {
        self.is_interface = is_interface;
        self
    }

    pub fn is_static(&self) -> bool {
        self.kind.is_static()
    }

    /// Whether the target is an instance initializer
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn parsed_descriptor(&self) -> DescriptorResult<MethodDescriptor> {
        parse_method_descriptor(&self.descriptor)
    }
}

impl fmt::Display for MethodInsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.kind.mnemonic(),
            self.owner,
            self.name,
            self.descriptor
        )?;
        if self.is_interface && self.kind != InvokeKind::Interface {
            write!(f, " itf")?;
        }
        Ok(())
    }
}

/// One instruction of a method body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Insn {
    /// Zero-operand instruction
    Simple(u8),
    /// Method invocation
    Method(MethodInsn),
    /// Any other instruction, carried through verbatim
    Other {
        mnemonic: String,
        operands: Vec<String>,
    },
}

impl Insn {
    pub fn simple(opcode: u8) -> Self {
        Insn::Simple(opcode)
    }

    pub fn invoke(
        kind: InvokeKind,
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Insn::Method(MethodInsn::new(kind, owner, name, descriptor))
    }

    pub fn other(mnemonic: impl Into<String>, operands: Vec<String>) -> Self {
        Insn::Other {
            mnemonic: mnemonic.into(),
            operands,
        }
    }

    pub fn as_method(&self) -> Option<&MethodInsn> {
        match self {
            Insn::Method(call) => Some(call),
            _ => None,
        }
    }

    pub fn opcode(&self) -> Option<u8> {
        match self {
            Insn::Simple(op) => Some(*op),
            Insn::Method(call) => Some(call.kind.opcode()),
            Insn::Other { .. } => None,
        }
    }
}

impl fmt::Display for Insn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insn::Simple(op) => match opcodes::opcode_name(*op) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "opcode_{:#04x}", op),
            },
            Insn::Method(call) => write!(f, "{}", call),
            Insn::Other { mnemonic, operands } => {
                write!(f, "{}", mnemonic)?;
                for operand in operands {
                    write!(f, " {}", operand)?;
                }
                Ok(())
            }
        }
    }
}

impl From<MethodInsn> for Insn {
    fn from(call: MethodInsn) -> Self {
        Insn::Method(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_kind_opcodes() {
        for kind in [
            InvokeKind::Virtual,
            InvokeKind::Special,
            InvokeKind::Static,
            InvokeKind::Interface,
        ] {
            assert_eq!(InvokeKind::from_opcode(kind.opcode()).unwrap(), kind);
            assert_eq!(InvokeKind::from_mnemonic(kind.mnemonic()), Some(kind));
        }
        assert_eq!(
            InvokeKind::from_opcode(0xba),
            Err(BytecodeError::InvalidOpcode { opcode: 0xba })
        );
        assert_eq!(InvokeKind::from_mnemonic("invokedynamic"), None);
    }

    #[test]
    fn test_method_insn_flags() {
        let call = MethodInsn::new(InvokeKind::Interface, "java/util/List", "size", "()I");
        assert!(call.is_interface);
        assert!(!call.is_static());

        let ctor = MethodInsn::new(InvokeKind::Special, "java/lang/Object", "<init>", "()V");
        assert!(ctor.is_constructor());
        assert!(!ctor.is_interface);
    }

    #[test]
    fn test_display() {
        assert_eq!(Insn::simple(opcodes::POP2).to_string(), "pop2");
        assert_eq!(
            Insn::invoke(InvokeKind::Static, "java/lang/Math", "max", "(II)I").to_string(),
            "invokestatic java/lang/Math max (II)I"
        );
        let static_itf = MethodInsn::new(InvokeKind::Static, "java/util/List", "of", "()Ljava/util/List;")
            .with_interface(true);
        assert_eq!(
            Insn::from(static_itf).to_string(),
            "invokestatic java/util/List of ()Ljava/util/List; itf"
        );
        assert_eq!(
            Insn::other("bipush", vec!["7".to_string()]).to_string(),
            "bipush 7"
        );
    }
}
