//! Utilities to read method/field descriptors
//!
//! A descriptor tells the transformer everything it needs about the operand
//! stack around a call: how many values each argument occupies and what kind
//! of value (if any) the call leaves behind.

use super::error::{DescriptorError, DescriptorResult};
use super::opcodes;
use std::fmt;
use std::str::FromStr;

/// Stack-slot width of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    /// One slot: int-like primitives, float, references and arrays
    One,
    /// Two slots: long and double
    Two,
}

impl ValueCategory {
    pub fn slots(self) -> u32 {
        match self {
            ValueCategory::One => 1,
            ValueCategory::Two => 2,
        }
    }
}

/// A JVM field type, or `void` in return position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JvmType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Class or interface, by internal name (`java/lang/String`)
    Object(String),
    /// Array of the element type
    Array(Box<JvmType>),
    Void,
}

impl JvmType {
    /// Parse a single field descriptor such as `I` or `[Ljava/lang/String;`
    pub fn parse(descriptor: &str) -> DescriptorResult<JvmType> {
        let mut pos = 0;
        let ty = parse_type_at(descriptor, &mut pos)?;
        if pos != descriptor.len() || ty == JvmType::Void {
            return Err(DescriptorError::InvalidTypeDescriptor {
                descriptor: descriptor.to_string(),
            });
        }
        Ok(ty)
    }

    /// Slot category, `None` for void
    pub fn category(&self) -> Option<ValueCategory> {
        match self {
            JvmType::Void => None,
            JvmType::Long | JvmType::Double => Some(ValueCategory::Two),
            _ => Some(ValueCategory::One),
        }
    }

    /// Number of stack slots a value of this type occupies
    pub fn size(&self) -> u32 {
        self.category().map_or(0, ValueCategory::slots)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JvmType::Void)
    }

    /// Java-language name: `int`, `java.lang.String`, `java.lang.String[][]`
    pub fn class_name(&self) -> String {
        match self {
            JvmType::Boolean => "boolean".to_string(),
            JvmType::Byte => "byte".to_string(),
            JvmType::Char => "char".to_string(),
            JvmType::Short => "short".to_string(),
            JvmType::Int => "int".to_string(),
            JvmType::Long => "long".to_string(),
            JvmType::Float => "float".to_string(),
            JvmType::Double => "double".to_string(),
            JvmType::Object(internal) => internal.replace('/', "."),
            JvmType::Array(element) => format!("{}[]", element.class_name()),
            JvmType::Void => "void".to_string(),
        }
    }

    /// Render back to descriptor form
    pub fn descriptor(&self) -> String {
        match self {
            JvmType::Boolean => "Z".to_string(),
            JvmType::Byte => "B".to_string(),
            JvmType::Char => "C".to_string(),
            JvmType::Short => "S".to_string(),
            JvmType::Int => "I".to_string(),
            JvmType::Long => "J".to_string(),
            JvmType::Float => "F".to_string(),
            JvmType::Double => "D".to_string(),
            JvmType::Object(internal) => format!("L{};", internal),
            JvmType::Array(element) => format!("[{}", element.descriptor()),
            JvmType::Void => "V".to_string(),
        }
    }

    /// Opcode pushing the zero/default value of this type, `None` for void.
    ///
    /// Anything not listed explicitly is a reference or array type and gets
    /// `aconst_null`.
    pub fn default_value_opcode(&self) -> Option<u8> {
        match self {
            JvmType::Void => None,
            JvmType::Int | JvmType::Boolean | JvmType::Byte | JvmType::Char | JvmType::Short => {
                Some(opcodes::ICONST_0)
            }
            JvmType::Long => Some(opcodes::LCONST_0),
            JvmType::Float => Some(opcodes::FCONST_0),
            JvmType::Double => Some(opcodes::DCONST_0),
            _ => Some(opcodes::ACONST_NULL),
        }
    }
}

impl fmt::Display for JvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// A parsed method descriptor `(args)ret`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Argument types in declaration (push) order
    pub arguments: Vec<JvmType>,
    pub return_type: JvmType,
}

impl MethodDescriptor {
    pub fn new(arguments: Vec<JvmType>, return_type: JvmType) -> Self {
        Self { arguments, return_type }
    }

    /// Argument categories in declaration order; the last entry is the top of stack
    pub fn argument_categories(&self) -> Vec<ValueCategory> {
        self.arguments.iter().filter_map(JvmType::category).collect()
    }

    /// Total stack slots taken by the arguments
    pub fn argument_slots(&self) -> u32 {
        self.arguments.iter().map(JvmType::size).sum()
    }

    /// Stack slots taken by the return value (0 for void)
    pub fn return_slots(&self) -> u32 {
        self.return_type.size()
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.is_void()
    }
}

impl FromStr for MethodDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> DescriptorResult<Self> {
        parse_method_descriptor(s)
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for arg in &self.arguments {
            write!(f, "{}", arg.descriptor())?;
        }
        write!(f, "){}", self.return_type.descriptor())
    }
}

/// Parse a method descriptor such as `(IJLjava/lang/String;)V`
pub fn parse_method_descriptor(descriptor: &str) -> DescriptorResult<MethodDescriptor> {
    let invalid = || DescriptorError::InvalidMethodDescriptor {
        descriptor: descriptor.to_string(),
    };
    if !descriptor.starts_with('(') {
        return Err(invalid());
    }

    let mut pos = 1;
    let mut arguments = Vec::new();
    loop {
        match descriptor.as_bytes().get(pos) {
            Some(b')') => {
                pos += 1;
                break;
            }
            Some(_) => {
                let arg = parse_type_at(descriptor, &mut pos)?;
                if arg.is_void() {
                    return Err(DescriptorError::MisplacedVoid {
                        descriptor: descriptor.to_string(),
                    });
                }
                arguments.push(arg);
            }
            None => return Err(invalid()),
        }
    }

    let return_type = parse_type_at(descriptor, &mut pos)?;
    if pos != descriptor.len() {
        return Err(invalid());
    }
    Ok(MethodDescriptor { arguments, return_type })
}

/// Build a method descriptor string from its parts
pub fn method_descriptor(params: &[JvmType], ret: &JvmType) -> String {
    MethodDescriptor::new(params.to_vec(), ret.clone()).to_string()
}

// Parses one type starting at `pos`, leaving `pos` just past it.
fn parse_type_at(descriptor: &str, pos: &mut usize) -> DescriptorResult<JvmType> {
    let bytes = descriptor.as_bytes();
    let Some(&tag) = bytes.get(*pos) else {
        return Err(DescriptorError::InvalidTypeDescriptor {
            descriptor: descriptor.to_string(),
        });
    };
    *pos += 1;
    let ty = match tag {
        b'Z' => JvmType::Boolean,
        b'B' => JvmType::Byte,
        b'C' => JvmType::Char,
        b'S' => JvmType::Short,
        b'I' => JvmType::Int,
        b'J' => JvmType::Long,
        b'F' => JvmType::Float,
        b'D' => JvmType::Double,
        b'V' => JvmType::Void,
        b'L' => {
            let rest = &descriptor[*pos..];
            let end = rest.find(';').ok_or_else(|| DescriptorError::UnterminatedClassName {
                descriptor: descriptor.to_string(),
            })?;
            if end == 0 {
                return Err(DescriptorError::InvalidTypeDescriptor {
                    descriptor: descriptor.to_string(),
                });
            }
            let name = rest[..end].to_string();
            *pos += end + 1;
            JvmType::Object(name)
        }
        b'[' => {
            let element = parse_type_at(descriptor, pos)?;
            if element.is_void() {
                return Err(DescriptorError::MisplacedVoid {
                    descriptor: descriptor.to_string(),
                });
            }
            JvmType::Array(Box::new(element))
        }
        _ => {
            return Err(DescriptorError::InvalidTypeDescriptor {
                descriptor: descriptor.to_string(),
            })
        }
    };
    Ok(ty)
}
