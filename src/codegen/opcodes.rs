//! Java bytecode instruction opcodes
//!
//! Only the opcodes the call-removal transformer reads, emits or has to carry
//! through a listing as zero-operand instructions are defined here. Values follow
//! the Java Virtual Machine Specification.

use once_cell::sync::Lazy;
use std::collections::HashMap;

// 0x00 - 0x0F: Constants
pub const NOP: u8 = 0x00;
pub const ACONST_NULL: u8 = 0x01;
pub const ICONST_M1: u8 = 0x02;
pub const ICONST_0: u8 = 0x03;
pub const ICONST_1: u8 = 0x04;
pub const ICONST_2: u8 = 0x05;
pub const ICONST_3: u8 = 0x06;
pub const ICONST_4: u8 = 0x07;
pub const ICONST_5: u8 = 0x08;
pub const LCONST_0: u8 = 0x09;
pub const LCONST_1: u8 = 0x0a;
pub const FCONST_0: u8 = 0x0b;
pub const FCONST_1: u8 = 0x0c;
pub const FCONST_2: u8 = 0x0d;
pub const DCONST_0: u8 = 0x0e;
pub const DCONST_1: u8 = 0x0f;

// 0x1A - 0x2D: Short-form loads
pub const ILOAD_0: u8 = 0x1a;
pub const ILOAD_1: u8 = 0x1b;
pub const ILOAD_2: u8 = 0x1c;
pub const ILOAD_3: u8 = 0x1d;
pub const LLOAD_0: u8 = 0x1e;
pub const LLOAD_1: u8 = 0x1f;
pub const LLOAD_2: u8 = 0x20;
pub const LLOAD_3: u8 = 0x21;
pub const FLOAD_0: u8 = 0x22;
pub const FLOAD_1: u8 = 0x23;
pub const FLOAD_2: u8 = 0x24;
pub const FLOAD_3: u8 = 0x25;
pub const DLOAD_0: u8 = 0x26;
pub const DLOAD_1: u8 = 0x27;
pub const DLOAD_2: u8 = 0x28;
pub const DLOAD_3: u8 = 0x29;
pub const ALOAD_0: u8 = 0x2a;
pub const ALOAD_1: u8 = 0x2b;
pub const ALOAD_2: u8 = 0x2c;
pub const ALOAD_3: u8 = 0x2d;

// 0x3B - 0x4E: Short-form stores
pub const ISTORE_0: u8 = 0x3b;
pub const ISTORE_1: u8 = 0x3c;
pub const ISTORE_2: u8 = 0x3d;
pub const ISTORE_3: u8 = 0x3e;
pub const LSTORE_0: u8 = 0x3f;
pub const LSTORE_1: u8 = 0x40;
pub const LSTORE_2: u8 = 0x41;
pub const LSTORE_3: u8 = 0x42;
pub const FSTORE_0: u8 = 0x43;
pub const FSTORE_1: u8 = 0x44;
pub const FSTORE_2: u8 = 0x45;
pub const FSTORE_3: u8 = 0x46;
pub const DSTORE_0: u8 = 0x47;
pub const DSTORE_1: u8 = 0x48;
pub const DSTORE_2: u8 = 0x49;
pub const DSTORE_3: u8 = 0x4a;
pub const ASTORE_0: u8 = 0x4b;
pub const ASTORE_1: u8 = 0x4c;
pub const ASTORE_2: u8 = 0x4d;
pub const ASTORE_3: u8 = 0x4e;

// 0x57 - 0x5F: Stack operations
pub const POP: u8 = 0x57;
pub const POP2: u8 = 0x58;
pub const DUP: u8 = 0x59;
pub const DUP_X1: u8 = 0x5a;
pub const DUP2: u8 = 0x5c;
pub const SWAP: u8 = 0x5f;

// 0x60 - 0x6B: Arithmetic
pub const IADD: u8 = 0x60;
pub const LADD: u8 = 0x61;
pub const FADD: u8 = 0x62;
pub const DADD: u8 = 0x63;
pub const ISUB: u8 = 0x64;
pub const LSUB: u8 = 0x65;
pub const IMUL: u8 = 0x68;
pub const LMUL: u8 = 0x69;

// 0x85 - 0x88: Conversions
pub const I2L: u8 = 0x85;
pub const I2D: u8 = 0x87;
pub const L2I: u8 = 0x88;

// 0xAC - 0xB1: Returns
pub const IRETURN: u8 = 0xac;
pub const LRETURN: u8 = 0xad;
pub const FRETURN: u8 = 0xae;
pub const DRETURN: u8 = 0xaf;
pub const ARETURN: u8 = 0xb0;
pub const RETURN: u8 = 0xb1;

// 0xB6 - 0xB9: Method invocation
pub const INVOKEVIRTUAL: u8 = 0xb6;
pub const INVOKESPECIAL: u8 = 0xb7;
pub const INVOKESTATIC: u8 = 0xb8;
pub const INVOKEINTERFACE: u8 = 0xb9;

// 0xBE - 0xBF: Misc
pub const ARRAYLENGTH: u8 = 0xbe;
pub const ATHROW: u8 = 0xbf;

/// Listing mnemonics of every zero-operand opcode above, in opcode order
const ZERO_OPERAND_NAMES: &[(u8, &str)] = &[
    (NOP, "nop"),
    (ACONST_NULL, "aconst_null"),
    (ICONST_M1, "iconst_m1"),
    (ICONST_0, "iconst_0"),
    (ICONST_1, "iconst_1"),
    (ICONST_2, "iconst_2"),
    (ICONST_3, "iconst_3"),
    (ICONST_4, "iconst_4"),
    (ICONST_5, "iconst_5"),
    (LCONST_0, "lconst_0"),
    (LCONST_1, "lconst_1"),
    (FCONST_0, "fconst_0"),
    (FCONST_1, "fconst_1"),
    (FCONST_2, "fconst_2"),
    (DCONST_0, "dconst_0"),
    (DCONST_1, "dconst_1"),
    (ILOAD_0, "iload_0"),
    (ILOAD_1, "iload_1"),
    (ILOAD_2, "iload_2"),
    (ILOAD_3, "iload_3"),
    (LLOAD_0, "lload_0"),
    (LLOAD_1, "lload_1"),
    (LLOAD_2, "lload_2"),
    (LLOAD_3, "lload_3"),
    (FLOAD_0, "fload_0"),
    (FLOAD_1, "fload_1"),
    (FLOAD_2, "fload_2"),
    (FLOAD_3, "fload_3"),
    (DLOAD_0, "dload_0"),
    (DLOAD_1, "dload_1"),
    (DLOAD_2, "dload_2"),
    (DLOAD_3, "dload_3"),
    (ALOAD_0, "aload_0"),
    (ALOAD_1, "aload_1"),
    (ALOAD_2, "aload_2"),
    (ALOAD_3, "aload_3"),
    (ISTORE_0, "istore_0"),
    (ISTORE_1, "istore_1"),
    (ISTORE_2, "istore_2"),
    (ISTORE_3, "istore_3"),
    (LSTORE_0, "lstore_0"),
    (LSTORE_1, "lstore_1"),
    (LSTORE_2, "lstore_2"),
    (LSTORE_3, "lstore_3"),
    (FSTORE_0, "fstore_0"),
    (FSTORE_1, "fstore_1"),
    (FSTORE_2, "fstore_2"),
    (FSTORE_3, "fstore_3"),
    (DSTORE_0, "dstore_0"),
    (DSTORE_1, "dstore_1"),
    (DSTORE_2, "dstore_2"),
    (DSTORE_3, "dstore_3"),
    (ASTORE_0, "astore_0"),
    (ASTORE_1, "astore_1"),
    (ASTORE_2, "astore_2"),
    (ASTORE_3, "astore_3"),
    (POP, "pop"),
    (POP2, "pop2"),
    (DUP, "dup"),
    (DUP_X1, "dup_x1"),
    (DUP2, "dup2"),
    (SWAP, "swap"),
    (IADD, "iadd"),
    (LADD, "ladd"),
    (FADD, "fadd"),
    (DADD, "dadd"),
    (ISUB, "isub"),
    (LSUB, "lsub"),
    (IMUL, "imul"),
    (LMUL, "lmul"),
    (I2L, "i2l"),
    (I2D, "i2d"),
    (L2I, "l2i"),
    (IRETURN, "ireturn"),
    (LRETURN, "lreturn"),
    (FRETURN, "freturn"),
    (DRETURN, "dreturn"),
    (ARETURN, "areturn"),
    (RETURN, "return"),
    (ARRAYLENGTH, "arraylength"),
    (ATHROW, "athrow"),
];

static BY_MNEMONIC: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| ZERO_OPERAND_NAMES.iter().map(|&(op, name)| (name, op)).collect());

static BY_OPCODE: Lazy<HashMap<u8, &'static str>> =
    Lazy::new(|| ZERO_OPERAND_NAMES.iter().copied().collect());

/// Helper function to get the listing mnemonic of a zero-operand opcode
pub fn opcode_name(opcode: u8) -> Option<&'static str> {
    BY_OPCODE.get(&opcode).copied()
}

/// Look up a zero-operand opcode by its (case-insensitive) listing mnemonic
pub fn opcode_from_name(mnemonic: &str) -> Option<u8> {
    BY_MNEMONIC.get(mnemonic.to_ascii_lowercase().as_str()).copied()
}

/// Helper function to check if an opcode is a known zero-operand instruction
pub fn is_zero_operand(opcode: u8) -> bool {
    BY_OPCODE.contains_key(&opcode)
}
