//! Operand stack effects of instructions
//!
//! Two levels are provided: a plain depth delta per instruction, and an
//! `OperandStack` that tracks the verification type of every entry so a
//! rewritten sequence can be checked to leave exactly the same stack shape
//! as the code it replaces.

use super::descriptor::{parse_method_descriptor, JvmType, ValueCategory};
use super::error::{BytecodeError, BytecodeResult};
use super::insn::{Insn, MethodInsn};
use super::opcodes::*;
use std::fmt;

/// Verification type of an operand stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackType {
    Int,
    Float,
    Long,
    Double,
    Reference,
}

impl StackType {
    pub fn from_jvm_type(ty: &JvmType) -> Option<StackType> {
        match ty {
            JvmType::Void => None,
            JvmType::Boolean | JvmType::Byte | JvmType::Char | JvmType::Short | JvmType::Int => {
                Some(StackType::Int)
            }
            JvmType::Long => Some(StackType::Long),
            JvmType::Float => Some(StackType::Float),
            JvmType::Double => Some(StackType::Double),
            JvmType::Object(_) | JvmType::Array(_) => Some(StackType::Reference),
        }
    }

    pub fn category(self) -> ValueCategory {
        match self {
            StackType::Long | StackType::Double => ValueCategory::Two,
            _ => ValueCategory::One,
        }
    }

    pub fn size(self) -> u32 {
        self.category().slots()
    }
}

impl fmt::Display for StackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StackType::Int => "int",
            StackType::Float => "float",
            StackType::Long => "long",
            StackType::Double => "double",
            StackType::Reference => "reference",
        };
        write!(f, "{}", name)
    }
}

// How a zero-operand instruction changes the stack.
enum Effect {
    Typed {
        pops: &'static [StackType],
        pushes: &'static [StackType],
    },
    Pop,
    Pop2,
    Dup,
    DupX1,
    Dup2,
    Swap,
}

use StackType::{Double as D, Float as F, Int as I, Long as L, Reference as A};

fn typed(pops: &'static [StackType], pushes: &'static [StackType]) -> Effect {
    Effect::Typed { pops, pushes }
}

fn simple_effect(opcode: u8) -> Option<Effect> {
    let effect = match opcode {
        NOP | RETURN => typed(&[], &[]),
        ACONST_NULL => typed(&[], &[A]),
        ICONST_M1..=ICONST_5 => typed(&[], &[I]),
        LCONST_0 | LCONST_1 => typed(&[], &[L]),
        FCONST_0..=FCONST_2 => typed(&[], &[F]),
        DCONST_0 | DCONST_1 => typed(&[], &[D]),
        ILOAD_0..=ILOAD_3 => typed(&[], &[I]),
        LLOAD_0..=LLOAD_3 => typed(&[], &[L]),
        FLOAD_0..=FLOAD_3 => typed(&[], &[F]),
        DLOAD_0..=DLOAD_3 => typed(&[], &[D]),
        ALOAD_0..=ALOAD_3 => typed(&[], &[A]),
        ISTORE_0..=ISTORE_3 | IRETURN => typed(&[I], &[]),
        LSTORE_0..=LSTORE_3 | LRETURN => typed(&[L], &[]),
        FSTORE_0..=FSTORE_3 | FRETURN => typed(&[F], &[]),
        DSTORE_0..=DSTORE_3 | DRETURN => typed(&[D], &[]),
        ASTORE_0..=ASTORE_3 | ARETURN | ATHROW => typed(&[A], &[]),
        POP => Effect::Pop,
        POP2 => Effect::Pop2,
        DUP => Effect::Dup,
        DUP_X1 => Effect::DupX1,
        DUP2 => Effect::Dup2,
        SWAP => Effect::Swap,
        IADD | ISUB | IMUL => typed(&[I, I], &[I]),
        LADD | LSUB | LMUL => typed(&[L, L], &[L]),
        FADD => typed(&[F, F], &[F]),
        DADD => typed(&[D, D], &[D]),
        I2L => typed(&[I], &[L]),
        I2D => typed(&[I], &[D]),
        L2I => typed(&[L], &[I]),
        ARRAYLENGTH => typed(&[A], &[I]),
        _ => return None,
    };
    Some(effect)
}

fn slots(types: &[StackType]) -> i32 {
    types.iter().map(|t| t.size() as i32).sum()
}

/// Net stack depth change (in slots) of an invocation
pub fn invoke_delta(call: &MethodInsn) -> BytecodeResult<i32> {
    let desc = parse_method_descriptor(&call.descriptor)?;
    let receiver = if call.is_static() { 0 } else { 1 };
    Ok(desc.return_slots() as i32 - desc.argument_slots() as i32 - receiver)
}

/// Net stack depth change (in slots) of one instruction, `None` when unknown
pub fn stack_delta(insn: &Insn) -> Option<i32> {
    match insn {
        Insn::Simple(op) => match simple_effect(*op)? {
            Effect::Typed { pops, pushes } => Some(slots(pushes) - slots(pops)),
            Effect::Pop => Some(-1),
            Effect::Pop2 => Some(-2),
            Effect::Dup | Effect::DupX1 => Some(1),
            Effect::Dup2 => Some(2),
            Effect::Swap => Some(0),
        },
        Insn::Method(call) => invoke_delta(call).ok(),
        Insn::Other { .. } => None,
    }
}

/// Net stack depth change of a whole sequence, `None` if any instruction is unknown
pub fn net_stack_delta(insns: &[Insn]) -> Option<i32> {
    insns.iter().map(stack_delta).sum()
}

/// Operand stack simulator tracking verification types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandStack {
    entries: Vec<StackType>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_types(types: &[StackType]) -> Self {
        Self {
            entries: types.to_vec(),
        }
    }

    pub fn push(&mut self, ty: StackType) {
        self.entries.push(ty);
    }

    /// Entries bottom to top
    pub fn entries(&self) -> &[StackType] {
        &self.entries
    }

    /// Depth in slots
    pub fn depth(&self) -> u32 {
        self.entries.iter().map(|t| t.size()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply one instruction
    pub fn apply(&mut self, insn: &Insn) -> BytecodeResult<()> {
        match insn {
            Insn::Simple(op) => {
                let effect = simple_effect(*op).ok_or_else(|| BytecodeError::UnknownEffect {
                    instruction: insn.to_string(),
                })?;
                self.apply_effect(effect, insn)
            }
            Insn::Method(call) => self.apply_invoke(call, insn),
            Insn::Other { .. } => Err(BytecodeError::UnknownEffect {
                instruction: insn.to_string(),
            }),
        }
    }

    /// Apply a sequence in order
    pub fn apply_all(&mut self, insns: &[Insn]) -> BytecodeResult<()> {
        for insn in insns {
            self.apply(insn)?;
        }
        Ok(())
    }

    fn apply_invoke(&mut self, call: &MethodInsn, insn: &Insn) -> BytecodeResult<()> {
        let desc = parse_method_descriptor(&call.descriptor)?;
        for arg in desc.arguments.iter().rev() {
            if let Some(expected) = StackType::from_jvm_type(arg) {
                self.pop_expect(expected, insn)?;
            }
        }
        if !call.is_static() {
            self.pop_expect(StackType::Reference, insn)?;
        }
        if let Some(result) = StackType::from_jvm_type(&desc.return_type) {
            self.push(result);
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect, insn: &Insn) -> BytecodeResult<()> {
        match effect {
            Effect::Typed { pops, pushes } => {
                for expected in pops.iter().rev() {
                    self.pop_expect(*expected, insn)?;
                }
                self.entries.extend_from_slice(pushes);
            }
            Effect::Pop => {
                self.pop_category(ValueCategory::One, insn)?;
            }
            Effect::Pop2 => {
                if self.pop_any(insn)?.category() == ValueCategory::One {
                    self.pop_category(ValueCategory::One, insn)?;
                }
            }
            Effect::Dup => {
                let top = self.pop_category(ValueCategory::One, insn)?;
                self.entries.extend_from_slice(&[top, top]);
            }
            Effect::DupX1 => {
                let v1 = self.pop_category(ValueCategory::One, insn)?;
                let v2 = self.pop_category(ValueCategory::One, insn)?;
                self.entries.extend_from_slice(&[v1, v2, v1]);
            }
            Effect::Dup2 => {
                let top = self.pop_any(insn)?;
                if top.category() == ValueCategory::Two {
                    self.entries.extend_from_slice(&[top, top]);
                } else {
                    let below = self.pop_category(ValueCategory::One, insn)?;
                    self.entries.extend_from_slice(&[below, top, below, top]);
                }
            }
            Effect::Swap => {
                let v1 = self.pop_category(ValueCategory::One, insn)?;
                let v2 = self.pop_category(ValueCategory::One, insn)?;
                self.entries.extend_from_slice(&[v1, v2]);
            }
        }
        Ok(())
    }

    fn pop_any(&mut self, insn: &Insn) -> BytecodeResult<StackType> {
        self.entries.pop().ok_or_else(|| BytecodeError::StackUnderflow {
            instruction: insn.to_string(),
        })
    }

    fn pop_category(&mut self, category: ValueCategory, insn: &Insn) -> BytecodeResult<StackType> {
        let top = self.pop_any(insn)?;
        if top.category() != category {
            return Err(BytecodeError::CategoryMismatch {
                instruction: insn.to_string(),
                message: format!("expected category {:?} value, found {}", category, top),
            });
        }
        Ok(top)
    }

    fn pop_expect(&mut self, expected: StackType, insn: &Insn) -> BytecodeResult<()> {
        let found = self.pop_any(insn)?;
        if found != expected {
            return Err(BytecodeError::TypeMismatch {
                instruction: insn.to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::insn::InvokeKind;

    #[test]
    fn test_simple_deltas() {
        assert_eq!(stack_delta(&Insn::simple(POP)), Some(-1));
        assert_eq!(stack_delta(&Insn::simple(POP2)), Some(-2));
        assert_eq!(stack_delta(&Insn::simple(LCONST_0)), Some(2));
        assert_eq!(stack_delta(&Insn::simple(ACONST_NULL)), Some(1));
        assert_eq!(stack_delta(&Insn::simple(LADD)), Some(-2));
        assert_eq!(stack_delta(&Insn::simple(0xca)), None);
        assert_eq!(stack_delta(&Insn::other("bipush", vec!["1".into()])), None);
    }

    #[test]
    fn test_invoke_deltas() {
        let max = Insn::invoke(InvokeKind::Static, "java/lang/Math", "max", "(JJ)J");
        assert_eq!(stack_delta(&max), Some(-2));

        let add = Insn::invoke(InvokeKind::Interface, "java/util/List", "add", "(Ljava/lang/Object;)Z");
        assert_eq!(stack_delta(&add), Some(-1));

        let init = Insn::invoke(InvokeKind::Special, "java/lang/Object", "<init>", "()V");
        assert_eq!(stack_delta(&init), Some(-1));

        let broken = Insn::invoke(InvokeKind::Static, "A", "b", "(");
        assert_eq!(stack_delta(&broken), None);
    }

    #[test]
    fn test_net_delta() {
        let seq = vec![Insn::simple(ICONST_1), Insn::simple(I2L), Insn::simple(POP2)];
        assert_eq!(net_stack_delta(&seq), Some(0));
        assert_eq!(net_stack_delta(&[]), Some(0));
    }

    #[test]
    fn test_simulate_typed_stack() {
        let mut stack = OperandStack::new();
        stack
            .apply_all(&[
                Insn::simple(ALOAD_0),
                Insn::simple(LLOAD_1),
                Insn::invoke(InvokeKind::Virtual, "p/Foo", "scale", "(J)D"),
            ])
            .unwrap();
        assert_eq!(stack.entries(), &[StackType::Double]);
        assert_eq!(stack.depth(), 2);

        stack.apply(&Insn::simple(POP2)).unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_rejects_wide_value() {
        let mut stack = OperandStack::from_types(&[StackType::Long]);
        assert!(matches!(
            stack.apply(&Insn::simple(POP)),
            Err(BytecodeError::CategoryMismatch { .. })
        ));
    }

    #[test]
    fn test_pop2_on_two_narrow_values() {
        let mut stack = OperandStack::from_types(&[StackType::Int, StackType::Reference]);
        stack.apply(&Insn::simple(POP2)).unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_type_mismatch_and_underflow() {
        let mut stack = OperandStack::from_types(&[StackType::Float]);
        assert!(matches!(
            stack.apply(&Insn::invoke(InvokeKind::Static, "A", "f", "(I)V")),
            Err(BytecodeError::TypeMismatch { .. })
        ));
        let mut empty = OperandStack::new();
        assert!(matches!(
            empty.apply(&Insn::simple(POP)),
            Err(BytecodeError::StackUnderflow { .. })
        ));
    }

    #[test]
    fn test_dup_family() {
        let mut stack = OperandStack::from_types(&[StackType::Int, StackType::Reference]);
        stack.apply(&Insn::simple(DUP_X1)).unwrap();
        assert_eq!(
            stack.entries(),
            &[StackType::Reference, StackType::Int, StackType::Reference]
        );
        stack.apply(&Insn::simple(SWAP)).unwrap();
        assert_eq!(
            stack.entries(),
            &[StackType::Reference, StackType::Reference, StackType::Int]
        );

        let mut wide = OperandStack::from_types(&[StackType::Double]);
        wide.apply(&Insn::simple(DUP2)).unwrap();
        assert_eq!(wide.depth(), 4);
    }
}
