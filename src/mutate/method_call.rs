//! Removal of method calls
//!
//! A removed call is replaced by instructions that only discard and push
//! constants: its operands are popped and, unless the call returns its own
//! receiver, a default value of the return type is pushed in its place.

use super::classify::{is_call_to_super_or_own_constructor, is_chain_call};
use super::context::{MutationContext, MutationIdentifier};
use super::pipeline::{InsnSink, MethodStage};
use super::MethodInfo;
use crate::codegen::descriptor::{MethodDescriptor, ValueCategory};
use crate::codegen::error::DescriptorResult;
use crate::codegen::insn::{Insn, MethodInsn};
use crate::codegen::opcodes::{ACONST_NULL, POP, POP2};
use crate::common::consts::REMOVED_CALL_PREFIX;

/// What to do with one call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Emit the call unchanged
    PassThrough,
    /// Replace the call; carries the activated occurrence
    Mutate(MutationIdentifier),
}

/// Description registered for a removed call: `removed call to Owner::name`
pub fn describe_call(call: &MethodInsn) -> String {
    format!("{} {}::{}", REMOVED_CALL_PREFIX, call.owner, call.name)
}

/// Instructions to emit in place of `call`.
///
/// The sequence leaves the operand stack as deep as the call would, with a
/// value of the same category on top.
pub fn replacement_for(call: &MethodInsn) -> DescriptorResult<Vec<Insn>> {
    let desc = call.parsed_descriptor()?;
    let mut out = Vec::with_capacity(desc.arguments.len() + 3);

    pop_arguments(&desc, call.is_constructor(), &mut out);
    if !is_chain_call(call) {
        if !call.is_static() {
            out.push(Insn::simple(POP));
        }
        push_return_value(&desc, call.is_constructor(), &mut out);
    }
    Ok(out)
}

// Arguments were pushed in declaration order, so they come off last first.
// A constructor call additionally has the `dup`ed reference from `new` under
// its receiver.
fn pop_arguments(desc: &MethodDescriptor, is_constructor: bool, out: &mut Vec<Insn>) {
    for category in desc.argument_categories().into_iter().rev() {
        let op = match category {
            ValueCategory::One => POP,
            ValueCategory::Two => POP2,
        };
        out.push(Insn::simple(op));
    }
    if is_constructor {
        out.push(Insn::simple(POP));
    }
}

fn push_return_value(desc: &MethodDescriptor, is_constructor: bool, out: &mut Vec<Insn>) {
    if let Some(op) = desc.return_type.default_value_opcode() {
        out.push(Insn::simple(op));
    } else if is_constructor {
        // stands in for the object reference `new` left behind
        out.push(Insn::simple(ACONST_NULL));
    }
}

/// Stage removing the call site the mutation context activates
pub struct MethodCallStage<'a, F> {
    mutator: String,
    method: &'a MethodInfo,
    context: &'a mut dyn MutationContext,
    filter: F,
}

impl<'a, F> MethodCallStage<'a, F>
where
    F: Fn(&str, &str) -> bool,
{
    /// `filter` receives the called method's name and descriptor
    pub fn new(
        mutator: impl Into<String>,
        method: &'a MethodInfo,
        context: &'a mut dyn MutationContext,
        filter: F,
    ) -> Self {
        Self {
            mutator: mutator.into(),
            method,
            context,
            filter,
        }
    }

    /// Decide the fate of one call site, registering it when eligible
    pub fn decide(&mut self, call: &MethodInsn) -> Decision {
        if is_call_to_super_or_own_constructor(call, self.method) {
            log::trace!("skipping initializer chain call {}", call);
            return Decision::PassThrough;
        }
        if !(self.filter)(&call.name, &call.descriptor) {
            log::trace!("{} rejected {}", self.mutator, call);
            return Decision::PassThrough;
        }

        let description = describe_call(call);
        let id = self.context.register_mutation(&self.mutator, &description);
        if self.context.should_mutate(&id) {
            Decision::Mutate(id)
        } else {
            Decision::PassThrough
        }
    }

    fn visit_method_insn(&mut self, call: MethodInsn, sink: &mut dyn InsnSink) {
        let id = match self.decide(&call) {
            Decision::PassThrough => {
                sink.emit(Insn::Method(call));
                return;
            }
            Decision::Mutate(id) => id,
        };

        match replacement_for(&call) {
            Ok(replacement) => {
                log::debug!(
                    "{}: replacing `{}` with [{}]",
                    id,
                    call,
                    replacement
                        .iter()
                        .map(|insn| insn.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                for insn in replacement {
                    sink.emit(insn);
                }
            }
            Err(e) => {
                log::warn!("{}: keeping `{}`: {}", id, call, e);
                sink.emit(Insn::Method(call));
            }
        }
    }
}

impl<'a, F> MethodStage for MethodCallStage<'a, F>
where
    F: Fn(&str, &str) -> bool,
{
    fn visit_insn(&mut self, insn: Insn, sink: &mut dyn InsnSink) {
        match insn {
            Insn::Method(call) => self.visit_method_insn(call, sink),
            other => sink.emit(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::insn::InvokeKind;
    use crate::codegen::opcodes::*;

    fn ops(insns: &[Insn]) -> Vec<u8> {
        insns.iter().filter_map(Insn::opcode).collect()
    }

    #[test]
    fn test_static_int_call() {
        let call = MethodInsn::new(InvokeKind::Static, "java/lang/Math", "max", "(II)I");
        assert_eq!(ops(&replacement_for(&call).unwrap()), vec![POP, POP, ICONST_0]);
    }

    #[test]
    fn test_wide_arguments_and_return() {
        let call = MethodInsn::new(InvokeKind::Virtual, "p/Calc", "mix", "(JIDLjava/lang/Object;)D");
        assert_eq!(
            ops(&replacement_for(&call).unwrap()),
            vec![POP, POP2, POP, POP2, POP, DCONST_0]
        );
    }

    #[test]
    fn test_float_long_and_reference_returns() {
        let f = MethodInsn::new(InvokeKind::Static, "p/A", "f", "()F");
        let j = MethodInsn::new(InvokeKind::Static, "p/A", "j", "()J");
        let s = MethodInsn::new(InvokeKind::Static, "p/A", "s", "()Ljava/lang/String;");
        let arr = MethodInsn::new(InvokeKind::Static, "p/A", "arr", "()[I");
        assert_eq!(ops(&replacement_for(&f).unwrap()), vec![FCONST_0]);
        assert_eq!(ops(&replacement_for(&j).unwrap()), vec![LCONST_0]);
        assert_eq!(ops(&replacement_for(&s).unwrap()), vec![ACONST_NULL]);
        assert_eq!(ops(&replacement_for(&arr).unwrap()), vec![ACONST_NULL]);
    }

    #[test]
    fn test_chain_call_keeps_receiver() {
        let trim = MethodInsn::new(InvokeKind::Virtual, "java/lang/String", "trim", "()Ljava/lang/String;");
        assert!(replacement_for(&trim).unwrap().is_empty());

        let append = MethodInsn::new(
            InvokeKind::Virtual,
            "java/lang/StringBuilder",
            "append",
            "(J)Ljava/lang/StringBuilder;",
        );
        assert_eq!(ops(&replacement_for(&append).unwrap()), vec![POP2]);
    }

    #[test]
    fn test_void_instance_call() {
        let add = MethodInsn::new(InvokeKind::Interface, "java/util/List", "add", "(Ljava/lang/Object;)V");
        assert_eq!(ops(&replacement_for(&add).unwrap()), vec![POP, POP]);
    }

    #[test]
    fn test_constructor_call() {
        let init = MethodInsn::new(InvokeKind::Special, "java/util/ArrayList", "<init>", "(I)V");
        assert_eq!(
            ops(&replacement_for(&init).unwrap()),
            vec![POP, POP, POP, ACONST_NULL]
        );
    }

    #[test]
    fn test_malformed_descriptor() {
        let call = MethodInsn::new(InvokeKind::Static, "p/A", "f", "(I");
        assert!(replacement_for(&call).is_err());
    }

    #[test]
    fn test_description() {
        let call = MethodInsn::new(InvokeKind::Virtual, "com/example/Foo", "compute", "()J");
        assert_eq!(describe_call(&call), "removed call to com/example/Foo::compute");
    }
}
