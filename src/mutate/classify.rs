//! Classification of call sites

use super::{is_constructor, MethodInfo};
use crate::codegen::descriptor::parse_method_descriptor;
use crate::codegen::insn::MethodInsn;

/// `this(...)` or `super(...)` inside a constructor.
///
/// These run the object's initializer chain and are never mutated.
pub fn is_call_to_super_or_own_constructor(call: &MethodInsn, method: &MethodInfo) -> bool {
    method.is_constructor()
        && is_constructor(&call.name)
        && (call.owner == method.class.name || call.owner == method.class.super_name)
}

/// An instance call returning the receiver's declared type, e.g. a fluent
/// builder call. The receiver already on the stack can stand in for the result.
///
/// Owners of instance calls are always class or interface names, so comparing
/// the dotted return type name against the dotted owner is sufficient.
pub fn is_chain_call(call: &MethodInsn) -> bool {
    if call.is_static() {
        return false;
    }
    match parse_method_descriptor(&call.descriptor) {
        Ok(desc) => desc.return_type.class_name() == call.owner.replace('/', "."),
        Err(_) => false,
    }
}
