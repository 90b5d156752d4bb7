//! Call-removal mutation of method bodies
//!
//! A method body is streamed through `MethodStage`s one instruction at a time.
//! `MethodCallStage` is the stage that replaces one selected call site with a
//! side-effect-free sequence that leaves the operand stack as the call would.

pub mod classify;
pub mod context;
pub mod filters;
pub mod method_call;
pub mod pipeline;

pub use classify::{is_call_to_super_or_own_constructor, is_chain_call};
pub use context::{ClassContext, Location, MutationContext, MutationDetails, MutationIdentifier};
pub use filters::MutatorKind;
pub use method_call::{describe_call, replacement_for, Decision, MethodCallStage};
pub use pipeline::{run_stage, InsnSink, MethodStage, PassThrough, Pipeline};

use crate::codegen::descriptor::parse_method_descriptor;
use crate::common::consts::{CONSTRUCTOR_NAME, JAVA_LANG_OBJECT};

/// The class whose methods are being mutated
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassInfo {
    /// Internal name (`com/example/Foo`)
    pub name: String,
    /// Internal name of the direct superclass
    pub super_name: String,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, super_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_name: super_name.into(),
        }
    }

    /// A class extending `java/lang/Object`
    pub fn extending_object(name: impl Into<String>) -> Self {
        Self::new(name, JAVA_LANG_OBJECT)
    }
}

/// The method whose body is being processed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    pub class: ClassInfo,
    pub name: String,
    pub descriptor: String,
}

impl MethodInfo {
    pub fn new(class: ClassInfo, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            class,
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn is_constructor(&self) -> bool {
        is_constructor(&self.name)
    }
}

/// Whether a method name denotes an instance initializer
pub fn is_constructor(name: &str) -> bool {
    name == CONSTRUCTOR_NAME
}

/// Whether a method descriptor returns void
pub fn is_void(descriptor: &str) -> bool {
    parse_method_descriptor(descriptor).map_or(false, |desc| desc.returns_void())
}
