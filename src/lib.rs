//! tolmut: call-removal mutation for JVM method bodies
//!
//! Removes a single method call from a method body and replaces it with a
//! side-effect-free instruction sequence that keeps the operand stack intact,
//! producing a mutant whose surviving tests reveal unchecked call effects.
//!
//! ## Architecture
//!
//! - **codegen**: descriptors, instructions, opcodes and the operand stack model
//! - **mutate**: the call-removal stage, its gate and the mutation registry
//! - **parser**: the textual instruction listing read and written by the CLI
//! - **common**: configuration, errors and shared constants
//! - **bin**: command-line interface
//!
//! ## Mutation Flow
//!
//! ```text
//! Listing → Parser → Vec<Insn> → MethodCallStage → Vec<Insn> → Listing
//!                                      ↓
//!                         ClassContext (register / should_mutate)
//! ```

pub mod codegen;
pub mod common;
pub mod mutate;
pub mod parser;

pub use codegen::insn::{Insn, InvokeKind, MethodInsn};
pub use common::{Config, Error, Result};
pub use mutate::{
    ClassContext, ClassInfo, MethodCallStage, MethodInfo, MutationContext, MutationDetails,
    MutationIdentifier, MutatorKind,
};
pub use parser::{parse_listing, print_listing};

use mutate::run_stage;

/// Outcome of one call-removal pass over a method body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRun {
    /// The body after the pass
    pub instructions: Vec<Insn>,
    /// Every eligible call site found, in body order
    pub mutations: Vec<MutationDetails>,
    /// The occurrence the pass was asked to remove, if it was found
    pub activated: Option<MutationIdentifier>,
}

/// Run the call-removal stage over `body` with a fresh registry for the
/// method's class.
///
/// With no `config.target` nothing is rewritten and the run only reports the
/// eligible call sites.
pub fn mutate_method(body: Vec<Insn>, method: &MethodInfo, config: &Config) -> MutationRun {
    let mut context = ClassContext::new(method.class.clone());
    if let Some(index) = config.target {
        context = context.with_target_index(index);
    }
    context.enter_method(method);

    let instructions = {
        let mut stage = MethodCallStage::new(
            config.mutator.name(),
            method,
            &mut context,
            config.mutator.filter(),
        );
        run_stage(&mut stage, body)
    };

    let activated = context.target().cloned();
    if let (Some(index), None) = (config.target, &activated) {
        log::warn!(
            "{}{}: no {} occurrence #{} ({} found)",
            method.name,
            method.descriptor,
            config.mutator,
            index,
            context.mutations().len()
        );
    }

    MutationRun {
        instructions,
        mutations: context.into_mutations(),
        activated,
    }
}

/// Parse a listing and run `mutate_method` over it
pub fn mutate_listing(source: &str, method: &MethodInfo, config: &Config) -> Result<MutationRun> {
    let body = parse_listing(source)?;
    Ok(mutate_method(body, method, config))
}
