//! Instruction pipeline: stages that see one instruction at a time

use crate::codegen::insn::Insn;

/// Receives the instructions a stage emits
pub trait InsnSink {
    fn emit(&mut self, insn: Insn);
}

impl InsnSink for Vec<Insn> {
    fn emit(&mut self, insn: Insn) {
        self.push(insn);
    }
}

/// One transformation over a method body.
///
/// A stage gets every instruction in order, never looks ahead, and emits zero
/// or more instructions in its place.
pub trait MethodStage {
    fn visit_insn(&mut self, insn: Insn, sink: &mut dyn InsnSink);

    /// Called once after the last instruction
    fn visit_end(&mut self, _sink: &mut dyn InsnSink) {}
}

/// Stage forwarding everything unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl MethodStage for PassThrough {
    fn visit_insn(&mut self, insn: Insn, sink: &mut dyn InsnSink) {
        sink.emit(insn);
    }
}

/// Drive a single stage over a body
pub fn run_stage<I>(stage: &mut dyn MethodStage, body: I) -> Vec<Insn>
where
    I: IntoIterator<Item = Insn>,
{
    let mut out = Vec::new();
    for insn in body {
        stage.visit_insn(insn, &mut out);
    }
    stage.visit_end(&mut out);
    out
}

/// Ordered stages; the output of each feeds the next
#[derive(Default)]
pub struct Pipeline<'a> {
    stages: Vec<Box<dyn MethodStage + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, stage: impl MethodStage + 'a) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run<I>(&mut self, body: I) -> Vec<Insn>
    where
        I: IntoIterator<Item = Insn>,
    {
        let mut current: Vec<Insn> = body.into_iter().collect();
        for stage in self.stages.iter_mut() {
            current = run_stage(stage.as_mut(), current);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::opcodes;

    struct DropNops;

    impl MethodStage for DropNops {
        fn visit_insn(&mut self, insn: Insn, sink: &mut dyn InsnSink) {
            if insn != Insn::simple(opcodes::NOP) {
                sink.emit(insn);
            }
        }
    }

    struct AppendReturn;

    impl MethodStage for AppendReturn {
        fn visit_insn(&mut self, insn: Insn, sink: &mut dyn InsnSink) {
            sink.emit(insn);
        }

        fn visit_end(&mut self, sink: &mut dyn InsnSink) {
            sink.emit(Insn::simple(opcodes::RETURN));
        }
    }

    #[test]
    fn test_pass_through_preserves_body() {
        let body = vec![Insn::simple(opcodes::ICONST_0), Insn::simple(opcodes::POP)];
        assert_eq!(run_stage(&mut PassThrough, body.clone()), body);
    }

    #[test]
    fn test_pipeline_chains_stages() {
        let body = vec![
            Insn::simple(opcodes::NOP),
            Insn::simple(opcodes::ICONST_1),
            Insn::simple(opcodes::NOP),
            Insn::simple(opcodes::POP),
        ];
        let mut pipeline = Pipeline::new().with_stage(DropNops).with_stage(AppendReturn);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(
            pipeline.run(body),
            vec![
                Insn::simple(opcodes::ICONST_1),
                Insn::simple(opcodes::POP),
                Insn::simple(opcodes::RETURN),
            ]
        );
    }

    #[test]
    fn test_empty_pipeline() {
        let mut pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.run(Vec::new()).is_empty());
    }
}
