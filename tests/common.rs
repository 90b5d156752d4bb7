// Common test utilities
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use tolmut::mutate::{Location, MutationContext, MutationIdentifier};
use tolmut::{ClassInfo, MethodInfo};

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// An ordinary instance method `com/example/Foo.run()V`
pub fn plain_method() -> MethodInfo {
    MethodInfo::new(ClassInfo::extending_object("com/example/Foo"), "run", "()V")
}

/// The no-arg constructor of `com/example/Foo extends com/example/Base`
pub fn constructor() -> MethodInfo {
    MethodInfo::new(
        ClassInfo::new("com/example/Foo", "com/example/Base"),
        "<init>",
        "()V",
    )
}

/// Registry recording every call made on it; activates a fixed set of indices
#[derive(Default)]
pub struct RecordingContext {
    pub registered: Vec<(String, String)>,
    pub activate: Vec<usize>,
    pub queries: Cell<usize>,
}

impl RecordingContext {
    pub fn activating(indices: &[usize]) -> Self {
        Self {
            activate: indices.to_vec(),
            ..Self::default()
        }
    }
}

impl MutationContext for RecordingContext {
    fn register_mutation(&mut self, mutator: &str, description: &str) -> MutationIdentifier {
        let index = self.registered.len();
        self.registered.push((mutator.to_string(), description.to_string()));
        MutationIdentifier {
            location: Location {
                class_name: "com/example/Foo".to_string(),
                method_name: "run".to_string(),
                method_descriptor: "()V".to_string(),
            },
            index,
            mutator: mutator.to_string(),
        }
    }

    fn should_mutate(&self, id: &MutationIdentifier) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.activate.contains(&id.index)
    }
}

/// Predicate that accepts everything and counts its invocations
pub fn counting_filter(counter: Rc<Cell<usize>>) -> impl Fn(&str, &str) -> bool {
    move |_, _| {
        counter.set(counter.get() + 1);
        true
    }
}
