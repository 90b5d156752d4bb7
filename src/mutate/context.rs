//! Mutation identifiers and the registry that issues them

use super::{ClassInfo, MethodInfo};
use std::fmt;

/// Method in which a mutation occurs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub class_name: String,
    pub method_name: String,
    pub method_descriptor: String,
}

impl Location {
    pub fn of_method(method: &MethodInfo) -> Self {
        Self {
            class_name: method.class.name.clone(),
            method_name: method.name.clone(),
            method_descriptor: method.descriptor.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}{}", self.class_name, self.method_name, self.method_descriptor)
    }
}

/// Stable identity of one mutation occurrence
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutationIdentifier {
    pub location: Location,
    /// Position among all occurrences registered for the class
    pub index: usize,
    /// Name of the mutator that found the occurrence
    pub mutator: String,
}

impl fmt::Display for MutationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} [{}]", self.location, self.index, self.mutator)
    }
}

/// A registered occurrence and its human-readable description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationDetails {
    pub id: MutationIdentifier,
    pub description: String,
}

impl fmt::Display for MutationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.description)
    }
}

/// Registry consulted by mutating stages.
///
/// Every eligible occurrence is registered, whether or not it is applied, so
/// identifiers stay the same from one analysis of a method to the next.
pub trait MutationContext {
    fn register_mutation(&mut self, mutator: &str, description: &str) -> MutationIdentifier;

    fn should_mutate(&self, id: &MutationIdentifier) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Index(usize),
    Id(MutationIdentifier),
}

/// Registry for the methods of one class
#[derive(Debug, Clone)]
pub struct ClassContext {
    class: ClassInfo,
    location: Location,
    next_index: usize,
    mutations: Vec<MutationDetails>,
    target: Option<Target>,
}

impl ClassContext {
    /// A registry that records occurrences but activates none
    pub fn new(class: ClassInfo) -> Self {
        let location = Location {
            class_name: class.name.clone(),
            method_name: String::new(),
            method_descriptor: String::new(),
        };
        Self {
            class,
            location,
            next_index: 0,
            mutations: Vec::new(),
            target: None,
        }
    }

    /// Activate the occurrence registered with this index
    pub fn with_target_index(mut self, index: usize) -> Self {
        self.target = Some(Target::Index(index));
        self
    }

    /// Activate exactly this occurrence
    pub fn with_target(mut self, id: MutationIdentifier) -> Self {
        self.target = Some(Target::Id(id));
        self
    }

    /// Start registering occurrences for `method`
    pub fn enter_method(&mut self, method: &MethodInfo) {
        if method.class.name != self.class.name {
            log::warn!(
                "entering method {}{} of {} in context for {}",
                method.name,
                method.descriptor,
                method.class.name,
                self.class.name
            );
        }
        self.location = Location::of_method(method);
    }

    /// All occurrences registered so far, in registration order
    pub fn mutations(&self) -> &[MutationDetails] {
        &self.mutations
    }

    pub fn into_mutations(self) -> Vec<MutationDetails> {
        self.mutations
    }

    /// Identifier of the activated occurrence, once it has been registered
    pub fn target(&self) -> Option<&MutationIdentifier> {
        self.mutations
            .iter()
            .map(|details| &details.id)
            .find(|id| self.should_mutate(id))
    }
}

impl MutationContext for ClassContext {
    fn register_mutation(&mut self, mutator: &str, description: &str) -> MutationIdentifier {
        let id = MutationIdentifier {
            location: self.location.clone(),
            index: self.next_index,
            mutator: mutator.to_string(),
        };
        self.next_index += 1;
        log::trace!("registered {} ({})", id, description);
        self.mutations.push(MutationDetails {
            id: id.clone(),
            description: description.to_string(),
        });
        id
    }

    fn should_mutate(&self, id: &MutationIdentifier) -> bool {
        match &self.target {
            Some(Target::Index(index)) => id.index == *index,
            Some(Target::Id(target)) => target == id,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> MethodInfo {
        MethodInfo::new(ClassInfo::extending_object("com/example/Foo"), name, "()V")
    }

    #[test]
    fn test_indices_increase_across_methods() {
        let mut ctx = ClassContext::new(ClassInfo::extending_object("com/example/Foo"));
        ctx.enter_method(&method("a"));
        let first = ctx.register_mutation("METHOD_CALLS", "removed call to x::y");
        ctx.enter_method(&method("b"));
        let second = ctx.register_mutation("METHOD_CALLS", "removed call to x::z");

        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(first.location.method_name, "a");
        assert_eq!(second.location.method_name, "b");
        assert_eq!(ctx.mutations().len(), 2);
        assert_eq!(ctx.mutations()[1].description, "removed call to x::z");
    }

    #[test]
    fn test_no_target_activates_nothing() {
        let mut ctx = ClassContext::new(ClassInfo::extending_object("p/A"));
        let id = ctx.register_mutation("M", "d");
        assert!(!ctx.should_mutate(&id));
        assert_eq!(ctx.target(), None);
    }

    #[test]
    fn test_target_by_index() {
        let mut ctx = ClassContext::new(ClassInfo::extending_object("p/A")).with_target_index(1);
        ctx.enter_method(&method("run"));
        let a = ctx.register_mutation("M", "first");
        let b = ctx.register_mutation("M", "second");
        assert!(!ctx.should_mutate(&a));
        assert!(ctx.should_mutate(&b));
        assert_eq!(ctx.target(), Some(&b));
    }

    #[test]
    fn test_target_by_identifier_is_stable_between_runs() {
        let class = ClassInfo::extending_object("com/example/Foo");
        let mut first_run = ClassContext::new(class.clone());
        first_run.enter_method(&method("run"));
        first_run.register_mutation("M", "one");
        let wanted = first_run.register_mutation("M", "two");

        let mut second_run = ClassContext::new(class).with_target(wanted.clone());
        second_run.enter_method(&method("run"));
        let a = second_run.register_mutation("M", "one");
        let b = second_run.register_mutation("M", "two");
        assert!(!second_run.should_mutate(&a));
        assert!(second_run.should_mutate(&b));
        assert_eq!(b, wanted);
    }

    #[test]
    fn test_display() {
        let mut ctx = ClassContext::new(ClassInfo::extending_object("com/example/Foo"));
        ctx.enter_method(&method("run"));
        let id = ctx.register_mutation("METHOD_CALLS", "removed call to p/B::go");
        assert_eq!(id.to_string(), "com/example/Foo::run()V #0 [METHOD_CALLS]");
        assert_eq!(
            ctx.mutations()[0].to_string(),
            "com/example/Foo::run()V #0 [METHOD_CALLS]: removed call to p/B::go"
        );
    }

    #[test]
    fn test_foreign_method_is_located_by_its_own_class() {
        let mut ctx = ClassContext::new(ClassInfo::extending_object("p/A"));
        ctx.enter_method(&method("run"));
        let id = ctx.register_mutation("METHOD_CALLS", "removed call to p/B::go");
        assert_eq!(id.location.class_name, "com/example/Foo");
        assert_eq!(id.index, 0);
    }
}
