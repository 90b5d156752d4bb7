//! Standard call-removal mutators and the call sites each one accepts

use super::{is_constructor, is_void};
use crate::common::error::Error;
use std::fmt;
use std::str::FromStr;

/// Which call sites a call-removal pass may remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutatorKind {
    /// Every call
    AllCalls,
    /// Calls to void methods, constructors excluded
    VoidCalls,
    /// Calls returning a value
    NonVoidCalls,
    /// Constructor calls
    ConstructorCalls,
}

impl MutatorKind {
    pub const ALL: [MutatorKind; 4] = [
        MutatorKind::AllCalls,
        MutatorKind::VoidCalls,
        MutatorKind::NonVoidCalls,
        MutatorKind::ConstructorCalls,
    ];

    /// Name recorded in mutation identifiers
    pub fn name(self) -> &'static str {
        match self {
            MutatorKind::AllCalls => "METHOD_CALLS",
            MutatorKind::VoidCalls => "VOID_METHOD_CALLS",
            MutatorKind::NonVoidCalls => "NON_VOID_METHOD_CALLS",
            MutatorKind::ConstructorCalls => "CONSTRUCTOR_CALLS",
        }
    }

    /// Inclusion predicate over (method name, descriptor)
    pub fn accepts(self, name: &str, descriptor: &str) -> bool {
        match self {
            MutatorKind::AllCalls => true,
            MutatorKind::VoidCalls => !is_constructor(name) && is_void(descriptor),
            MutatorKind::NonVoidCalls => !is_void(descriptor),
            MutatorKind::ConstructorCalls => is_constructor(name),
        }
    }

    /// The predicate as a closure, for stages taking any `Fn(&str, &str) -> bool`
    pub fn filter(self) -> impl Fn(&str, &str) -> bool {
        move |name, descriptor| self.accepts(name, descriptor)
    }
}

impl fmt::Display for MutatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MutatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        MutatorKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::UnknownMutator { name: s.to_string() })
    }
}
