// Shared names and environment keys

// JVM name of every instance initializer
pub const CONSTRUCTOR_NAME: &str = "<init>";

// Root superclass used when a class declares none
pub const JAVA_LANG_OBJECT: &str = "java/lang/Object";

// Prefix of every description produced by the call-removal mutator
pub const REMOVED_CALL_PREFIX: &str = "removed call to";

// Environment overrides read by Config::from_env
pub const ENV_MUTATOR: &str = "TOLMUT_MUTATOR";
pub const ENV_TARGET: &str = "TOLMUT_TARGET";
