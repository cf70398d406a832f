//! Variable engine
//!
//! Per-document state machine: values, derived values and validation, with
//! defaults (including profile-sourced ones) and conditional visibility.

pub mod defaults;
pub mod engine;
pub mod regex_cache;
pub mod validation;
pub mod visibility;

pub use engine::{VariableEngine, VariableEngineResult};
pub use regex_cache::{is_safe_pattern, RegexCache};
pub use validation::validate_variable;
pub use visibility::evaluate_condition;
