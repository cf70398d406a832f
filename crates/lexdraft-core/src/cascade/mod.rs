//! Cascade engine
//!
//! Given one or more variable changes, walks the dependency graph, refreshes
//! derived fields of typed variables and evaluates cascade expressions to
//! produce the next `(values, derived values)` pair.

pub mod engine;
pub mod expr;
pub mod graph;

pub use engine::{CascadeEngine, CascadeResult, CascadeState};
pub use expr::{lookup_path, Expression, Segment, BLOCKED_SEGMENTS};
pub use graph::{build_dependency_graph, get_processing_order, DependencyGraph};
