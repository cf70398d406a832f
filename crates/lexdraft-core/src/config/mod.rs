//! Engine configuration (`lexdraft.toml`)

pub mod consts;
pub mod model;

pub use model::{CascadeConfig, EngineConfig, PartiesConfig, RenderConfig, ValidationConfig};
