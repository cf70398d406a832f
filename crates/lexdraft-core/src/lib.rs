// Core modules
pub mod cascade;
pub mod config;
pub mod derive;
pub mod error;
pub mod model;
pub mod numbering;
pub mod template;
pub mod variables;

// Re-export commonly used types
pub use error::{LexdraftError, Result};
