//! Template rendering for document bodies
//!
//! Bodies use a handlebars-like syntax:
//!
//! - `{{client.name}}` inserts a value; arrays are joined with ", "
//! - `{{upper client.name}}`, `{{formatDate filed "MM/DD/YYYY"}}` call inline helpers,
//!   and `(helper ...)` nests a call as an argument
//! - `{{#if ...}}`, `{{#unless ...}}`, `{{#each ... |item|}}` and `{{#with ...}}`
//!   take an optional `{{else}}` branch
//! - `{{#multilevel "legal"}}{{#level 1}}...{{/level}}{{/multilevel}}` emits
//!   numbered paragraphs and collects a `<w:numbering>` part for them
//! - `{{#numbered}}`/`{{#bulleted}}` with `{{#item}}` produce plain-text lists
//! - `\{{` keeps a placeholder literal
//!
//! Compiled templates are cached by template id in an LRU.

pub mod engine;
pub mod error;

pub use engine::{render, CompiledTemplate, TemplateRenderResult, TemplateRenderer};
pub use error::TemplateError;
