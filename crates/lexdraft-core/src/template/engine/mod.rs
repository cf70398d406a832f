//! Template engine implementation

mod blocks;
mod dates;
mod expr;
mod helpers;
mod numbering;
mod tokenize;

use std::num::NonZeroUsize;
use std::rc::Rc;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::RenderConfig;
use crate::model::{is_empty_value, TemplateDefinition};
use crate::numbering::ListPreset;
use crate::template::error::TemplateError;

use blocks::{collect_paths, parse_template, Block, Node};
use expr::Expr;
use helpers::{call_helper, is_truthy, resolve_key, stringify_value, HelperEnv};
use numbering::{ListKind, NumberingState};

/// Check if rendering has exceeded the timeout
fn check_timeout(start: Instant, max_duration: Duration) -> Result<(), TemplateError> {
    let elapsed = start.elapsed();
    if elapsed >= max_duration {
        return Err(TemplateError::Timeout {
            max_duration,
            elapsed,
        });
    }
    Ok(())
}

/// A parsed template body
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    source: String,
    nodes: Vec<Node>,
    content_controls: Vec<String>,
}

impl CompiledTemplate {
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let nodes = parse_template(source)?;
        let content_controls = collect_paths(&nodes);
        Ok(Self {
            source: source.to_string(),
            nodes,
            content_controls,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct context paths the template reads, in first-use order
    pub fn content_controls(&self) -> &[String] {
        &self.content_controls
    }
}

/// Outcome of a render; failures are reported here, never raised
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRenderResult {
    pub success: bool,
    pub content: String,
    pub content_controls: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// `<w:numbering>` fragment when the template used multilevel lists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering_xml: Option<String>,
}

impl TemplateRenderResult {
    fn failure(err: &TemplateError, content_controls: Vec<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            content_controls,
            errors: vec![err.to_string()],
            numbering_xml: None,
        }
    }
}

/// Compiles templates once, caches them by id and renders them.
///
/// The cache is an LRU bounded by `render.template_cache_size`; a hit moves
/// the entry to the most recently used end. A cached entry whose source no
/// longer matches the requested body is recompiled in place.
pub struct TemplateRenderer {
    cache: LruCache<String, Rc<CompiledTemplate>>,
    config: RenderConfig,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            cache: LruCache::new(
                NonZeroUsize::new(config.template_cache_size).unwrap_or(NonZeroUsize::MIN),
            ),
            config: config.clone(),
        }
    }

    /// Compile `body` under `template_id`, reusing the cached parse when the
    /// source is unchanged
    pub fn compile(&mut self, template_id: &str, body: &str) -> Result<Rc<CompiledTemplate>, TemplateError> {
        if let Some(cached) = self.cache.get(template_id) {
            if cached.source() == body {
                return Ok(Rc::clone(cached));
            }
        }
        let compiled = Rc::new(CompiledTemplate::compile(body)?);
        if let Some((evicted, _)) = self.cache.push(template_id.to_string(), Rc::clone(&compiled)) {
            if evicted != template_id {
                tracing::debug!(template = %evicted, "evicted compiled template");
            }
        }
        Ok(compiled)
    }

    pub fn render(&mut self, template: &TemplateDefinition, context: &Value) -> TemplateRenderResult {
        self.render_with_mode(template, context, false)
    }

    /// Render with `[path]` markers in place of missing or empty values
    pub fn render_preview(&mut self, template: &TemplateDefinition, context: &Value) -> TemplateRenderResult {
        let preview = self.config.preview_placeholders;
        self.render_with_mode(template, context, preview)
    }

    fn render_with_mode(&mut self, template: &TemplateDefinition, context: &Value, preview: bool) -> TemplateRenderResult {
        let compiled = match self.compile(&template.id, &template.body) {
            Ok(compiled) => compiled,
            Err(err) => {
                tracing::warn!(template = %template.id, error = %err, "template compilation failed");
                return TemplateRenderResult::failure(&err, Vec::new());
            }
        };

        let controls = compiled.content_controls().to_vec();
        match self.execute(&compiled, context, preview) {
            Ok((content, numbering_xml)) => TemplateRenderResult {
                success: true,
                content,
                content_controls: controls,
                errors: Vec::new(),
                numbering_xml,
            },
            Err(err) => {
                tracing::warn!(template = %template.id, error = %err, "template rendering failed");
                TemplateRenderResult::failure(&err, controls)
            }
        }
    }

    /// Run a compiled template against `context`
    pub fn execute(
        &self,
        compiled: &CompiledTemplate,
        context: &Value,
        preview: bool,
    ) -> Result<(String, Option<String>), TemplateError> {
        let mut renderer = Renderer {
            root: context,
            frames: vec![Frame::new(context.clone())],
            numbering: NumberingState::default(),
            preview,
            strict: self.config.strict_variables,
            date_format: &self.config.default_date_format,
            start: Instant::now(),
            timeout: Duration::from_millis(self.config.timeout_ms),
        };
        let mut output = String::new();
        renderer.render_nodes(&compiled.nodes, &mut output)?;
        let numbering_xml = renderer.numbering.numbering_xml(1)?;
        Ok((output, numbering_xml))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_cached(&self, template_id: &str) -> bool {
        self.cache.contains(template_id)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("cached", &self.cache.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Convenience function: compile and render `template` without caching
pub fn render(template: &str, context: &Value) -> Result<String, TemplateError> {
    let compiled = CompiledTemplate::compile(template)?;
    TemplateRenderer::new()
        .execute(&compiled, context, false)
        .map(|(content, _)| content)
}

/// One level of scope: the `this` value plus block-local names
struct Frame {
    value: Value,
    locals: Map<String, Value>,
}

impl Frame {
    fn new(value: Value) -> Self {
        Self {
            value,
            locals: Map::new(),
        }
    }
}

struct Renderer<'a> {
    root: &'a Value,
    frames: Vec<Frame>,
    numbering: NumberingState,
    preview: bool,
    strict: bool,
    date_format: &'a str,
    start: Instant,
    timeout: Duration,
}

impl Renderer<'_> {
    fn render_nodes(&mut self, nodes: &[Node], output: &mut String) -> Result<(), TemplateError> {
        for node in nodes {
            check_timeout(self.start, self.timeout)?;
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Output { expr, source, line } => self.render_output(expr, source, *line, output)?,
                Node::Block(block) => self.render_block(block, output)?,
            }
        }
        Ok(())
    }

    fn render_output(&mut self, expr: &Expr, source: &str, line: usize, output: &mut String) -> Result<(), TemplateError> {
        if let Expr::Path(path) = expr {
            let value = self.lookup(path);
            let missing = value.as_ref().map_or(true, is_empty_value);
            if missing && self.preview {
                output.push('[');
                output.push_str(path);
                output.push(']');
                return Ok(());
            }
            return match value {
                Some(value) => {
                    output.push_str(&stringify_value(&value, path, line)?);
                    Ok(())
                }
                None if self.strict => Err(TemplateError::UndefinedKey {
                    key: path.clone(),
                    line,
                }),
                None => Ok(()),
            };
        }
        let value = self.evaluate(expr, line)?;
        output.push_str(&stringify_value(&value, source, line)?);
        Ok(())
    }

    /// Resolve a path through the scope stack, innermost first
    fn lookup(&self, path: &str) -> Option<Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let base = if head == "this" {
            self.frames.last().map(|frame| &frame.value)
        } else {
            self.frames.iter().rev().find_map(|frame| {
                frame
                    .locals
                    .get(head)
                    .or_else(|| frame.value.as_object().and_then(|map| map.get(head)))
            })
        }?;
        match rest {
            Some(rest) => resolve_key(base, rest).cloned(),
            None => Some(base.clone()),
        }
    }

    fn evaluate(&mut self, expr: &Expr, line: usize) -> Result<Value, TemplateError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Path(path) => match self.lookup(path) {
                Some(value) => Ok(value),
                None if self.strict => Err(TemplateError::UndefinedKey {
                    key: path.clone(),
                    line,
                }),
                None => Ok(Value::Null),
            },
            Expr::Call { name, args } => {
                // A bare `{{last}}` reads a variable named `last` when one is in scope
                if args.is_empty() {
                    if let Some(value) = self.lookup(name) {
                        return Ok(value);
                    }
                }
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg, line))
                    .collect::<Result<Vec<_>, _>>()?;
                if name == "numbering" {
                    let level = level_argument(name, args.first(), line)?;
                    return self.numbering.current_number(level, line).map(Value::String);
                }
                let env = HelperEnv {
                    root: self.root,
                    default_date_format: self.date_format,
                };
                call_helper(name, &args, &env, line)
            }
        }
    }

    fn render_block(&mut self, block: &Block, output: &mut String) -> Result<(), TemplateError> {
        let line = block.line;
        let args = block
            .args
            .iter()
            .map(|arg| self.evaluate(arg, line))
            .collect::<Result<Vec<_>, _>>()?;

        match block.name.as_str() {
            "if" | "unless" => {
                let condition = args.first().is_some_and(is_truthy);
                let branch = if condition == (block.name == "if") {
                    &block.body
                } else {
                    &block.inverse
                };
                self.render_nodes(branch, output)
            }
            "with" => {
                let value = args.into_iter().next().unwrap_or(Value::Null);
                if !is_truthy(&value) {
                    return self.render_nodes(&block.inverse, output);
                }
                let mut frame = Frame::new(value.clone());
                if let Some(binding) = &block.binding {
                    frame.locals.insert(binding.clone(), value);
                }
                self.with_frame(frame, &block.body, output)
            }
            "each" => self.render_each(block, args.into_iter().next(), output),
            "multilevel" => {
                let preset = match args.first() {
                    Some(Value::String(name)) => name.parse::<ListPreset>().map_err(|err| {
                        TemplateError::HelperArgument {
                            helper: block.name.clone(),
                            message: err.to_string(),
                            line,
                        }
                    })?,
                    _ => ListPreset::Legal,
                };
                let previous = self.numbering.begin_multilevel(preset, line)?;
                let result = self.render_nodes(&block.body, output);
                self.numbering.end_multilevel(previous);
                result
            }
            "level" => {
                let level = level_argument(&block.name, args.first(), line)?;
                let (num_id, ilvl, prefix) = self.numbering.next_level(level, line)?;
                let mut content = String::new();
                self.render_nodes(&block.body, &mut content)?;
                output.push_str(&format!(
                    "<p data-num-id=\"{}\" data-ilvl=\"{}\">{} {}</p>",
                    num_id,
                    ilvl,
                    prefix,
                    content.trim()
                ));
                Ok(())
            }
            "numbered" | "bulleted" => {
                let kind = if block.name == "numbered" {
                    ListKind::Numbered
                } else {
                    ListKind::Bulleted
                };
                let start = args.first().and_then(Value::as_i64).unwrap_or(1);
                self.numbering.begin_list(kind, start);
                let result = self.render_nodes(&block.body, output);
                self.numbering.end_list();
                result
            }
            "item" => {
                let marker = self.numbering.next_item(line)?;
                let mut content = String::new();
                self.render_nodes(&block.body, &mut content)?;
                output.push_str(&marker);
                output.push(' ');
                output.push_str(content.trim());
                output.push('\n');
                Ok(())
            }
            other => Err(TemplateError::UnknownHelper {
                name: other.to_string(),
                line,
            }),
        }
    }

    fn render_each(&mut self, block: &Block, source: Option<Value>, output: &mut String) -> Result<(), TemplateError> {
        let entries: Vec<(Option<String>, Value)> = match source {
            Some(Value::Array(items)) => items.into_iter().map(|item| (None, item)).collect(),
            Some(Value::Object(map)) => map.into_iter().map(|(key, value)| (Some(key), value)).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(TemplateError::HelperArgument {
                    helper: "each".to_string(),
                    message: "expected an array or object".to_string(),
                    line: block.line,
                })
            }
        };
        if entries.is_empty() {
            return self.render_nodes(&block.inverse, output);
        }

        let count = entries.len();
        for (index, (key, item)) in entries.into_iter().enumerate() {
            let mut frame = Frame::new(item.clone());
            frame.locals.insert("@index".to_string(), Value::from(index));
            frame.locals.insert("@first".to_string(), Value::Bool(index == 0));
            frame.locals.insert("@last".to_string(), Value::Bool(index + 1 == count));
            if let Some(key) = key {
                frame.locals.insert("@key".to_string(), Value::String(key));
            }
            if let Some(binding) = &block.binding {
                frame.locals.insert(binding.clone(), item);
            }
            self.with_frame(frame, &block.body, output)?;
        }
        Ok(())
    }

    fn with_frame(&mut self, frame: Frame, nodes: &[Node], output: &mut String) -> Result<(), TemplateError> {
        self.frames.push(frame);
        let result = self.render_nodes(nodes, output);
        self.frames.pop();
        result
    }
}

/// 1-based display level from a helper argument
fn level_argument(helper: &str, value: Option<&Value>, line: usize) -> Result<i64, TemplateError> {
    match value {
        None => Ok(1),
        Some(value) => crate::variables::validation::as_number(value)
            .map(|n| n as i64)
            .ok_or_else(|| TemplateError::HelperArgument {
                helper: helper.to_string(),
                message: format!("expected a level number, got {}", value),
                line,
            }),
    }
}

#[cfg(test)]
mod tests;
