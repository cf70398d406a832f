//! Block structure: turns the token stream into a node tree
//!
//! Blocks nest through an explicit stack, so a `{{/name}}` always closes the
//! innermost open block and mismatches are reported with their line.

use crate::template::error::TemplateError;

use super::expr::{parse_arguments, parse_expression, Expr};
use super::tokenize::{TokenKind, TokenStream};

/// Block helpers understood by the renderer
pub(crate) const BLOCK_HELPERS: [&str; 9] = [
    "if",
    "unless",
    "each",
    "with",
    "multilevel",
    "level",
    "numbered",
    "bulleted",
    "item",
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Output { expr: Expr, source: String, line: usize },
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Block {
    pub name: String,
    pub args: Vec<Expr>,
    /// `|name|` after the arguments
    pub binding: Option<String>,
    pub body: Vec<Node>,
    /// Nodes after `{{else}}`
    pub inverse: Vec<Node>,
    pub line: usize,
}

struct OpenBlock {
    block: Block,
    in_inverse: bool,
}

/// Parse a template body into nodes
pub(crate) fn parse_template(text: &str) -> Result<Vec<Node>, TemplateError> {
    let mut tokens = TokenStream::new(text);
    let mut root = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut last = 0;

    for token in tokens.by_ref() {
        let preceding = &text[last..token.start];
        let kept = preceding.len() - token.backslash_count;
        push_text(target(&mut root, &mut stack), &preceding[..kept]);
        push_text(
            target(&mut root, &mut stack),
            &"\\".repeat(token.backslash_count / 2),
        );
        last = token.end();

        if token.is_escaped() {
            push_text(target(&mut root, &mut stack), &text[token.start..token.end()]);
            continue;
        }

        let line = token.line;
        match token.kind {
            TokenKind::Expression { source } => {
                let expr = parse_expression(&source, line)?;
                target(&mut root, &mut stack).push(Node::Output { expr, source, line });
            }
            TokenKind::BlockStart { keyword, args } => {
                if !BLOCK_HELPERS.contains(&keyword.as_str()) {
                    return Err(TemplateError::UnknownHelper { name: keyword, line });
                }
                let (args, binding) = split_binding(&args, line)?;
                stack.push(OpenBlock {
                    block: Block {
                        name: keyword,
                        args: parse_arguments(args, line)?,
                        binding,
                        body: Vec::new(),
                        inverse: Vec::new(),
                        line,
                    },
                    in_inverse: false,
                });
            }
            TokenKind::Else => match stack.last_mut() {
                Some(open) if !open.in_inverse => open.in_inverse = true,
                Some(_) => {
                    return Err(TemplateError::MalformedSyntax {
                        message: "Duplicate {{else}} in block".to_string(),
                        line,
                    })
                }
                None => {
                    return Err(TemplateError::MalformedSyntax {
                        message: "{{else}} outside of a block".to_string(),
                        line,
                    })
                }
            },
            TokenKind::BlockEnd { keyword } => match stack.pop() {
                Some(open) if open.block.name == keyword => {
                    target(&mut root, &mut stack).push(Node::Block(open.block));
                }
                _ => return Err(TemplateError::UnexpectedBlockEnd { name: keyword, line }),
            },
        }
    }

    let trailing = &text[last..];
    if trailing.contains("{{") {
        return Err(TemplateError::MalformedSyntax {
            message: "Unclosed placeholder".to_string(),
            line: tokens.line(),
        });
    }
    push_text(target(&mut root, &mut stack), trailing);

    if let Some(open) = stack.pop() {
        return Err(TemplateError::UnclosedBlock {
            name: open.block.name,
            line: open.block.line,
        });
    }
    Ok(root)
}

fn target<'a>(root: &'a mut Vec<Node>, stack: &'a mut [OpenBlock]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(open) if open.in_inverse => &mut open.block.inverse,
        Some(open) => &mut open.block.body,
        None => root,
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(existing)) = nodes.last_mut() {
        existing.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Split `items |item|` into (`items`, Some("item"))
fn split_binding(args: &str, line: usize) -> Result<(&str, Option<String>), TemplateError> {
    let Some(pipe) = args.find('|') else {
        return Ok((args, None));
    };
    let rest = &args[pipe + 1..];
    let close = rest.find('|').ok_or_else(|| TemplateError::MalformedSyntax {
        message: format!("Invalid block syntax: unclosed |var| in '{}'", args),
        line,
    })?;
    let name = rest[..close].trim();
    if name.is_empty() || !rest[close + 1..].trim().is_empty() {
        return Err(TemplateError::MalformedSyntax {
            message: format!("Invalid block syntax: expected |var| at the end of '{}'", args),
            line,
        });
    }
    Ok((args[..pipe].trim(), Some(name.to_string())))
}

/// Context paths read by the template, in first-use order, excluding
/// `this`, `@` data variables and block bindings
pub(crate) fn collect_paths(nodes: &[Node]) -> Vec<String> {
    fn walk(nodes: &[Node], bindings: &mut Vec<String>, out: &mut Vec<String>) {
        for node in nodes {
            match node {
                Node::Text(_) => {}
                Node::Output { expr, .. } => add(expr, bindings, out),
                Node::Block(block) => {
                    block.args.iter().for_each(|arg| add(arg, bindings, out));
                    let bound = block.binding.is_some();
                    if let Some(binding) = &block.binding {
                        bindings.push(binding.clone());
                    }
                    walk(&block.body, bindings, out);
                    if bound {
                        bindings.pop();
                    }
                    walk(&block.inverse, bindings, out);
                }
            }
        }
    }

    fn add(expr: &Expr, bindings: &[String], out: &mut Vec<String>) {
        let mut paths = Vec::new();
        expr.paths(&mut paths);
        for path in paths {
            let head = path.split('.').next().unwrap_or(path);
            let local = head == "this" || head.starts_with('@') || bindings.iter().any(|b| b == head);
            if !local && !out.iter().any(|p| p == path) {
                out.push(path.to_string());
            }
        }
    }

    let mut out = Vec::new();
    walk(nodes, &mut Vec::new(), &mut out);
    out
}
