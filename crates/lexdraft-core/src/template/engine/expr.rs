//! Expressions inside `{{ ... }}`: paths, literals and helper calls

use serde_json::Value;

use crate::template::error::TemplateError;

use super::helpers::is_inline_helper;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// `name`, `client.address.city`, `this`, `@index`
    Path(String),
    Literal(Value),
    /// `helper arg ...`, or `(helper arg ...)` as an argument
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Every context path this expression reads
    pub fn paths<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Path(path) => out.push(path),
            Expr::Literal(_) => {}
            Expr::Call { args, .. } => args.iter().for_each(|arg| arg.paths(out)),
        }
    }
}

/// Parse a whole placeholder body
pub(crate) fn parse_expression(source: &str, line: usize) -> Result<Expr, TemplateError> {
    let mut terms = parse_terms(source, line)?;
    match terms.len() {
        0 => Err(TemplateError::MalformedSyntax {
            message: "Empty placeholder".to_string(),
            line,
        }),
        1 => Ok(match terms.remove(0) {
            Expr::Path(name) if is_inline_helper(&name) => Expr::Call {
                name,
                args: Vec::new(),
            },
            term => term,
        }),
        _ => call_from_terms(terms, line),
    }
}

/// Parse block arguments (no helper name in front)
pub(crate) fn parse_arguments(source: &str, line: usize) -> Result<Vec<Expr>, TemplateError> {
    parse_terms(source, line)
}

fn call_from_terms(mut terms: Vec<Expr>, line: usize) -> Result<Expr, TemplateError> {
    if terms.is_empty() {
        return Err(TemplateError::MalformedSyntax {
            message: "Empty subexpression".to_string(),
            line,
        });
    }
    let name = match terms.remove(0) {
        Expr::Path(name) => name,
        other => {
            return Err(TemplateError::MalformedSyntax {
                message: format!("Expected a helper name, found {:?}", other),
                line,
            })
        }
    };
    if !is_inline_helper(&name) {
        return Err(TemplateError::UnknownHelper { name, line });
    }
    Ok(Expr::Call { name, args: terms })
}

fn parse_terms(source: &str, line: usize) -> Result<Vec<Expr>, TemplateError> {
    let chars: Vec<char> = source.chars().collect();
    let mut pos = 0;
    parse_term_list(&chars, &mut pos, line, false)
}

fn parse_term_list(chars: &[char], pos: &mut usize, line: usize, nested: bool) -> Result<Vec<Expr>, TemplateError> {
    let mut terms = Vec::new();
    loop {
        while *pos < chars.len() && chars[*pos].is_whitespace() {
            *pos += 1;
        }
        let Some(&c) = chars.get(*pos) else {
            if nested {
                return Err(TemplateError::MalformedSyntax {
                    message: "Unclosed '(' in subexpression".to_string(),
                    line,
                });
            }
            return Ok(terms);
        };
        match c {
            ')' if nested => {
                *pos += 1;
                return Ok(terms);
            }
            ')' => {
                return Err(TemplateError::MalformedSyntax {
                    message: "Unexpected ')'".to_string(),
                    line,
                })
            }
            '(' => {
                *pos += 1;
                let inner = parse_term_list(chars, pos, line, true)?;
                terms.push(call_from_terms(inner, line)?);
            }
            '"' | '\'' => terms.push(Expr::Literal(Value::String(read_string(chars, pos, c, line)?))),
            _ => {
                let start = *pos;
                while *pos < chars.len() && !chars[*pos].is_whitespace() && !matches!(chars[*pos], '(' | ')') {
                    *pos += 1;
                }
                let word: String = chars[start..*pos].iter().collect();
                terms.push(word_to_expr(&word));
            }
        }
    }
}

fn read_string(chars: &[char], pos: &mut usize, quote: char, line: usize) -> Result<String, TemplateError> {
    *pos += 1;
    let mut out = String::new();
    while let Some(&c) = chars.get(*pos) {
        *pos += 1;
        match c {
            '\\' => {
                if let Some(&next) = chars.get(*pos) {
                    out.push(next);
                    *pos += 1;
                }
            }
            c if c == quote => return Ok(out),
            c => out.push(c),
        }
    }
    Err(TemplateError::MalformedSyntax {
        message: "Unterminated string literal".to_string(),
        line,
    })
}

fn word_to_expr(word: &str) -> Expr {
    match word {
        "true" => return Expr::Literal(Value::Bool(true)),
        "false" => return Expr::Literal(Value::Bool(false)),
        "null" => return Expr::Literal(Value::Null),
        _ => {}
    }
    if let Ok(n) = word.parse::<i64>() {
        return Expr::Literal(Value::from(n));
    }
    if word.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        if let Some(n) = word.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Expr::Literal(Value::Number(n));
        }
    }
    Expr::Path(word.to_string())
}
