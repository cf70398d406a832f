//! Backslash escaping of placeholders

use super::helpers::simple_context;
use super::*;

#[test]
fn test_single_backslash_escapes() {
    let context = simple_context();
    assert_eq!(render("\\{{title}}", &context).unwrap(), "{{title}}");
}

#[test]
fn test_double_backslash_renders_literal_backslash() {
    let context = simple_context();
    assert_eq!(render("\\\\{{title}}", &context).unwrap(), "\\Notice of Motion");
}

#[test]
fn test_triple_backslash_escapes_with_backslash() {
    let context = simple_context();
    assert_eq!(render("\\\\\\{{title}}", &context).unwrap(), "\\{{title}}");
}

#[test]
fn test_escaped_block_is_literal() {
    let context = simple_context();
    assert_eq!(
        render("\\{{#if urgent}}x\\{{/if}}", &context).unwrap(),
        "{{#if urgent}}x{{/if}}"
    );
}

#[test]
fn test_backslashes_elsewhere_untouched() {
    let context = simple_context();
    assert_eq!(
        render("C:\\files\\{{title}}", &context).unwrap(),
        "C:\\files{{title}}"
    );
    assert_eq!(render("a\\b {{count}}", &context).unwrap(), "a\\b 3");
}
