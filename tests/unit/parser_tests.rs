use pretty_assertions::assert_eq;
use zero_docs::ast::{Codegen, Definition, Statement, Suite};
use zero_docs::{parse_module, DocError};

fn assert_round_trip(source: &str) {
    let module = parse_module(source).unwrap();
    assert_eq!(module.code(), source);
}

fn first_definition(source: &str) -> Definition {
    match parse_module(source).unwrap().body.into_iter().next() {
        Some(Statement::Definition(definition)) => definition,
        other => panic!("expected a definition, got {:?}", other),
    }
}

#[test]
fn test_round_trip_comments_and_blank_lines() {
    assert_round_trip(
        "# header\n\n\nimport os  # trailing\n\n\nclass A:\n\n    # before m\n    def m(self):\n# dedented comment\n        return 1\n\n    \n\n# footer\n",
    );
}

#[test]
fn test_round_trip_crlf() {
    assert_round_trip("def f():\r\n    # c\r\n    return 1\r\n\r\nx = [\r\n    1,\r\n]\r\n");
}

#[test]
fn test_round_trip_continuations_and_brackets() {
    assert_round_trip(
        "total = 1 + \\\n    2\nif (a and\n        b):\n    call(x,\n         y)\n",
    );
}

#[test]
fn test_round_trip_multiline_strings() {
    assert_round_trip(
        "def f():\n    text = \"\"\"\nfirst\n  second\n\"\"\"\n    raw = r'''\\d+:'''\n    return f\"{text!r:>{width}}\"\n",
    );
}

#[test]
fn test_round_trip_missing_final_newline() {
    assert_round_trip("def f():\n    return 1");
    assert_round_trip("x = 1\n# done");
}

#[test]
fn test_round_trip_empty_and_comment_only_files() {
    assert_round_trip("");
    assert_round_trip("\n\n");
    assert_round_trip("#!/usr/bin/env python\n# nothing here\n");
}

#[test]
fn test_round_trip_compound_statements() {
    assert_round_trip(
        "\
try:
    import ujson as json
except ImportError:  # fallback
    import json
else:
    pass
finally:
    done = True
match command.split():
    case [name, *rest]:
        pass
    case _:
        pass
async def main():
    async with session() as s:
        async for item in s: print(item)
while (n := n - 1) > 0: n -= 1
class E(Exception): pass
",
    );
}

#[test]
fn test_round_trip_tabs_and_semicolons() {
    assert_round_trip("if x:\n\ta = 1; b = 2\n\tif y:\n\t\tpass\n");
}

#[test]
fn test_multi_level_dedent() {
    let source = "class A:\n    def m(self):\n        if x:\n            pass\ny = 1\n";
    let module = parse_module(source).unwrap();
    assert_eq!(module.body.len(), 2);
    assert_eq!(module.code(), source);
}

#[test]
fn test_definition_source_text_excludes_leading_trivia() {
    let definition = first_definition("# about f\n\n@decorate\ndef f():\n    return 1\n");
    assert_eq!(definition.name, "f");
    assert_eq!(definition.source_text(), "@decorate\ndef f():\n    return 1\n");
}

#[test]
fn test_nested_definition_source_text_starts_at_column_zero() {
    let source = "class A:\n    # helper\n    @property\n    def m(self):\n        s = \"\"\"\ntext\n\"\"\"\n\n        return s\n";
    let class = first_definition(source);
    let method = match &class.suite {
        Suite::Indented(block) => match &block.body[0] {
            Statement::Definition(definition) => definition.clone(),
            other => panic!("expected a definition, got {:?}", other),
        },
        other => panic!("expected an indented block, got {:?}", other),
    };
    assert_eq!(
        method.source_text(),
        "@property\ndef m(self):\n    s = \"\"\"\ntext\n\"\"\"\n\n    return s\n"
    );
    assert_eq!(class.code(), source);
}

#[test]
fn test_round_trip_byte_order_mark() {
    let module = parse_module("\u{feff}# coding: utf-8\nimport os\n").unwrap();
    assert!(module.bom);
    assert_eq!(module.code(), "\u{feff}# coding: utf-8\nimport os\n");
    assert_eq!(module.source_text(), "# coding: utf-8\nimport os\n");

    assert!(!parse_module("import os\n").unwrap().bom);
    assert_round_trip("\u{feff}");
    assert_round_trip("\u{feff}def f():\r\n    return 1\r\n");
}

#[test]
fn test_docstring_detection() {
    assert!(first_definition("def f():\n    \"\"\"Doc.\"\"\"\n").has_docstring());
    assert!(first_definition("def f():\n    # note\n    'doc'\n").has_docstring());
    assert!(first_definition("def f():\n    (\"a\"\n     \"b\")\n").has_docstring());
    assert!(!first_definition("def f():\n    x = 1\n    \"late\"\n").has_docstring());
    assert!(!first_definition("def f():\n    f\"{x}\"\n").has_docstring());
    assert!(!first_definition("def f():\n    b'bytes'\n").has_docstring());

    assert!(parse_module("\"\"\"Module.\"\"\"\nx = 1\n").unwrap().has_docstring());
    assert!(!parse_module("x = 1\n\"\"\"Not first.\"\"\"\n").unwrap().has_docstring());
    assert!(parse_module("\u{feff}\"\"\"Module.\"\"\"\nx = 1\n").unwrap().has_docstring());
}

#[test]
fn test_inline_suite_is_recorded() {
    let definition = first_definition("def f(): return 1\n");
    assert!(matches!(definition.suite, Suite::Inline(_)));
}

fn parse_error(source: &str) -> (u32, u32, String) {
    match parse_module(source) {
        Err(DocError::Parse {
            line,
            column,
            message,
        }) => (line, column, message),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_errors() {
    let (line, column, message) = parse_error("x = 1\ns = \"open\n");
    assert_eq!((line, column), (2, 5));
    assert!(message.contains("unterminated"));

    let (line, _, message) = parse_error("items = [1,\n    2\n");
    assert_eq!(line, 1);
    assert!(message.contains("never closed"));

    let (line, _, message) = parse_error("if x:\n    a = 1\n  b = 2\n");
    assert_eq!(line, 3);
    assert!(message.contains("unindent"));

    let (line, _, message) = parse_error("def f():\n\nx = 1\n");
    assert_eq!(line, 3);
    assert_eq!(message, "expected an indented block after line 1");
}
