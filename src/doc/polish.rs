//! Turns raw generated text into a docstring literal ready for insertion.

use crate::error::{DocError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Indentation added per nesting level.
pub const INDENT_UNIT: &str = "    ";

const QUOTES: &str = "\"\"\"";

static FENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[\w+.-]*[ \t]*$\n?").expect("valid fence pattern"));
static LABEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\A[ \t]*docstring[ \t]*:[ \t]*\n?").expect("valid label pattern"));

/// Polishes `raw` for a body at `depth` using [`INDENT_UNIT`].
pub fn polish(raw: &str, depth: usize) -> Result<String> {
    polish_with_indent(raw, depth, INDENT_UNIT)
}

/// Normalizes generated text into a triple-double-quoted literal and indents
/// every line by `indent_unit` repeated `depth` times. Text holding a
/// backslash becomes a raw `r"""` literal.
///
/// Not idempotent: polishing already polished text may nest quote markers.
pub fn polish_with_indent(raw: &str, depth: usize, indent_unit: &str) -> Result<String> {
    let text = raw.replace("\r\n", "\n");
    let text = text.trim().replace("'''", QUOTES);
    let text = FENCE_LINE.replace_all(&text, "");
    let text = LABEL_LINE.replace(&text, "");
    let text = text.trim();

    if text.is_empty() {
        return Err(DocError::render_error("generated text is empty"));
    }

    let text = match text.strip_prefix(|c: char| c == 'r' || c == 'R') {
        Some(rest) if rest.starts_with(QUOTES) => rest,
        _ => text,
    };

    let literal = if text.starts_with(QUOTES) {
        text.to_string()
    } else if text.contains('\n') {
        format!("{}\n{}\n{}", QUOTES, text, QUOTES)
    } else {
        format!("{}{}{}", QUOTES, text, QUOTES)
    };
    validate(&literal)?;

    // Raw, so `\u` and `\x` in generated text are not read as escapes.
    let literal = if literal.contains('\\') {
        format!("r{}", literal)
    } else {
        literal
    };

    let indent = indent_unit.repeat(depth);
    let lines: Vec<String> = literal
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect();

    Ok(lines.join("\n"))
}

/// Rejects text that would not form exactly one string literal.
fn validate(literal: &str) -> Result<()> {
    let inner = match literal
        .strip_prefix(QUOTES)
        .and_then(|rest| rest.strip_suffix(QUOTES))
    {
        Some(inner) => inner,
        None => {
            return Err(DocError::render_error(
                "docstring is not closed by a triple quote",
            ))
        }
    };

    if inner.contains(QUOTES) {
        return Err(DocError::render_error(
            "docstring contains text after its closing quotes",
        ));
    }
    if inner.ends_with('"') {
        return Err(DocError::render_error(
            "docstring ends with a quote that would merge with the closing quotes",
        ));
    }
    let backslashes = inner.chars().rev().take_while(|c| *c == '\\').count();
    if backslashes % 2 == 1 {
        return Err(DocError::render_error(
            "docstring ends with a backslash that escapes the closing quotes",
        ));
    }

    Ok(())
}
