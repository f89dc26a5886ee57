use crate::{
    error::DocError,
    source_location::SourceLocation,
    token::{HeaderKeyword, Token, TokenKind},
    Result,
};
use nom::{
    bytes::complete::{take_while, take_while_m_n},
    combinator::recognize,
    sequence::pair,
    IResult,
};

const BLOCK_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "try", "except", "finally", "with",
];
const SOFT_KEYWORDS: &[&str] = &["match", "case"];
const STRING_PREFIXES: &[&str] = &[
    "r", "u", "b", "f", "t", "br", "rb", "fr", "rf", "tr", "rt",
];

/// Splits Python source into trivia lines and logical lines.
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while self.position < self.source.len() {
            let token = self.next_token()?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token> {
        let start = self.position;
        let rest = &self.source[start..];
        let (after_indent, indent) = indentation(rest).unwrap_or((rest, ""));
        let content_start = start + indent.len();

        let (text_end, next_start, colon) = if is_trivia(after_indent) {
            let (text_end, next_start) = self.physical_line(content_start);
            (text_end, next_start, None)
        } else {
            self.scan_logical_line(content_start)?
        };

        let text = &self.source[content_start..text_end];
        let newline = &self.source[text_end..next_start];
        let kind = if is_trivia(after_indent) {
            TokenKind::Trivia
        } else {
            classify(text, colon)
        };

        self.position = next_start;
        Ok(Token::new(kind, indent, text, newline, start))
    }

    /// Returns the end of the line text and the start of the next line.
    fn physical_line(&self, from: usize) -> (usize, usize) {
        let bytes = self.source.as_bytes();
        match self.source[from..].find('\n') {
            Some(offset) => {
                let newline = from + offset;
                if newline > from && bytes[newline - 1] == b'\r' {
                    (newline - 1, newline + 1)
                } else {
                    (newline, newline + 1)
                }
            }
            None => (bytes.len(), bytes.len()),
        }
    }

    fn scan_logical_line(&self, start: usize) -> Result<(usize, usize, Option<usize>)> {
        let bytes = self.source.as_bytes();
        let mut brackets: Vec<usize> = Vec::new();
        let mut lambdas = 0usize;
        let mut colon = None;
        let mut pos = start;

        while pos < bytes.len() {
            match bytes[pos] {
                b'\n' => {
                    if brackets.is_empty() {
                        let text_end = if pos > start && bytes[pos - 1] == b'\r' {
                            pos - 1
                        } else {
                            pos
                        };
                        return Ok((text_end, pos + 1, colon));
                    }
                    pos += 1;
                }
                b'#' => pos = self.physical_line(pos).0,
                b'\\' => {
                    pos += if bytes[pos + 1..].starts_with(b"\r\n") {
                        3
                    } else {
                        2
                    };
                }
                b'(' | b'[' | b'{' => {
                    brackets.push(pos);
                    pos += 1;
                }
                b')' | b']' | b'}' => {
                    if brackets.pop().is_none() {
                        return Err(self.error_at(pos, format!("unmatched '{}'", bytes[pos] as char)));
                    }
                    pos += 1;
                }
                b'"' | b'\'' => pos = self.string_end(pos, false)?,
                b':' if brackets.is_empty() => {
                    if bytes.get(pos + 1) == Some(&b'=') {
                        pos += 2;
                        continue;
                    }
                    if lambdas > 0 {
                        lambdas -= 1;
                    } else if colon.is_none() {
                        colon = Some(pos - start);
                    }
                    pos += 1;
                }
                byte if byte == b'_' || byte.is_ascii_alphabetic() || byte >= 0x80 => {
                    let rest = match self.source.get(pos..) {
                        Some(rest) => rest,
                        None => {
                            pos += 1;
                            continue;
                        }
                    };
                    match identifier(rest) {
                        Ok((_, word)) => {
                            let after = pos + word.len();
                            if is_string_prefix(word) && matches!(bytes.get(after), Some(b'"' | b'\'')) {
                                let formatted = word.contains(&['f', 'F', 't', 'T'][..]);
                                pos = self.string_end(after, formatted)?;
                            } else {
                                if word == "lambda" && brackets.is_empty() {
                                    lambdas += 1;
                                }
                                pos = after;
                            }
                        }
                        Err(_) => pos += rest.chars().next().map_or(1, char::len_utf8),
                    }
                }
                _ => pos += 1,
            }
        }

        if let Some(&open) = brackets.last() {
            return Err(self.error_at(open, format!("'{}' was never closed", bytes[open] as char)));
        }

        Ok((bytes.len(), bytes.len(), colon))
    }

    fn string_end(&self, quote_pos: usize, formatted: bool) -> Result<usize> {
        scan_string(self.source.as_bytes(), quote_pos, formatted)
            .ok_or_else(|| self.error_at(quote_pos, "unterminated string literal"))
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> DocError {
        let location = SourceLocation::from_offset(self.source, offset);
        DocError::parse_error(location.line, location.column, message)
    }
}

/// Finds the end of the string literal whose opening quote sits at
/// `quote_pos`. Returns `None` when the literal is never closed.
pub(crate) fn scan_string(bytes: &[u8], quote_pos: usize, formatted: bool) -> Option<usize> {
    let quote = *bytes.get(quote_pos)?;
    let triple = bytes[quote_pos..].starts_with(&[quote; 3]);
    let mut pos = quote_pos + if triple { 3 } else { 1 };
    let mut fields = 0usize;

    while pos < bytes.len() {
        let byte = bytes[pos];
        match byte {
            b'\\' => {
                pos += if bytes[pos + 1..].starts_with(b"\r\n") {
                    3
                } else {
                    2
                };
            }
            b'{' if formatted => {
                if fields == 0 && bytes.get(pos + 1) == Some(&b'{') {
                    pos += 2;
                } else {
                    fields += 1;
                    pos += 1;
                }
            }
            b'}' if formatted && fields > 0 => {
                fields -= 1;
                pos += 1;
            }
            b'"' | b'\'' if fields > 0 => pos = scan_string(bytes, pos, false)?,
            _ if byte == quote => {
                if !triple {
                    return Some(pos + 1);
                }
                if bytes[pos..].starts_with(&[quote; 3]) {
                    return Some(pos + 3);
                }
                pos += 1;
            }
            b'\n' | b'\r' if !triple && fields == 0 => return None,
            _ => pos += 1,
        }
    }

    None
}

/// Name of the class or function a definition header introduces.
pub fn definition_name(header: &str) -> Option<&str> {
    let (rest, word) = identifier(header).ok()?;
    let rest = if word == "async" {
        identifier(rest.trim_start()).ok()?.0
    } else {
        rest
    };
    identifier(rest.trim_start()).ok().map(|(_, name)| name)
}

fn classify(text: &str, colon: Option<usize>) -> TokenKind {
    if text.starts_with('@') {
        return TokenKind::Decorator;
    }

    match (colon, header_keyword(text)) {
        (Some(colon), Some(keyword)) => TokenKind::Header { keyword, colon },
        _ => TokenKind::Statement,
    }
}

fn header_keyword(text: &str) -> Option<HeaderKeyword> {
    let (rest, word) = identifier(text).ok()?;
    match word {
        "def" => Some(HeaderKeyword::Def),
        "class" => Some(HeaderKeyword::Class),
        "async" => match identifier(rest.trim_start()).ok()?.1 {
            "def" => Some(HeaderKeyword::Def),
            "for" | "with" => Some(HeaderKeyword::Block),
            _ => None,
        },
        _ if BLOCK_KEYWORDS.contains(&word) => Some(HeaderKeyword::Block),
        _ if SOFT_KEYWORDS.contains(&word) && opens_soft_block(rest) => Some(HeaderKeyword::Block),
        _ => None,
    }
}

/// `match` and `case` are only keywords when a subject follows them.
fn opens_soft_block(rest: &str) -> bool {
    match rest.trim_start().chars().next() {
        Some(c) => !matches!(c, '=' | '.' | ':' | ',' | ')' | ';'),
        None => false,
    }
}

fn is_trivia(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with('\n') || line.starts_with("\r\n")
}

fn is_string_prefix(word: &str) -> bool {
    STRING_PREFIXES.contains(&word.to_ascii_lowercase().as_str())
}

fn indentation(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ' ' || c == '\t' || c == '\x0c')(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while_m_n(1, 1, |c: char| c == '_' || c.is_alphabetic()),
        take_while(|c: char| c == '_' || c.is_alphanumeric()),
    ))(input)
}
