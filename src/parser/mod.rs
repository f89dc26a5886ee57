use crate::ast::{
    Compound, Definition, DefinitionKind, EmptyLine, Header, IndentedBlock, Line, Module,
    SimpleSuite, Statement, Suite, BOM,
};
use crate::error::{DocError, Result};
use crate::lexer::{definition_name, Lexer};
use crate::source_location::SourceLocation;
use crate::token::{HeaderKeyword, Token, TokenKind};
use std::iter::Peekable;

/// Parses Python source into a lossless [`Module`]. A leading byte order
/// mark is recorded on the module and not lexed.
pub fn parse_module(source: &str) -> Result<Module> {
    let (bom, source) = match source.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, source),
    };
    let tokens = Lexer::new(source).tokenize()?;
    let module = Parser::new(source, tokens.into_iter()).parse_module()?;
    Ok(Module { bom, ..module })
}

/// Builds the tree from lexer tokens using indentation to find block
/// boundaries. Trivia lines are held back and attached to whichever
/// statement comes next, at any nesting level.
pub struct Parser<'a, I: Iterator<Item = Token>> {
    source: &'a str,
    tokens: Peekable<I>,
    pending: Vec<EmptyLine>,
    /// Indentation of every block currently open, outermost first.
    indents: Vec<String>,
}

impl<'a, I: Iterator<Item = Token>> Parser<'a, I> {
    pub fn new(source: &'a str, tokens: I) -> Self {
        Self {
            source,
            tokens: tokens.peekable(),
            pending: Vec::new(),
            indents: Vec::new(),
        }
    }

    pub fn parse_module(mut self) -> Result<Module> {
        self.collect_trivia();
        let header = std::mem::take(&mut self.pending);
        let body = self.parse_statements("")?;

        if let Some(position) = self.peek().map(Token::content_position) {
            return Err(self.error_at(position, "unexpected indent"));
        }

        self.collect_trivia();
        Ok(Module {
            bom: false,
            header,
            body,
            footer: std::mem::take(&mut self.pending),
            newline: detect_newline(self.source).to_string(),
        })
    }

    fn advance(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    /// Moves trivia tokens into the pending buffer.
    fn collect_trivia(&mut self) {
        while let Some(token) = self.tokens.next_if(Token::is_trivia) {
            self.pending.push(EmptyLine {
                indent: token.indent,
                text: token.text,
                newline: token.newline,
            });
        }
    }

    /// Parses consecutive statements indented exactly by `indent`. Stops
    /// before the first statement indented less, which must line up with an
    /// enclosing block.
    fn parse_statements(&mut self, indent: &str) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        self.indents.push(indent.to_string());

        loop {
            self.collect_trivia();
            let (position, token_indent) = match self.peek() {
                Some(token) => (token.content_position(), token.indent.clone()),
                None => break,
            };

            if token_indent == indent {
                statements.push(self.parse_statement()?);
            } else if token_indent.len() > indent.len() && token_indent.starts_with(indent) {
                return Err(self.error_at(position, "unexpected indent"));
            } else if self.is_enclosing_indent(&token_indent) {
                break;
            } else {
                return Err(self.error_at(
                    position,
                    "unindent does not match any outer indentation level",
                ));
            }
        }

        self.indents.pop();
        Ok(statements)
    }

    fn is_enclosing_indent(&self, indent: &str) -> bool {
        let open = self.indents.len().saturating_sub(1);
        self.indents[..open].iter().any(|outer| outer == indent)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let token = match self.advance() {
            Some(token) => token,
            None => return Err(self.error_at(self.source.len(), "unexpected end of input")),
        };

        match token.kind {
            TokenKind::Trivia | TokenKind::Statement => Ok(Statement::Simple(self.line(token))),
            TokenKind::Decorator => self.parse_decorated(token),
            TokenKind::Header { keyword, colon } => match keyword {
                HeaderKeyword::Def | HeaderKeyword::Class => {
                    self.parse_definition(Vec::new(), token, keyword, colon)
                }
                HeaderKeyword::Block => {
                    let (header, suite) = self.parse_header(token, colon)?;
                    Ok(Statement::Compound(Compound { header, suite }))
                }
            },
        }
    }

    fn parse_decorated(&mut self, first: Token) -> Result<Statement> {
        let indent = first.indent.clone();
        let mut decorators = vec![self.line(first)];

        loop {
            self.collect_trivia();
            let token = match self.advance() {
                Some(token) => token,
                None => {
                    return Err(self.error_at(
                        self.source.len(),
                        "expected a definition after decorators",
                    ))
                }
            };

            if token.indent != indent {
                return Err(self.error_at(token.content_position(), "unexpected indent"));
            }

            match token.kind {
                TokenKind::Decorator => decorators.push(self.line(token)),
                TokenKind::Header {
                    keyword: keyword @ (HeaderKeyword::Def | HeaderKeyword::Class),
                    colon,
                } => return self.parse_definition(decorators, token, keyword, colon),
                _ => {
                    return Err(self.error_at(
                        token.content_position(),
                        "decorators must be followed by a class or function definition",
                    ))
                }
            }
        }
    }

    fn parse_definition(
        &mut self,
        decorators: Vec<Line>,
        token: Token,
        keyword: HeaderKeyword,
        colon: usize,
    ) -> Result<Statement> {
        let kind = match keyword {
            HeaderKeyword::Class => DefinitionKind::Class,
            _ => DefinitionKind::Function,
        };
        let name = match definition_name(&token.text) {
            Some(name) => name.to_string(),
            None => {
                return Err(self.error_at(token.content_position(), "definition has no name"))
            }
        };
        let (header, suite) = self.parse_header(token, colon)?;

        Ok(Statement::Definition(Definition {
            kind,
            name,
            decorators,
            header,
            suite,
        }))
    }

    fn parse_header(&mut self, token: Token, colon: usize) -> Result<(Header, Suite)> {
        let header_position = token.content_position();
        let Token {
            indent,
            mut text,
            newline,
            ..
        } = token;

        let rest = text.split_off(colon + 1);
        let header = Header {
            leading_lines: std::mem::take(&mut self.pending),
            indent,
            text,
        };

        let trimmed = rest.trim_start();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            return Ok((header, Suite::Inline(SimpleSuite { text: rest, newline })));
        }

        self.collect_trivia();
        let next = self
            .peek()
            .map(|next| (next.indent.clone(), next.content_position()));
        let block_indent = match &next {
            Some((next_indent, _))
                if next_indent.len() > header.indent.len()
                    && next_indent.starts_with(header.indent.as_str()) =>
            {
                next_indent.clone()
            }
            _ => {
                let line = SourceLocation::from_offset(self.source, header_position).line;
                let position = next.map_or(self.source.len(), |(_, position)| position);
                return Err(self.error_at(
                    position,
                    format!("expected an indented block after line {}", line),
                ));
            }
        };

        let body = self.parse_statements(&block_indent)?;
        Ok((
            header,
            Suite::Indented(IndentedBlock {
                trailer: rest,
                newline,
                body,
            }),
        ))
    }

    fn line(&mut self, token: Token) -> Line {
        Line {
            leading_lines: std::mem::take(&mut self.pending),
            indent: token.indent,
            text: token.text,
            newline: token.newline,
        }
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> DocError {
        let location = SourceLocation::from_offset(self.source, offset);
        DocError::parse_error(location.line, location.column, message)
    }
}

fn detect_newline(source: &str) -> &'static str {
    match source.find('\n') {
        Some(index) if index > 0 && source.as_bytes()[index - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}
