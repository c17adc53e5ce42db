//! Lexer (tokenizer) for HTL template source.
//!
//! The lexer walks the source one grapheme at a time. Everything is literal
//! HTML except for `@`-introduced escape sequences:
//! - `@@`, or `@` at end of input, is a literal `@`
//! - `@identifier` is a variable reference
//! - `@` followed by anything else is a syntax error

use std::fmt;
use std::sync::Arc;

use htl_core::{to_graphemes, Grapheme, SourceLocation};

use crate::{ParseError, ParseResult};

/// Token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal HTML, emitted verbatim.
    Html,
    /// Variable reference; the token text is the bare identifier.
    Var,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Html => "html",
            TokenKind::Var => "var",
        }
    }
}

/// A token with its location.
///
/// For `Html` tokens the location is where the literal run starts; for `Var`
/// tokens it is the position of the introducing `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn html(text: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(TokenKind::Html, text, location)
    }

    pub fn var(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(TokenKind::Var, name, location)
    }

    /// The token as it would be spelled in source (`@name` for variables).
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::Html => self.text.clone(),
            TokenKind::Var => format!("@{}", self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.location, self.kind.name(), self.text)
    }
}

/// Identifiers start with a letter or `_`.
pub fn is_identifier_start(g: Grapheme<'_>) -> bool {
    g.is_letter() || g == "_"
}

/// Identifier bodies are letters, decimal digits and `_`.
pub fn is_identifier_part(g: Grapheme<'_>) -> bool {
    is_identifier_start(g) || g.is_digit()
}

/// Tokenize `source`, attributing locations to `file`.
pub fn tokenize(file: impl Into<Arc<str>>, source: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(file, source).tokenize()
}

/// Lexer state.
pub struct Lexer<'a> {
    graphemes: Vec<Grapheme<'a>>,
    pos: usize,
    location: SourceLocation,
}

impl<'a> Lexer<'a> {
    pub fn new(file: impl Into<Arc<str>>, source: &'a str) -> Self {
        Self {
            graphemes: to_graphemes(source),
            pos: 0,
            location: SourceLocation::start(file),
        }
    }

    /// Tokenize all input into a vector of tokens, in source order.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut html = String::new();
        let mut html_start = self.location.clone();

        while let Some(g) = self.peek() {
            let at = self.location.clone();
            self.bump(g);

            if g != "@" {
                html.push_str(g.as_str());
                continue;
            }

            match self.peek() {
                None => html.push('@'),
                Some(next) if next == "@" => {
                    self.bump(next);
                    html.push('@');
                }
                Some(next) if is_identifier_start(next) => {
                    if !html.is_empty() {
                        tokens.push(Token::html(std::mem::take(&mut html), html_start));
                    }
                    let name = self.scan_identifier();
                    tokens.push(Token::var(name, at));
                    html_start = self.location.clone();
                }
                Some(next) => return Err(ParseError::invalid_escape(next.as_str(), at)),
            }
        }

        if !html.is_empty() {
            tokens.push(Token::html(html, html_start));
        }

        Ok(tokens)
    }

    fn peek(&self) -> Option<Grapheme<'a>> {
        self.graphemes.get(self.pos).copied()
    }

    fn bump(&mut self, g: Grapheme<'a>) {
        self.pos += 1;
        self.location = if g.is_newline() {
            self.location.newline()
        } else {
            self.location.advance_column()
        };
    }

    /// Maximal run of identifier graphemes. The caller has checked the first.
    fn scan_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(g) = self.peek() {
            if !is_identifier_part(g) {
                break;
            }
            ident.push_str(g.as_str());
            self.bump(g);
        }
        ident
    }
}
