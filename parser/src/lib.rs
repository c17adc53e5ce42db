//! HTL Parser
//!
//! This crate turns template source text into tokens:
//! - Literal HTML runs, with `@@` folded into a literal `@`
//! - Variable references (`@identifier`)
//! - Syntax errors with file/line/column information

mod error;
mod lexer;

pub use error::*;
pub use lexer::{is_identifier_part, is_identifier_start, tokenize, Lexer, Token, TokenKind};
