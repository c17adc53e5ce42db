//! Bytecode generation.

use std::sync::Arc;

use htl_parser::{Token, TokenKind};

use crate::{Bytecode, Instruction};

/// Maps tokens to instructions, one to one, in token order.
///
/// Adjacent literals are already merged by the lexer, so the generator never
/// reorders or combines instructions.
pub struct BytecodeGenerator {
    file: Arc<str>,
}

impl BytecodeGenerator {
    pub fn new(file: impl Into<Arc<str>>) -> Self {
        Self { file: file.into() }
    }

    pub fn generate(&self, tokens: &[Token]) -> Bytecode {
        let instructions = tokens.iter().map(Self::instruction_for).collect();
        Bytecode::new(Arc::clone(&self.file), instructions)
    }

    fn instruction_for(token: &Token) -> Instruction {
        match token.kind {
            TokenKind::Html => Instruction::AppendLiteral(token.text.clone()),
            TokenKind::Var => Instruction::AppendVariable(token.text.clone()),
        }
    }
}
