//! Bytecode model.

use std::fmt;
use std::sync::Arc;

/// A single bytecode instruction.
///
/// The set is closed: a new template construct means a new variant here and
/// a new arm in the generator and the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Append trusted, author-written HTML verbatim.
    AppendLiteral(String),
    /// Look up a variable, stringify it, escape it and append it.
    AppendVariable(String),
}

impl Instruction {
    pub fn opcode(&self) -> &'static str {
        match self {
            Instruction::AppendLiteral(_) => "APPEND_LITERAL",
            Instruction::AppendVariable(_) => "APPEND_VAR",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::AppendLiteral(text) => write!(f, "{} {:?}", self.opcode(), text),
            Instruction::AppendVariable(name) => write!(f, "{} {}", self.opcode(), name),
        }
    }
}

/// Compiled form of one template file.
///
/// Immutable once produced; share it behind an `Arc` across render calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytecode {
    file: Arc<str>,
    instructions: Vec<Instruction>,
}

impl Bytecode {
    pub fn new(file: impl Into<Arc<str>>, instructions: Vec<Instruction>) -> Self {
        Self {
            file: file.into(),
            instructions,
        }
    }

    /// Identifier of the template file this bytecode was compiled from.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Names of all referenced variables, in order of first use.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for inst in &self.instructions {
            if let Instruction::AppendVariable(name) = inst {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl fmt::Display for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; {}", self.file)?;
        for (i, inst) in self.instructions.iter().enumerate() {
            writeln!(f, "{:04} {}", i, inst)?;
        }
        Ok(())
    }
}
