//! Bytecode execution.

use htl_compiler::{Bytecode, Instruction};
use htl_core::{push_escaped, RntmVars};

use crate::{RenderError, RenderResult};

/// Runs one bytecode program against one set of variables.
pub struct Interpreter<'b, 'v> {
    bytecode: &'b Bytecode,
    vars: &'v RntmVars,
}

impl<'b, 'v> Interpreter<'b, 'v> {
    pub fn new(bytecode: &'b Bytecode, vars: &'v RntmVars) -> Self {
        Self { bytecode, vars }
    }

    /// Execute every instruction once, in order. On error nothing of the
    /// partial output is returned.
    pub fn run(&self) -> RenderResult<String> {
        let mut out = String::new();
        for inst in self.bytecode.instructions() {
            match inst {
                Instruction::AppendLiteral(html) => out.push_str(html),
                Instruction::AppendVariable(name) => self.append_variable(&mut out, name)?,
            }
        }
        Ok(out)
    }

    fn append_variable(&self, out: &mut String, name: &str) -> RenderResult<()> {
        let value = self
            .vars
            .get(name)
            .ok_or_else(|| RenderError::missing_argument(self.bytecode.file(), name))?;
        push_escaped(out, &value.to_string());
        Ok(())
    }
}

/// Run `bytecode` against already validated variables.
pub fn run(bytecode: &Bytecode, vars: &RntmVars) -> RenderResult<String> {
    Interpreter::new(bytecode, vars).run()
}
