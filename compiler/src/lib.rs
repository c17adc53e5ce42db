//! HTL Compiler
//!
//! Transform template source into flat bytecode.
//!
//! Responsibilities:
//! - Tokenize template source (via htl-parser)
//! - Map each token to its instruction, preserving order
//! - Attach the source file identifier for error attribution at render time

mod bytecode;
mod compiler;
mod error;
mod generator;

pub use bytecode::{Bytecode, Instruction};
pub use compiler::compile;
pub use error::{CompileError, CompileResult};
pub use generator::BytecodeGenerator;
