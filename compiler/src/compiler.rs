//! Compile entry point.

use std::sync::Arc;

use htl_parser::tokenize;
use tracing::debug;

use crate::{Bytecode, BytecodeGenerator, CompileResult};

/// Compile template `source` belonging to `file` into bytecode.
///
/// Pure: the same source always yields the same bytecode.
pub fn compile(file: &str, source: &str) -> CompileResult<Bytecode> {
    let file: Arc<str> = Arc::from(file);
    let tokens = tokenize(Arc::clone(&file), source)?;
    let bytecode = BytecodeGenerator::new(file).generate(&tokens);

    debug!(
        file = bytecode.file(),
        tokens = tokens.len(),
        instructions = bytecode.len(),
        "compiled template"
    );

    Ok(bytecode)
}
