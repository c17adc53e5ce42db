//! HTL Runtime
//!
//! Render compiled templates.
//!
//! Responsibilities:
//! - Model untrusted render arguments (host values)
//! - Validate them and convert them into an acyclic runtime value tree
//! - Execute bytecode, escaping every variable that reaches the output

mod convert;
mod error;
mod host;
mod interpreter;

pub use convert::{convert, RntmValueConverter, MAX_NESTING_DEPTH};
pub use error::{RenderError, RenderResult};
pub use host::{HostArray, HostObject, HostValue, ObjectClass, Property, PropertyKey};
pub use interpreter::{run, Interpreter};

use htl_compiler::Bytecode;
use tracing::debug;

/// Validate `args`, then execute `bytecode` against them.
///
/// Arguments are checked completely before the first instruction runs.
pub fn render(bytecode: &Bytecode, args: &HostValue) -> RenderResult<String> {
    let vars = convert(args, bytecode.file())?;
    let output = run(bytecode, &vars)?;

    debug!(
        file = bytecode.file(),
        vars = vars.len(),
        bytes = output.len(),
        "rendered template"
    );

    Ok(output)
}
