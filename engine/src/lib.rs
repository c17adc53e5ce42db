//! HTL Engine
//!
//! Public facade over the compile and render pipeline.
//!
//! Responsibilities:
//! - Validate engine options
//! - Load template sources through a sandboxed source provider
//! - Cache compiled bytecode per template file
//! - Render templates against caller-supplied arguments

mod engine;
mod error;
mod options;
mod source;

pub use engine::Engine;
pub use error::{EngineError, EngineResult, OptionsError, SourceError};
pub use options::{EngineOptions, EngineOptionsBuilder};
pub use source::{FsSourceProvider, MemorySourceProvider, SourceProvider};

pub use htl_compiler::{Bytecode, Instruction};
pub use htl_runtime::{
    host_args, HostArray, HostObject, HostValue, PropertyKey, RenderError, MAX_NESTING_DEPTH,
};
