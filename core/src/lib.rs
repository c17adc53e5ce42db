//! HTL Core Types
//!
//! This crate provides the foundational types shared by the HTL pipeline:
//! - Source locations attached to tokens for diagnostics
//! - Grapheme segmentation and character classification
//! - The sanitized runtime value tree (RntmValue)
//! - HTML escaping
//! - Common error types

mod error;
mod escape;
mod location;
mod text;
mod value;

pub use error::*;
pub use escape::*;
pub use location::*;
pub use text::*;
pub use value::*;
