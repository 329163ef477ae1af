//! File-format adapters and the command-line driver around `scaffold_graph`.
pub mod error;
pub mod loaders;
pub mod writers;

pub use error::{ToolError, ToolResult};
