//! Error type for file-format adapters, separate from `scaffold_graph`'s
//! `GraphError`: parsing user-supplied files fails on bad input, which is
//! an expected, recoverable condition rather than an internal invariant
//! violation.
use std::{error, fmt, io};

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug)]
pub enum ToolError {
    Io(io::Error),
    Json(serde_json::Error),
    /// A TSV/containment record was malformed; carries the source path,
    /// the 1-based line number, and a short reason.
    MalformedRecord {
        path: String,
        line: usize,
        reason: String,
    },
    /// A TSV edge record names a contig absent from the loaded FASTA.
    UnknownContig { path: String, line: usize, contig: String },
    Graph(scaffold_graph::GraphError),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ToolError as TE;
        match self {
            TE::Io(e) => write!(f, "I/O error: {}", e),
            TE::Json(e) => write!(f, "JSON error: {}", e),
            TE::MalformedRecord { path, line, reason } => {
                write!(f, "{}:{}: {}", path, line, reason)
            }
            TE::UnknownContig { path, line, contig } => {
                write!(f, "{}:{}: unknown contig '{}'", path, line, contig)
            }
            TE::Graph(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for ToolError {}

impl From<io::Error> for ToolError {
    fn from(e: io::Error) -> Self {
        ToolError::Io(e)
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        ToolError::Json(e)
    }
}

impl From<scaffold_graph::GraphError> for ToolError {
    fn from(e: scaffold_graph::GraphError) -> Self {
        ToolError::Graph(e)
    }
}
