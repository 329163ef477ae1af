//! Custom error type for graph operations, matching the error taxonomy of
//! the contraction design: invariant violations and invalid input values are
//! fatal, not-implemented is fatal on invocation, and recoverable warnings
//! never reach this type (they go through the observer/logging facade).
use crate::ids::{EdgeId, VertexId};
use std::{error, fmt};

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug)]
pub enum GraphError {
    /// An internal structural check failed; signals a bug in the core.
    InvariantViolation(String),
    VertexIdAlreadyExists(VertexId),
    EdgeIdAlreadyExists(EdgeId),
    UnknownVertex(VertexId),
    UnknownEdge(EdgeId),
    InvalidOrientation(u8),
    NotImplemented(&'static str),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GraphError as GE;
        match self {
            GE::InvariantViolation(msg) => write!(f, "graph invariant violated: {}", msg),
            GE::VertexIdAlreadyExists(id) => {
                write!(f, "vertex id {} already exists in the graph", id)
            }
            GE::EdgeIdAlreadyExists(id) => write!(f, "edge id {} already exists in the graph", id),
            GE::UnknownVertex(id) => write!(f, "no vertex with id {} in the graph", id),
            GE::UnknownEdge(id) => write!(f, "no edge with id {} in the graph", id),
            GE::InvalidOrientation(bit) => write!(f, "invalid orientation value: {}", bit),
            GE::NotImplemented(what) => write!(f, "not implemented: {}", what),
        }
    }
}

impl error::Error for GraphError {}
