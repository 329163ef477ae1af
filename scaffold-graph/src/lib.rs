//! Bidirected scaffold graph model and edge-contraction engine.
//!
//! A scaffold graph is a bidirected multigraph: each vertex carries a DNA
//! sequence with two distinguishable ends (`H`ead, `T`ail), and each edge
//! names which end of each endpoint it connects. Contracting an edge merges
//! its two endpoints into a single vertex whose sequence is the splice of
//! the two originals, in the orientation the edge records.

pub mod contraction;
pub mod edge;
pub mod end;
pub mod error;
pub mod graph;
pub mod ids;
pub mod observer;
pub mod seq;
pub mod vertex;

pub use contraction::{contract_edge, contract_edges, Worklist};
pub use edge::{Connection, Edge, EdgeKind};
pub use end::{End, Orientation};
pub use error::{GraphError, GraphResult};
pub use graph::AssemblyGraph;
pub use ids::{EdgeId, IdGenerator, VertexId};
pub use observer::{ContractionObserver, ContractionProgress, LoggingObserver, NullObserver};
pub use vertex::{ContigRecord, Vertex};
