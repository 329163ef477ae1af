//! Typed bidirected edges (component B).
use crate::end::{End, Orientation};
use crate::ids::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// Endpoint-connection map `{v1 -> end, v2 -> end}`. Kept as a pair of
/// fields rather than a map keyed by vertex id: a loop has `v1 == v2`, which
/// would otherwise collapse the two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub v1_end: End,
    pub v2_end: End,
}

/// The edge-type-specific tail of the shared header (§9 re-architecture
/// note: scaffold vs. overlap is a sum type, not a runtime-checked flag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    Scaffold {
        /// Estimated gap in bases. Clamped to be non-negative at
        /// construction; never affects the fixed 10-N splice pad (§9 open
        /// question 1).
        distance: u64,
        orientation: Orientation,
        support: u32,
    },
    /// Reserved: contraction of overlap edges is an explicit non-goal and
    /// must fail with `GraphError::NotImplemented` if ever attempted.
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub v1: VertexId,
    pub v2: VertexId,
    pub connection: Connection,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new_scaffold(
        id: EdgeId,
        v1: VertexId,
        v1_end: End,
        v2: VertexId,
        v2_end: End,
        orientation: Orientation,
        distance: i64,
        support: u32,
    ) -> Edge {
        Edge {
            id,
            v1,
            v2,
            connection: Connection { v1_end, v2_end },
            kind: EdgeKind::Scaffold {
                distance: distance.max(0) as u64,
                orientation,
                support,
            },
        }
    }

    pub fn is_loop(&self) -> bool {
        self.v1 == self.v2
    }

    pub fn is_scaffold_edge(&self) -> bool {
        matches!(self.kind, EdgeKind::Scaffold { .. })
    }

    pub fn is_overlap_edge(&self) -> bool {
        matches!(self.kind, EdgeKind::Overlap)
    }

    /// The end at which this edge is incident to `vertex`. For a loop,
    /// `v1`'s end is returned (loops are removed before contraction ever
    /// needs to disambiguate the two).
    pub fn end_of(&self, vertex: VertexId) -> Option<End> {
        if vertex == self.v1 {
            Some(self.connection.v1_end)
        } else if vertex == self.v2 {
            Some(self.connection.v2_end)
        } else {
            None
        }
    }

    pub fn other_vertex(&self, vertex: VertexId) -> VertexId {
        if vertex == self.v1 {
            self.v2
        } else {
            self.v1
        }
    }

    /// Exchange `v1` and `v2` (and their connection ends). Used by
    /// orientation normalization (§4.5) for the H-T case: it changes which
    /// vertex plays the "v1" role without altering the set of graph edges.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.v1, &mut self.v2);
        std::mem::swap(&mut self.connection.v1_end, &mut self.connection.v2_end);
    }

    pub fn scaffold_orientation(&self) -> Option<Orientation> {
        match self.kind {
            EdgeKind::Scaffold { orientation, .. } => Some(orientation),
            EdgeKind::Overlap => None,
        }
    }

    pub fn distance(&self) -> Option<u64> {
        match self.kind {
            EdgeKind::Scaffold { distance, .. } => Some(distance),
            EdgeKind::Overlap => None,
        }
    }

    pub fn support(&self) -> Option<u32> {
        match self.kind {
            EdgeKind::Scaffold { support, .. } => Some(support),
            EdgeKind::Overlap => None,
        }
    }

    pub fn add_support(&mut self, extra: u32) {
        if let EdgeKind::Scaffold { support, .. } = &mut self.kind {
            *support += extra;
        }
    }

    /// Shift any positional data this edge carries in the frame of the
    /// vertex it was just reconnected to (§4.6 step 9). Scaffold edges carry
    /// no coordinates of their own, so this is a no-op for them; it exists
    /// for the reserved overlap variant, whose alignment coordinates would
    /// need the same treatment once overlap contraction is implemented.
    pub fn shift_into(&mut self, _offset: usize) {}
}
