//! The assembly graph (component C): owns vertices and edges, allocates
//! their ids, and exposes the whole-graph operations contraction and the
//! loaders/writers build on (§4.1).
use crate::edge::Edge;
use crate::end::End;
use crate::error::{GraphError, GraphResult};
use crate::ids::{EdgeId, IdGenerator, VertexId};
use crate::seq::reverse_complement;
use crate::vertex::Vertex;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyGraph {
    vertices: FnvHashMap<VertexId, Vertex>,
    edges: FnvHashMap<EdgeId, Edge>,
    vertex_id_gen: IdGenerator,
    edge_id_gen: IdGenerator,
}

impl AssemblyGraph {
    pub fn new() -> Self {
        AssemblyGraph {
            vertices: FnvHashMap::default(),
            edges: FnvHashMap::default(),
            vertex_id_gen: IdGenerator::new(),
            edge_id_gen: IdGenerator::new(),
        }
    }

    pub fn next_vertex_id(&mut self) -> VertexId {
        VertexId(self.vertex_id_gen.get_id())
    }

    pub fn next_edge_id(&mut self) -> EdgeId {
        EdgeId(self.edge_id_gen.get_id())
    }

    /// Insert a vertex; panics if its id already exists (§4.1).
    pub fn add_vertex(&mut self, v: Vertex) {
        let id = v.id;
        if self.vertices.insert(id, v).is_some() {
            panic!("{}", GraphError::VertexIdAlreadyExists(id));
        }
    }

    /// Insert an edge into the graph's edge index only; the caller is
    /// responsible for populating `e.v1`/`e.v2` adjacency sets (§4.1).
    pub fn add_edge(&mut self, e: Edge) {
        let id = e.id;
        if self.edges.insert(id, e).is_some() {
            panic!("{}", GraphError::EdgeIdAlreadyExists(id));
        }
    }

    /// Attach an already-inserted edge to one of its endpoints' adjacency
    /// sets at `end`. Loaders call this once per endpoint after `add_edge`.
    pub fn attach_edge(&mut self, vertex: VertexId, end: End, edge: EdgeId) {
        if let Some(v) = self.vertices.get_mut(&vertex) {
            match end {
                End::H => v.head_edges.insert(edge),
                End::T => v.tail_edges.insert(edge),
            };
        }
    }

    /// Remove an edge from the graph's edge index and from both endpoints'
    /// adjacency sets.
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&edge_id)?;
        if edge.is_loop() {
            if let Some(v) = self.vertices.get_mut(&edge.v1) {
                v.head_edges.remove(&edge_id);
                v.tail_edges.remove(&edge_id);
            }
        } else {
            if let Some(v1) = self.vertices.get_mut(&edge.v1) {
                match edge.connection.v1_end {
                    End::H => v1.head_edges.remove(&edge_id),
                    End::T => v1.tail_edges.remove(&edge_id),
                };
            }
            if let Some(v2) = self.vertices.get_mut(&edge.v2) {
                match edge.connection.v2_end {
                    End::H => v2.head_edges.remove(&edge_id),
                    End::T => v2.tail_edges.remove(&edge_id),
                };
            }
        }
        Some(edge)
    }

    /// Remove a vertex from the vertex index only; the caller must already
    /// have detached every incident edge.
    pub fn remove_vertex_from_index(&mut self, vertex_id: VertexId) -> Option<Vertex> {
        self.vertices.remove(&vertex_id)
    }

    /// Replace one endpoint of `edge_id` from `v_old` to `v_new`, moving the
    /// edge between the corresponding adjacency sets (H stays H, T stays T).
    pub fn reconnect(
        &mut self,
        edge_id: EdgeId,
        v_old: VertexId,
        v_new: VertexId,
    ) -> GraphResult<()> {
        let end = {
            let edge = self
                .edges
                .get_mut(&edge_id)
                .ok_or(GraphError::UnknownEdge(edge_id))?;
            if edge.v1 == v_old {
                edge.v1 = v_new;
                edge.connection.v1_end
            } else if edge.v2 == v_old {
                edge.v2 = v_new;
                edge.connection.v2_end
            } else {
                return Err(GraphError::InvariantViolation(format!(
                    "edge {} is not incident to vertex {}",
                    edge_id, v_old
                )));
            }
        };

        if let Some(old_v) = self.vertices.get_mut(&v_old) {
            match end {
                End::H => old_v.head_edges.remove(&edge_id),
                End::T => old_v.tail_edges.remove(&edge_id),
            };
        }
        if let Some(new_v) = self.vertices.get_mut(&v_new) {
            match end {
                End::H => new_v.head_edges.insert(edge_id),
                End::T => new_v.tail_edges.insert(edge_id),
            };
        }
        Ok(())
    }

    /// Reverse-complement `v`'s sequence, swap its head/tail adjacency, flip
    /// the connection of every incident edge, and mirror all positional
    /// metadata so invariant 5 still holds (§4.1).
    pub fn flip_vertex(&mut self, vertex_id: VertexId) -> GraphResult<()> {
        let len = self
            .vertices
            .get(&vertex_id)
            .ok_or(GraphError::UnknownVertex(vertex_id))?
            .len();

        let incident: Vec<EdgeId> = self.vertices[&vertex_id].edges().collect();
        for eid in incident {
            if let Some(e) = self.edges.get_mut(&eid) {
                if e.v1 == vertex_id {
                    e.connection.v1_end = e.connection.v1_end.flip();
                }
                if e.v2 == vertex_id {
                    e.connection.v2_end = e.connection.v2_end.flip();
                }
            }
        }

        let v = self.vertices.get_mut(&vertex_id).unwrap();
        v.seq = reverse_complement(&v.seq);
        std::mem::swap(&mut v.head_edges, &mut v.tail_edges);

        v.wells = v
            .wells
            .iter()
            .map(|(&w, &(s, e))| (w, (len - e, len - s)))
            .collect();
        v.intervals = v
            .intervals
            .iter()
            .map(|&(ctg, s, e)| (ctg, len - e, len - s))
            .collect();
        if let Some(contigs) = v.contigs.take() {
            v.contigs = Some(crate::vertex::mirror_contigs(&contigs, len));
        }

        Ok(())
    }

    /// Sanity-check query: is there an edge connecting `v1` at `v1_end` to
    /// `v2` at `v2_end`?
    pub fn has_edge_between(&self, v1: VertexId, v1_end: End, v2: VertexId, v2_end: End) -> bool {
        let Some(vtx) = self.vertices.get(&v1) else {
            return false;
        };
        let set = match v1_end {
            End::H => &vtx.head_edges,
            End::T => &vtx.tail_edges,
        };
        set.iter().any(|eid| {
            let e = &self.edges[eid];
            e.other_vertex(v1) == v2 && e.end_of(v2) == Some(v2_end)
        })
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Default for AssemblyGraph {
    fn default() -> Self {
        Self::new()
    }
}
