//! The contraction engine (component D): loop/parallel-edge cleanup, the
//! contractability predicate, single-edge contraction, and the worklist
//! driver (§4.3-§4.7).
use crate::edge::{Edge, EdgeKind};
use crate::end::{End, Orientation};
use crate::error::{GraphError, GraphResult};
use crate::graph::AssemblyGraph;
use crate::ids::{EdgeId, VertexId};
use crate::observer::{ContractionObserver, ContractionProgress};
use crate::seq::{reverse_complement, GAP_PAD};
use crate::vertex::{mirror_contigs, shift_contigs, Vertex};
use fnv::FnvHashSet;

pub type Worklist = FnvHashSet<EdgeId>;

/// Remove every loop (`v1 == v2`) from the graph. Must run before
/// contraction proceeds (§3 invariant 4).
pub fn remove_loops(g: &mut AssemblyGraph) -> usize {
    let loops: Vec<EdgeId> = g.edges().filter(|e| e.is_loop()).map(|e| e.id).collect();
    let n = loops.len();
    for id in loops {
        g.remove_edge(id);
    }
    n
}

/// For each unordered pair of endpoints, keep the first edge seen and
/// remove the rest. Off by default; a separate utility from the driver.
pub fn remove_parallel_edges(g: &mut AssemblyGraph) -> usize {
    let mut seen: FnvHashSet<(VertexId, VertexId)> = FnvHashSet::default();
    let mut redundant = Vec::new();
    for e in g.edges() {
        let key = if e.v1.0 <= e.v2.0 {
            (e.v1, e.v2)
        } else {
            (e.v2, e.v1)
        };
        if !seen.insert(key) {
            redundant.push(e.id);
        }
    }
    let n = redundant.len();
    for id in redundant {
        g.remove_edge(id);
    }
    n
}

/// §4.4: an edge is contractable iff it is still present in the graph (open
/// question 4: membership is checked first), is not a loop, and each
/// endpoint has exactly one incident edge at the end the candidate touches.
pub fn can_be_contracted(g: &AssemblyGraph, edge_id: EdgeId) -> bool {
    let Some(e) = g.edge(edge_id) else {
        return false;
    };
    if e.is_loop() {
        return false;
    }
    let (Some(v1), Some(v2)) = (g.vertex(e.v1), g.vertex(e.v2)) else {
        return false;
    };
    let v1_degree = match e.connection.v1_end {
        End::H => v1.head_edges.len(),
        End::T => v1.tail_edges.len(),
    };
    let v2_degree = match e.connection.v2_end {
        End::H => v2.head_edges.len(),
        End::T => v2.tail_edges.len(),
    };
    v1_degree == 1 && v2_degree == 1
}

/// §4.5: orient so that `e` connects `v1` at `T` to `v2` at `H`.
fn orient_th(g: &mut AssemblyGraph, edge_id: EdgeId) -> GraphResult<()> {
    let (v1, v2, v1_end, v2_end) = {
        let e = g.edge(edge_id).ok_or(GraphError::UnknownEdge(edge_id))?;
        (e.v1, e.v2, e.connection.v1_end, e.connection.v2_end)
    };
    if v1_end == v2_end {
        if v1_end == End::H {
            g.flip_vertex(v1)?;
        } else {
            g.flip_vertex(v2)?;
        }
    } else if v1_end == End::H && v2_end == End::T {
        g.edge_mut(edge_id)
            .ok_or(GraphError::UnknownEdge(edge_id))?
            .flip();
    }
    Ok(())
}

fn merge_metadata(
    new_v: &mut Vertex,
    v1: &Vertex,
    v2: &Vertex,
    shift: usize,
    orientation: Orientation,
    store_ordering: bool,
) {
    for (&well, &(s, e)) in v1.wells.iter() {
        new_v.add_well(well, s, e);
    }
    for (&well, &(s, e)) in v2.wells.iter() {
        new_v.add_well(well, s + shift, e + shift);
    }
    for &ivl in v1.intervals.iter() {
        new_v.add_interval(ivl);
    }
    for &(ctg, s, e) in v2.intervals.iter() {
        new_v.add_interval((ctg, s + shift, e + shift));
    }

    if store_ordering {
        let v1_contigs = v1
            .contigs
            .clone()
            .unwrap_or_else(|| vec![v1.default_contig_record()]);
        let mut v2_contigs = v2
            .contigs
            .clone()
            .unwrap_or_else(|| vec![v2.default_contig_record()]);
        if orientation == Orientation::Reverse {
            v2_contigs = mirror_contigs(&v2_contigs, v2.len());
        }
        let v2_contigs = shift_contigs(&v2_contigs, shift);

        let mut merged = v1_contigs;
        merged.extend(v2_contigs);
        new_v.contigs = Some(merged);
    }
}

/// Dispatch on edge kind; overlap-edge contraction is a declared non-goal
/// (§7 error taxonomy item 3).
pub fn contract_edge(
    g: &mut AssemblyGraph,
    edge_id: EdgeId,
    worklist: &mut Worklist,
    store_ordering: bool,
) -> GraphResult<VertexId> {
    let edge = g.edge(edge_id).ok_or(GraphError::UnknownEdge(edge_id))?;
    match edge.kind {
        EdgeKind::Overlap => Err(GraphError::NotImplemented("overlap edge contraction")),
        EdgeKind::Scaffold { .. } => contract_scaffold_edge(g, edge_id, worklist, store_ordering),
    }
}

/// §4.6: contract a single scaffold edge.
fn contract_scaffold_edge(
    g: &mut AssemblyGraph,
    edge_id: EdgeId,
    worklist: &mut Worklist,
    store_ordering: bool,
) -> GraphResult<VertexId> {
    let (v1, v2) = {
        let e = g.edge(edge_id).ok_or(GraphError::UnknownEdge(edge_id))?;
        (e.v1, e.v2)
    };

    // Step 1: drop other parallel edges between v1 and v2, discarding each
    // removed edge (not `e`) from the worklist (§9 open question 3).
    let v1_incident: Vec<EdgeId> = g
        .vertex(v1)
        .ok_or(GraphError::UnknownVertex(v1))?
        .edges()
        .collect();
    for f in v1_incident {
        if f == edge_id {
            continue;
        }
        let other = g.edge(f).ok_or(GraphError::UnknownEdge(f))?.other_vertex(v1);
        if other == v2 {
            g.remove_edge(f);
            worklist.remove(&f);
        }
    }

    // Step 2: normalize orientation, then re-read v1/v2 (orient_th may have
    // swapped which vertex plays which role).
    orient_th(g, edge_id)?;
    let (v1, v2) = {
        let e = g.edge(edge_id).ok_or(GraphError::UnknownEdge(edge_id))?;
        (e.v1, e.v2)
    };
    debug_assert_eq!(g.edge(edge_id).unwrap().connection.v1_end, End::T);
    debug_assert_eq!(g.edge(edge_id).unwrap().connection.v2_end, End::H);

    let orientation = match g.edge(edge_id).unwrap().kind {
        EdgeKind::Scaffold { orientation, .. } => orientation,
        EdgeKind::Overlap => return Err(GraphError::NotImplemented("overlap edge contraction")),
    };

    // Step 3-4: allocate the new vertex and splice the sequence.
    let new_id = g.next_vertex_id();
    let v1_data = g.vertex(v1).ok_or(GraphError::UnknownVertex(v1))?.clone();
    let v2_data = g.vertex(v2).ok_or(GraphError::UnknownVertex(v2))?.clone();

    let mut new_seq = Vec::with_capacity(v1_data.len() + GAP_PAD.len() + v2_data.len());
    new_seq.extend_from_slice(&v1_data.seq);
    new_seq.extend_from_slice(GAP_PAD);
    match orientation {
        Orientation::Same => new_seq.extend_from_slice(&v2_data.seq),
        Orientation::Reverse => new_seq.extend(reverse_complement(&v2_data.seq)),
    }
    let mut new_v = Vertex::new(new_id, new_seq);

    // Step 5: inherit adjacency.
    new_v.head_edges = v1_data.head_edges.clone();
    new_v.head_edges.remove(&edge_id);
    new_v.tail_edges = v2_data.tail_edges.clone();
    new_v.tail_edges.remove(&edge_id);

    // Step 6: merge metadata.
    let shift = v1_data.len() + GAP_PAD.len();
    merge_metadata(&mut new_v, &v1_data, &v2_data, shift, orientation, store_ordering);

    // Step 7: register the new vertex.
    g.add_vertex(new_v);

    // Step 8: rewire edges formerly incident to v1 at H.
    for f in v1_data.head_edges.iter().copied() {
        if f == edge_id {
            continue;
        }
        let other = g.edge(f).ok_or(GraphError::UnknownEdge(f))?.other_vertex(v1);
        if other == v2 {
            g.remove_edge(f);
            worklist.remove(&f);
        } else {
            g.reconnect(f, v1, new_id)?;
        }
    }

    // Step 9: rewire edges formerly incident to v2 at T, shifting any
    // positional data the edge carries into the new vertex's frame.
    for f in v2_data.tail_edges.iter().copied() {
        if f == edge_id {
            continue;
        }
        g.reconnect(f, v2, new_id)?;
        if let Some(edge) = g.edge_mut(f) {
            edge.shift_into(shift);
        }
    }

    // Step 10: remove the contracted edge and the two old vertices.
    g.remove_edge(edge_id);
    g.remove_vertex_from_index(v1);
    g.remove_vertex_from_index(v2);

    debug_assert!(g.vertex(new_id).unwrap().len() >= shift);

    Ok(new_id)
}

/// §4.7: run loop removal, then pop edges from the worklist until empty,
/// contracting each contractable one. Returns the number of contractions.
pub fn contract_edges(
    g: &mut AssemblyGraph,
    initial: Option<Worklist>,
    store_ordering: bool,
    observer: &mut dyn ContractionObserver,
) -> GraphResult<usize> {
    remove_loops(g);

    let mut worklist = initial.unwrap_or_else(|| g.edge_ids().collect());
    let total = worklist.len();
    let mut n_contracted = 0usize;
    let mut n_seen = 0usize;

    while !worklist.is_empty() {
        let edge_id = *worklist.iter().next().unwrap();
        worklist.remove(&edge_id);

        if can_be_contracted(g, edge_id) {
            contract_edge(g, edge_id, &mut worklist, store_ordering)?;
            n_contracted += 1;
        }
        n_seen += 1;
        observer.on_candidate_examined(ContractionProgress {
            seen: n_seen,
            total,
            contracted: n_contracted,
        });
    }

    observer.on_finished(ContractionProgress {
        seen: n_seen,
        total,
        contracted: n_contracted,
    });

    Ok(n_contracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;

    fn vertex(g: &mut AssemblyGraph, seq: &[u8]) -> VertexId {
        let id = g.next_vertex_id();
        g.add_vertex(Vertex::new(id, seq.to_vec()));
        id
    }

    fn scaffold_edge(
        g: &mut AssemblyGraph,
        v1: VertexId,
        v1_end: End,
        v2: VertexId,
        v2_end: End,
        orientation: Orientation,
        distance: i64,
        support: u32,
    ) -> EdgeId {
        let id = g.next_edge_id();
        let e = Edge::new_scaffold(id, v1, v1_end, v2, v2_end, orientation, distance, support);
        g.add_edge(e);
        g.attach_edge(v1, v1_end, id);
        g.attach_edge(v2, v2_end, id);
        id
    }

    #[test]
    fn scenario_1_same_strand_linear_contraction() {
        let mut g = AssemblyGraph::new();
        let v1 = vertex(&mut g, b"ACGT");
        let v2 = vertex(&mut g, b"GGAA");
        let e = scaffold_edge(&mut g, v1, End::T, v2, End::H, Orientation::Same, 5, 7);

        let mut worklist: Worklist = [e].into_iter().collect();
        let new_v = contract_edge(&mut g, e, &mut worklist, false).unwrap();

        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.vertex(new_v).unwrap().seq, b"ACGTNNNNNNNNNNGGAA");
        assert!(g.vertex(v1).is_none());
        assert!(g.vertex(v2).is_none());
    }

    #[test]
    fn scenario_2_reverse_orientation() {
        let mut g = AssemblyGraph::new();
        let v1 = vertex(&mut g, b"ACGT");
        let v2 = vertex(&mut g, b"GGAA");
        let e = scaffold_edge(&mut g, v1, End::T, v2, End::H, Orientation::Reverse, 5, 7);

        let mut worklist: Worklist = [e].into_iter().collect();
        let new_v = contract_edge(&mut g, e, &mut worklist, false).unwrap();

        assert_eq!(g.vertex(new_v).unwrap().seq, b"ACGTNNNNNNNNNNTTCC");
    }

    #[test]
    fn scenario_3_head_head_triggers_flip() {
        let mut g = AssemblyGraph::new();
        let v1 = vertex(&mut g, b"AAAG");
        let v2 = vertex(&mut g, b"TTTG");
        let e = scaffold_edge(&mut g, v1, End::H, v2, End::H, Orientation::Same, 0, 1);

        let mut worklist: Worklist = [e].into_iter().collect();
        let new_v = contract_edge(&mut g, e, &mut worklist, false).unwrap();

        assert_eq!(g.vertex(new_v).unwrap().seq, b"CTTTNNNNNNNNNNTTTG");
    }

    #[test]
    fn scenario_4_loop_removal() {
        let mut g = AssemblyGraph::new();
        let v1 = vertex(&mut g, b"ACGT");
        let e = scaffold_edge(&mut g, v1, End::H, v1, End::T, Orientation::Same, 0, 1);
        assert_eq!(g.edge(e).unwrap().v1, g.edge(e).unwrap().v2);

        remove_loops(&mut g);

        assert!(g.edge(e).is_none());
        assert!(g.vertex(v1).unwrap().head_edges.is_empty());
        assert!(g.vertex(v1).unwrap().tail_edges.is_empty());
    }

    #[test]
    fn scenario_5_contractability_gate() {
        let mut g = AssemblyGraph::new();
        let a = vertex(&mut g, b"AAAA");
        let b = vertex(&mut g, b"CCCC");
        let c = vertex(&mut g, b"GGGG");
        let d = vertex(&mut g, b"TTTT");

        let ab = scaffold_edge(&mut g, a, End::H, b, End::H, Orientation::Same, 0, 1);
        let _ad = scaffold_edge(&mut g, a, End::H, d, End::H, Orientation::Same, 0, 1);
        let bc = scaffold_edge(&mut g, b, End::T, c, End::H, Orientation::Same, 0, 1);

        assert!(!can_be_contracted(&g, ab), "a has two edges at H");
        assert!(can_be_contracted(&g, bc));
    }

    #[test]
    fn scenario_6_parallel_edge_squash() {
        let mut g = AssemblyGraph::new();
        let v1 = vertex(&mut g, b"ACGT");
        let v2 = vertex(&mut g, b"GGAA");
        let e1 = scaffold_edge(&mut g, v1, End::T, v2, End::H, Orientation::Same, 0, 3);
        let e2 = scaffold_edge(&mut g, v1, End::T, v2, End::H, Orientation::Same, 0, 4);

        let mut worklist: Worklist = [e1, e2].into_iter().collect();
        let new_v = contract_edge(&mut g, e1, &mut worklist, false).unwrap();

        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert!(g.edge(e2).is_none());
        assert!(!worklist.contains(&e2));
        assert_eq!(g.vertex(new_v).unwrap().head_edges.len(), 0);
        assert_eq!(g.vertex(new_v).unwrap().tail_edges.len(), 0);
    }

    #[test]
    fn property_p6_well_shift_correctness() {
        let mut g = AssemblyGraph::new();
        let v1 = vertex(&mut g, b"ACGT");
        let v2 = vertex(&mut g, b"GGAA");
        if let Some(v) = g.vertex_mut(v2) {
            v.add_well(9, 1, 3);
        }
        let e = scaffold_edge(&mut g, v1, End::T, v2, End::H, Orientation::Same, 0, 1);

        let mut worklist: Worklist = [e].into_iter().collect();
        let new_v = contract_edge(&mut g, e, &mut worklist, false).unwrap();

        let shift = 4 + GAP_PAD.len();
        assert_eq!(
            g.vertex(new_v).unwrap().well_interval(9),
            Some((1 + shift, 3 + shift))
        );
    }

    #[test]
    fn driver_reports_contraction_count() {
        let mut g = AssemblyGraph::new();
        let v1 = vertex(&mut g, b"ACGT");
        let v2 = vertex(&mut g, b"GGAA");
        scaffold_edge(&mut g, v1, End::T, v2, End::H, Orientation::Same, 0, 1);

        let mut observer = NullObserver;
        let n = contract_edges(&mut g, None, false, &mut observer).unwrap();
        assert_eq!(n, 1);
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn confluence_p4_order_independent_result() {
        // A -- B -- C, contractable on both edges regardless of pop order.
        let build = |first_edge_first: bool| {
            let mut g = AssemblyGraph::new();
            let a = vertex(&mut g, b"AAAA");
            let b = vertex(&mut g, b"CCCC");
            let c = vertex(&mut g, b"GGGG");
            let ab = scaffold_edge(&mut g, a, End::T, b, End::H, Orientation::Same, 0, 1);
            let bc = scaffold_edge(&mut g, b, End::T, c, End::H, Orientation::Same, 0, 1);
            let order: Worklist = if first_edge_first {
                [ab, bc].into_iter().collect()
            } else {
                [bc, ab].into_iter().collect()
            };
            let mut observer = NullObserver;
            contract_edges(&mut g, Some(order), false, &mut observer).unwrap();
            g
        };

        let g1 = build(true);
        let g2 = build(false);
        assert_eq!(g1.vertex_count(), g2.vertex_count());
        assert_eq!(g1.edge_count(), g2.edge_count());
        let seqs1: Vec<_> = g1.vertices().map(|v| v.seq.clone()).collect();
        let seqs2: Vec<_> = g2.vertices().map(|v| v.seq.clone()).collect();
        assert_eq!(seqs1, seqs2);
    }
}
