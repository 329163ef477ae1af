//! Bidirected vertices carrying a sequence and auxiliary per-region
//! metadata (component B).
use crate::end::Orientation;
use crate::ids::{EdgeId, VertexId};
use fnv::{FnvHashMap, FnvHashSet};
use serde::{Deserialize, Serialize};

/// One contig merged into a vertex, in left-to-right order along `seq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigRecord {
    pub contig_id: u64,
    pub intervals: Vec<(usize, usize)>,
    pub length: usize,
    pub strand: Orientation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub seq: Vec<u8>,
    pub head_edges: FnvHashSet<EdgeId>,
    pub tail_edges: FnvHashSet<EdgeId>,
    pub wells: FnvHashMap<u64, (usize, usize)>,
    pub intervals: FnvHashSet<(u64, usize, usize)>,
    /// Present once contig ordering is tracked (§4.6 step 6, `store_ordering`).
    pub contigs: Option<Vec<ContigRecord>>,
}

impl Vertex {
    pub fn new(id: VertexId, seq: Vec<u8>) -> Vertex {
        Vertex {
            id,
            seq,
            head_edges: FnvHashSet::default(),
            tail_edges: FnvHashSet::default(),
            wells: FnvHashMap::default(),
            intervals: FnvHashSet::default(),
            contigs: None,
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn add_well(&mut self, well: u64, start: usize, end: usize) {
        self.wells.insert(well, (start, end));
    }

    pub fn well_interval(&self, well: u64) -> Option<(usize, usize)> {
        self.wells.get(&well).copied()
    }

    pub fn add_interval(&mut self, interval: (u64, usize, usize)) {
        self.intervals.insert(interval);
    }

    /// All edges incident to this vertex, at either end.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.head_edges.iter().chain(self.tail_edges.iter()).copied()
    }

    /// Synthesize a single-contig ordering record from this vertex's own
    /// id/length, as done the first time `store_ordering` sees a vertex that
    /// hasn't been contracted yet (§4.6 step 6).
    pub fn default_contig_record(&self) -> ContigRecord {
        ContigRecord {
            contig_id: self.id.0,
            intervals: vec![(0, self.len())],
            length: self.len(),
            strand: Orientation::Same,
        }
    }

    /// Invariant 5: `len(seq) >= max end` of every well/interval attached.
    pub fn metadata_fits(&self) -> bool {
        let wells_ok = self.wells.values().all(|&(_, end)| end <= self.len());
        let intervals_ok = self.intervals.iter().all(|&(_, _, end)| end <= self.len());
        wells_ok && intervals_ok
    }
}

/// Mirror a contig ordering into the coordinate frame of a sequence of
/// length `len` reverse-complemented in place: reverse record order, flip
/// each record's strand, and mirror each record's own intervals.
pub fn mirror_contigs(contigs: &[ContigRecord], len: usize) -> Vec<ContigRecord> {
    let mut out: Vec<ContigRecord> = contigs
        .iter()
        .map(|c| ContigRecord {
            contig_id: c.contig_id,
            intervals: c.intervals.iter().map(|&(s, e)| (len - e, len - s)).collect(),
            length: c.length,
            strand: c.strand.flip(),
        })
        .collect();
    out.reverse();
    out
}

/// Translate every interval of every record by `offset`, used when splicing
/// a contig list into a vertex's right-hand coordinate frame.
pub fn shift_contigs(contigs: &[ContigRecord], offset: usize) -> Vec<ContigRecord> {
    contigs
        .iter()
        .map(|c| ContigRecord {
            contig_id: c.contig_id,
            intervals: c
                .intervals
                .iter()
                .map(|&(s, e)| (s + offset, e + offset))
                .collect(),
            length: c.length,
            strand: c.strand,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesizes_default_contig_record() {
        let v = Vertex::new(VertexId(7), b"ACGTACGT".to_vec());
        let ctg = v.default_contig_record();
        assert_eq!(ctg.contig_id, 7);
        assert_eq!(ctg.length, 8);
        assert_eq!(ctg.intervals, vec![(0, 8)]);
        assert_eq!(ctg.strand, Orientation::Same);
    }

    #[test]
    fn metadata_fits_checks_extents() {
        let mut v = Vertex::new(VertexId(1), b"ACGT".to_vec());
        v.add_well(1, 0, 4);
        assert!(v.metadata_fits());
        v.add_well(2, 0, 5);
        assert!(!v.metadata_fits());
    }
}
