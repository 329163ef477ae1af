//! Readers for the plain-text formats the assembler pipeline hands off:
//! FASTA contigs, a scaffold-edge TSV, and a containment report.
use crate::error::{ToolError, ToolResult};
use fnv::FnvHashMap;
use scaffold_graph::{AssemblyGraph, Edge, End, Orientation, Vertex, VertexId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub type ContigIndex = FnvHashMap<String, VertexId>;

const TSV_TYPE_SCA: &str = "S";
const TSV_TYPE_OVL: &str = "O";
const CTMT_WELL_REC: &str = "W";
const CTMT_IVL_REC: &str = "R";

/// Parse a FASTA file into fresh vertices, one per record, uppercasing the
/// sequence. Multi-line records are concatenated.
pub fn load_fasta<P: AsRef<Path>>(path: P) -> ToolResult<(AssemblyGraph, ContigIndex)> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(&path)?;
    let reader = BufReader::new(file);

    let mut g = AssemblyGraph::new();
    let mut index = ContigIndex::default();
    let mut current_name: Option<String> = None;
    let mut current_seq: Vec<u8> = Vec::new();

    let mut flush = |g: &mut AssemblyGraph,
                      index: &mut ContigIndex,
                      name: String,
                      seq: Vec<u8>|
     -> ToolResult<()> {
        if index.contains_key(&name) {
            return Err(ToolError::MalformedRecord {
                path: path_str.clone(),
                line: 0,
                reason: format!("duplicate contig name '{}'", name),
            });
        }
        let id = g.next_vertex_id();
        g.add_vertex(Vertex::new(id, seq));
        index.insert(name, id);
        Ok(())
    };

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(name) = line.strip_prefix('>') {
            if let Some(prev) = current_name.take() {
                flush(&mut g, &mut index, prev, std::mem::take(&mut current_seq))?;
            }
            current_name = Some(name.trim().to_string());
        } else if current_name.is_some() {
            current_seq.extend(line.trim().to_ascii_uppercase().into_bytes());
        } else if !line.trim().is_empty() {
            return Err(ToolError::MalformedRecord {
                path: path_str.clone(),
                line: lineno + 1,
                reason: "sequence data before first header".to_string(),
            });
        }
    }
    if let Some(name) = current_name {
        flush(&mut g, &mut index, name, current_seq)?;
    }

    log::info!("{} contigs loaded from {}", index.len(), path_str);
    Ok((g, index))
}

fn end_from_side(side: &str, path: &str, line: usize) -> ToolResult<End> {
    match side {
        "L" => Ok(End::H),
        "R" => Ok(End::T),
        other => Err(ToolError::MalformedRecord {
            path: path.to_string(),
            line,
            reason: format!("invalid connection value '{}'", other),
        }),
    }
}

fn orientation_from_code(code: &str, path: &str, line: usize) -> ToolResult<Orientation> {
    match code {
        "S" => Ok(Orientation::Same),
        "R" => Ok(Orientation::Reverse),
        other => Err(ToolError::MalformedRecord {
            path: path.to_string(),
            line,
            reason: format!("invalid orientation value '{}'", other),
        }),
    }
}

/// Find the edge, if any, connecting `v1` at `c1` to `v2` at `c2` (order
/// sensitive, mirroring a scaffold edge's directed connection map).
fn find_scaffold_edge(
    g: &AssemblyGraph,
    v1: VertexId,
    c1: End,
    v2: VertexId,
    c2: End,
) -> Option<scaffold_graph::EdgeId> {
    let vtx = g.vertex(v1)?;
    let candidates = match c1 {
        End::H => &vtx.head_edges,
        End::T => &vtx.tail_edges,
    };
    candidates
        .iter()
        .copied()
        .find(|&eid| {
            let e = g.edge(eid).unwrap();
            e.other_vertex(v1) == v2 && e.end_of(v2) == Some(c2)
        })
}

/// Load scaffold edges from a TSV of the form
/// `type  ctg1  ctg2  conn1  conn2  orientation  support  distance`.
/// Duplicate records for the same directed connection have their support
/// summed into the existing edge (§9 open question: edges below
/// `min_support` are otherwise dropped, matching the generating pipeline's
/// own noise floor).
pub fn load_edges_tsv<P: AsRef<Path>>(
    g: &mut AssemblyGraph,
    path: P,
    contigs: &ContigIndex,
    min_support: u32,
) -> ToolResult<()> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(&path)?;
    let reader = BufReader::new(file);

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = lineno + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 8 {
            return Err(ToolError::MalformedRecord {
                path: path_str.clone(),
                line: lineno,
                reason: format!("expected 8 fields, found {}", fields.len()),
            });
        }
        let (type_, ctg1, ctg2, c1, c2, o, spt, d) = (
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5], fields[6],
            fields[7],
        );

        if type_ == TSV_TYPE_OVL {
            return Err(ToolError::MalformedRecord {
                path: path_str.clone(),
                line: lineno,
                reason: "parsing of overlap edges in TSV not implemented".to_string(),
            });
        }
        if type_ != TSV_TYPE_SCA {
            return Err(ToolError::MalformedRecord {
                path: path_str.clone(),
                line: lineno,
                reason: format!("invalid edge type '{}'", type_),
            });
        }

        let v1 = *contigs.get(ctg1).ok_or_else(|| ToolError::UnknownContig {
            path: path_str.clone(),
            line: lineno,
            contig: ctg1.to_string(),
        })?;
        let v2 = *contigs.get(ctg2).ok_or_else(|| ToolError::UnknownContig {
            path: path_str.clone(),
            line: lineno,
            contig: ctg2.to_string(),
        })?;

        let conn1 = end_from_side(c1, &path_str, lineno)?;
        let conn2 = end_from_side(c2, &path_str, lineno)?;
        let orientation = orientation_from_code(o, &path_str, lineno)?;
        let support: u32 = spt.parse().map_err(|_| ToolError::MalformedRecord {
            path: path_str.clone(),
            line: lineno,
            reason: format!("invalid support value '{}'", spt),
        })?;
        let distance: i64 = d.parse().map_err(|_| ToolError::MalformedRecord {
            path: path_str.clone(),
            line: lineno,
            reason: format!("invalid distance value '{}'", d),
        })?;

        if let Some(existing) = find_scaffold_edge(g, v1, conn1, v2, conn2) {
            log::warn!(
                "duplicate records indicating edge between {} ({}), {} ({}); summing counts",
                v1,
                ctg1,
                v2,
                ctg2
            );
            if let Some(e) = g.edge_mut(existing) {
                e.add_support(support);
            }
            continue;
        }

        if support < min_support {
            continue;
        }

        let eid = g.next_edge_id();
        let e = Edge::new_scaffold(eid, v1, conn1, v2, conn2, orientation, distance, support);
        g.add_edge(e);
        g.attach_edge(v1, conn1, eid);
        g.attach_edge(v2, conn2, eid);
    }

    log::info!("edge connections loaded from {}", path_str);
    Ok(())
}

/// Load well/interval containment records:
/// `W  contig  well  start  end` or `R  contig  ctg_start  ctg_end  len`.
/// A record naming a contig absent from `contigs` is a warning, not a hard
/// failure (scenario: a dangling containment record for a contig already
/// filtered out of the FASTA).
pub fn load_containment<P: AsRef<Path>>(
    g: &mut AssemblyGraph,
    path: P,
    contigs: &ContigIndex,
) -> ToolResult<()> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(&path)?;
    let reader = BufReader::new(file);

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = lineno + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }

        let name = fields[1];
        let Some(&vid) = contigs.get(name) else {
            log::warn!("vertex not found: {}", name);
            continue;
        };
        let v = g.vertex_mut(vid).ok_or_else(|| ToolError::MalformedRecord {
            path: path_str.clone(),
            line: lineno,
            reason: format!("contig '{}' indexed but missing from graph", name),
        })?;

        match fields[0] {
            CTMT_WELL_REC if fields.len() >= 5 => {
                let (well, start, end) = (
                    fields[2].parse().unwrap_or(0),
                    fields[3].parse().unwrap_or(0),
                    fields[4].parse().unwrap_or(0),
                );
                v.add_well(well, start, end);
            }
            CTMT_IVL_REC if fields.len() >= 5 => {
                let ivl = (
                    fields[2].parse().unwrap_or(0),
                    fields[3].parse().unwrap_or(0),
                    fields[4].parse().unwrap_or(0),
                );
                v.add_interval(ivl);
            }
            other => log::warn!("invalid record type found: {}", other),
        }
    }

    Ok(())
}

/// The full loader pipeline (§4.8): FASTA is mandatory, the TSV and
/// containment files are each optional.
pub fn load_from_fasta_tsv<P: AsRef<Path>>(
    fasta_path: P,
    tsv_path: Option<P>,
    containment_path: Option<P>,
    min_support: u32,
) -> ToolResult<(AssemblyGraph, ContigIndex)> {
    let (mut g, contigs) = load_fasta(fasta_path)?;
    if let Some(tsv) = tsv_path {
        load_edges_tsv(&mut g, tsv, &contigs, min_support)?;
    }
    if let Some(ctmt) = containment_path {
        load_containment(&mut g, ctmt, &contigs)?;
    }
    Ok((g, contigs))
}
