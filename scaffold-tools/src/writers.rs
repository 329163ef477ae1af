//! Writers for the plain-text and JSON formats `loaders` reads back, plus
//! GFA exports for visualization (§4.9).
use crate::error::ToolResult;
use scaffold_graph::{AssemblyGraph, End, Orientation};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn sorted_vertices(g: &AssemblyGraph) -> Vec<&scaffold_graph::Vertex> {
    let mut vs: Vec<_> = g.vertices().collect();
    vs.sort_by_key(|v| v.id);
    vs
}

fn sorted_edges(g: &AssemblyGraph) -> Vec<&scaffold_graph::Edge> {
    let mut es: Vec<_> = g.edges().collect();
    es.sort_by_key(|e| e.id);
    es
}

pub fn write_fasta<P: AsRef<Path>>(g: &AssemblyGraph, path: P) -> ToolResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for v in sorted_vertices(g) {
        writeln!(out, ">{}", v.id)?;
        out.write_all(&v.seq)?;
        writeln!(out)?;
    }
    Ok(())
}

/// `type  ctg1  ctg2  conn1  conn2  orientation  support  distance`, the
/// inverse of `loaders::load_edges_tsv` (§9 open question 2: orientation
/// uses the same S/R mapping the reader does, a correction to the bug in
/// the pipeline this format was inherited from).
pub fn write_edges_tsv<P: AsRef<Path>>(g: &AssemblyGraph, path: P) -> ToolResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for e in sorted_edges(g) {
        let (distance, orientation, support) = match e.kind {
            scaffold_graph::EdgeKind::Scaffold {
                distance,
                orientation,
                support,
            } => (distance, orientation, support),
            scaffold_graph::EdgeKind::Overlap => continue,
        };
        let vc1 = if e.connection.v1_end == End::H { "L" } else { "R" };
        let vc2 = if e.connection.v2_end == End::H { "L" } else { "R" };
        let ori = match orientation {
            Orientation::Same => "S",
            Orientation::Reverse => "R",
        };
        writeln!(
            out,
            "S\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            e.v1, e.v2, vc1, vc2, ori, support, distance
        )?;
    }
    Ok(())
}

pub fn write_containment<P: AsRef<Path>>(g: &AssemblyGraph, path: P) -> ToolResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for v in sorted_vertices(g) {
        let mut wells: Vec<_> = v.wells.iter().collect();
        wells.sort_by_key(|&(well, _)| well);
        for (&well, &(s, e)) in wells {
            writeln!(out, "W\t{}\t{}\t{}\t{}", v.id, well, s, e)?;
        }
        let mut ivls: Vec<_> = v.intervals.iter().collect();
        ivls.sort();
        for &(ctg, s, e) in ivls {
            writeln!(out, "R\t{}\t{}\t{}\t{}", v.id, ctg, s, e)?;
        }
    }
    Ok(())
}

fn contig_record_str(ctg: &scaffold_graph::ContigRecord) -> String {
    let ivl_str = ctg
        .intervals
        .iter()
        .map(|(s, e)| format!("{}-{}", s, e))
        .collect::<Vec<_>>()
        .join(",");
    format!("{};{};{};{}", ctg.contig_id, ivl_str, ctg.length, ctg.strand)
}

/// One line per vertex: its id, then a tab-separated list of the contig
/// records folded into it (empty if `store_ordering` was never enabled).
pub fn write_ordering<P: AsRef<Path>>(g: &AssemblyGraph, path: P) -> ToolResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for v in sorted_vertices(g) {
        let body = match &v.contigs {
            Some(contigs) => contigs
                .iter()
                .map(contig_record_str)
                .collect::<Vec<_>>()
                .join("\t"),
            None => String::new(),
        };
        writeln!(out, "{}\t{}", v.id, body)?;
    }
    Ok(())
}

/// Plain GFA, matching the generating pipeline's own minimal dialect
/// (not meant for general-purpose GFA readers).
pub fn write_gfa<P: AsRef<Path>>(g: &AssemblyGraph, path: P) -> ToolResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for v in sorted_vertices(g) {
        let (vh, vt) = (v.id.0 * 2, v.id.0 * 2 + 1);
        write!(out, "S\t{}\t{}\t", vh, vt)?;
        out.write_all(&v.seq)?;
        writeln!(out, "\t*")?;
    }
    for e in sorted_edges(g) {
        if e.is_overlap_edge() {
            continue;
        }
        let id1 = if e.connection.v1_end == End::H {
            e.v1.0 * 2
        } else {
            e.v1.0 * 2 + 1
        };
        let id2 = if e.connection.v2_end == End::H {
            e.v2.0 * 2
        } else {
            e.v2.0 * 2 + 1
        };
        writeln!(out, "L\t{}\t{}\t3000N", id1, id2)?;
    }
    Ok(())
}

/// GFA with `+`/`-` segment and link orientations, for Bandage.
pub fn write_bandage_gfa<P: AsRef<Path>>(g: &AssemblyGraph, path: P) -> ToolResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for v in sorted_vertices(g) {
        write!(out, "S\t{}+\t{}-\t", v.id, v.id)?;
        out.write_all(&v.seq)?;
        writeln!(out, "\t*")?;
    }
    for e in sorted_edges(g) {
        if e.is_overlap_edge() {
            continue;
        }
        let conn1 = if e.connection.v1_end == End::H { "+" } else { "-" };
        let conn2 = if e.connection.v2_end == End::H { "+" } else { "-" };
        writeln!(out, "L\t{}\t{}\t{}\t{}\t3000N", e.v1, conn1, e.v2, conn2)?;
    }
    Ok(())
}

/// Save the whole graph (vertices, edges, id generators) as JSON, so a run
/// can be resumed without re-running the loaders.
pub fn save_graph_json<P: AsRef<Path>>(g: &AssemblyGraph, path: P) -> ToolResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, g)?;
    Ok(())
}

pub fn load_graph_json<P: AsRef<Path>>(path: P) -> ToolResult<AssemblyGraph> {
    let reader = std::io::BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
