// structure of the program
// FASTA contigs + scaffold edge TSV (+ optional containment report) as input
// |
// Load contigs as vertices, edges as scaffold edges
// |
// Run edge contraction to merge scaffolded contigs
// |
// Write the merged contigs back out
// | -> FASTA, edge TSV, containment, ordering report
// | -> plain GFA and Bandage-flavored GFA for visualization
// | -> optional JSON snapshot of the merged graph

#[macro_use]
extern crate clap;

use scaffold_graph::LoggingObserver;
use scaffold_tools::{loaders, writers};
use std::process;

fn run() -> scaffold_tools::ToolResult<()> {
    let matches = clap_app!(("scaffold-tools") =>
        (version: "0.1.0")
        (about: "Merge scaffolded contigs by contracting a bidirected scaffold graph.")
        (@arg FASTA: +required "FASTA file of contig sequences")
        (@arg EDGES: +required "Scaffold edge TSV file")
        (@arg containment: --containment +takes_value "Optional well/interval containment file")
        (@arg min_support: --("min-support") +takes_value "Minimum read support to keep a scaffold edge [default: 3]")
        (@arg store_ordering: --("store-ordering") "Track which original contigs and coordinates fell into each merged vertex")
        (@arg out_prefix: --("out-prefix") +required +takes_value "Prefix for all output files")
    )
    .get_matches();

    let fasta = matches.value_of("FASTA").unwrap();
    let edges = matches.value_of("EDGES").unwrap();
    let containment = matches.value_of("containment");
    let min_support: u32 = matches
        .value_of("min_support")
        .map(|s| s.parse().unwrap_or(3))
        .unwrap_or(3);
    let store_ordering = matches.is_present("store_ordering");
    let out_prefix = matches.value_of("out_prefix").unwrap();

    log::info!("loading {} and {}", fasta, edges);
    let (mut graph, _contigs) =
        loaders::load_from_fasta_tsv(fasta, Some(edges), containment, min_support)?;
    log::info!(
        "loaded {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    let mut observer = LoggingObserver;
    let n = scaffold_graph::contract_edges(&mut graph, None, store_ordering, &mut observer)?;
    log::info!(
        "contracted {} edges, {} vertices remain",
        n,
        graph.vertex_count()
    );

    writers::write_fasta(&graph, format!("{}.fasta", out_prefix))?;
    writers::write_edges_tsv(&graph, format!("{}.edges.tsv", out_prefix))?;
    writers::write_containment(&graph, format!("{}.containment.tsv", out_prefix))?;
    if store_ordering {
        writers::write_ordering(&graph, format!("{}.ordering.tsv", out_prefix))?;
    }
    writers::write_gfa(&graph, format!("{}.gfa", out_prefix))?;
    writers::write_bandage_gfa(&graph, format!("{}.bandage.gfa", out_prefix))?;

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
