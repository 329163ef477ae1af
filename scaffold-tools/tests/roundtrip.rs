use scaffold_tools::{loaders, writers};
use std::fs;

fn unique_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("scaffold-tools-test-{}", name));
    let _ = fs::create_dir_all(&dir);
    dir
}

#[test]
fn scenario_7_tsv_round_trip() {
    let dir = unique_dir("scenario7");
    let fasta_path = dir.join("contigs.fasta");
    let edges_path = dir.join("edges.tsv");

    fs::write(&fasta_path, ">ctg1\nACGT\n>ctg2\nGGAA\n").unwrap();
    fs::write(&edges_path, "S\tctg1\tctg2\tR\tL\tS\t5\t10\n").unwrap();

    let (g, _) =
        loaders::load_from_fasta_tsv(&fasta_path, Some(&edges_path), None, 3).unwrap();
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 1);

    let out_tsv = dir.join("edges_out.tsv");
    writers::write_edges_tsv(&g, &out_tsv).unwrap();
    let written = fs::read_to_string(&out_tsv).unwrap();
    assert_eq!(written, "S\t0\t1\tR\tL\tS\t5\t10\n");
}

#[test]
fn scenario_8_duplicate_edge_records_sum_support() {
    let dir = unique_dir("scenario8");
    let fasta_path = dir.join("contigs.fasta");
    let edges_path = dir.join("edges.tsv");

    fs::write(&fasta_path, ">a\nAAAA\n>b\nCCCC\n").unwrap();
    fs::write(
        &edges_path,
        "S\ta\tb\tR\tL\tS\t3\t0\nS\ta\tb\tR\tL\tS\t2\t0\n",
    )
    .unwrap();

    let (g, _) =
        loaders::load_from_fasta_tsv(&fasta_path, Some(&edges_path), None, 3).unwrap();
    assert_eq!(g.edge_count(), 1);
    let e = g.edges().next().unwrap();
    assert_eq!(e.support(), Some(5));
}

#[test]
fn scenario_9_dangling_containment_record_is_skipped() {
    let dir = unique_dir("scenario9");
    let fasta_path = dir.join("contigs.fasta");
    let ctmt_path = dir.join("containment.tsv");

    fs::write(&fasta_path, ">a\nAAAA\n").unwrap();
    fs::write(&ctmt_path, "W\tghost\t1\t0\t2\nW\ta\t1\t0\t4\n").unwrap();

    let (mut g, contigs) = loaders::load_fasta(&fasta_path).unwrap();
    loaders::load_containment(&mut g, &ctmt_path, &contigs).unwrap();

    let a = *contigs.get("a").unwrap();
    assert_eq!(g.vertex(a).unwrap().well_interval(1), Some((0, 4)));
}

#[test]
fn min_support_filters_low_confidence_edges() {
    let dir = unique_dir("min_support");
    let fasta_path = dir.join("contigs.fasta");
    let edges_path = dir.join("edges.tsv");

    fs::write(&fasta_path, ">a\nAAAA\n>b\nCCCC\n").unwrap();
    fs::write(&edges_path, "S\ta\tb\tR\tL\tS\t1\t0\n").unwrap();

    let (g, _) =
        loaders::load_from_fasta_tsv(&fasta_path, Some(&edges_path), None, 3).unwrap();
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn fasta_round_trip_preserves_sequence() {
    let dir = unique_dir("fasta_rt");
    let fasta_path = dir.join("contigs.fasta");
    fs::write(&fasta_path, ">x\nacgtACGT\nacgt\n").unwrap();

    let (g, contigs) = loaders::load_fasta(&fasta_path).unwrap();
    let x = *contigs.get("x").unwrap();
    assert_eq!(g.vertex(x).unwrap().seq, b"ACGTACGTACGT");

    let out_path = dir.join("contigs_out.fasta");
    writers::write_fasta(&g, &out_path).unwrap();
    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(written, format!(">{}\nACGTACGTACGT\n", x));
}

#[test]
fn json_snapshot_round_trip() {
    let dir = unique_dir("json_rt");
    let fasta_path = dir.join("contigs.fasta");
    fs::write(&fasta_path, ">a\nAAAA\n>b\nCCCC\n").unwrap();

    let (g, _) = loaders::load_fasta(&fasta_path).unwrap();
    let json_path = dir.join("graph.json");
    writers::save_graph_json(&g, &json_path).unwrap();
    let reloaded = writers::load_graph_json(&json_path).unwrap();
    assert_eq!(reloaded.vertex_count(), g.vertex_count());
}
