//! Matrix-backed proximity scoring against a real precomputed matrix.

use std::collections::BTreeSet;

use remedyx_common::GeneGeneInteraction;
use remedyx_ppi::{compute_all_pairs, DistanceMatrix, GeneUniverse, MatrixWriter, PpiGraph};
use remedyx_ranker::{GeneSetMap, ProximityScorer};

fn inter(a: &str, b: &str) -> GeneGeneInteraction {
    GeneGeneInteraction {
        gene1_id: a.to_string(),
        gene2_id: b.to_string(),
        weight: None,
        source: "test".to_string(),
    }
}

fn gene_set(genes: &[&str]) -> BTreeSet<String> {
    genes.iter().map(|g| g.to_string()).collect()
}

/// Path A - B - M - C: distances A-B=1, B-C=2, A-C=3.
fn setup(dir: &std::path::Path) -> (GeneUniverse, DistanceMatrix) {
    let universe = GeneUniverse::build(["A", "B", "C", "M"]).unwrap();
    let graph = PpiGraph::from_interactions(
        &universe,
        &[inter("A", "B"), inter("B", "M"), inter("M", "C")],
    );
    let path = dir.join("dist.u16");
    let mut writer = MatrixWriter::allocate(&path, universe.len()).unwrap();
    compute_all_pairs(&graph, &mut writer, None);
    writer.finish().unwrap();
    let matrix = DistanceMatrix::open(&path, universe.len()).unwrap();
    (universe, matrix)
}

#[test]
fn worked_example_mean_and_proximity() {
    let dir = tempfile::tempdir().unwrap();
    let (universe, matrix) = setup(dir.path());

    let mut drug_to_genes = GeneSetMap::new();
    drug_to_genes.insert("D".to_string(), gene_set(&["A", "B"]));
    let mut disease_to_genes = GeneSetMap::new();
    disease_to_genes.insert("X".to_string(), gene_set(&["B", "C"]));

    let scorer = ProximityScorer::new(&matrix, &universe, &drug_to_genes, &disease_to_genes);
    let rec = scorer.score_pair("D", "X").unwrap();

    // entries: A-B=1, A-C=3, B-B=0, B-C=2 -> mean 1.5
    assert!((rec.mean_distance - 1.5).abs() < 1e-12);
    assert!((rec.proximity_score - 0.4).abs() < 1e-12);
}

#[test]
fn unknown_drug_scores_no_evidence() {
    let dir = tempfile::tempdir().unwrap();
    let (universe, matrix) = setup(dir.path());

    let drug_to_genes = GeneSetMap::new();
    let mut disease_to_genes = GeneSetMap::new();
    disease_to_genes.insert("X".to_string(), gene_set(&["B", "C"]));

    let scorer = ProximityScorer::new(&matrix, &universe, &drug_to_genes, &disease_to_genes);
    let rec = scorer.score_pair("D", "X").unwrap();
    assert!(rec.mean_distance.is_infinite());
    assert_eq!(rec.proximity_score, 0.0);
}

#[test]
fn genes_outside_universe_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let (universe, matrix) = setup(dir.path());

    let mut drug_to_genes = GeneSetMap::new();
    drug_to_genes.insert("D".to_string(), gene_set(&["A", "NOT_A_GENE"]));
    let mut disease_to_genes = GeneSetMap::new();
    disease_to_genes.insert("X".to_string(), gene_set(&["B"]));

    let scorer = ProximityScorer::new(&matrix, &universe, &drug_to_genes, &disease_to_genes);
    let rec = scorer.score_pair("D", "X").unwrap();
    // only A-B=1 remains
    assert!((rec.mean_distance - 1.0).abs() < 1e-12);
    assert!((rec.proximity_score - 0.5).abs() < 1e-12);
}

#[test]
fn only_unknown_genes_means_no_matrix_evidence() {
    let dir = tempfile::tempdir().unwrap();
    let (universe, matrix) = setup(dir.path());

    let mut drug_to_genes = GeneSetMap::new();
    drug_to_genes.insert("D".to_string(), gene_set(&["NOPE1", "NOPE2"]));
    let mut disease_to_genes = GeneSetMap::new();
    disease_to_genes.insert("X".to_string(), gene_set(&["B"]));

    let scorer = ProximityScorer::new(&matrix, &universe, &drug_to_genes, &disease_to_genes);
    let rec = scorer.score_pair("D", "X").unwrap();
    assert!(rec.mean_distance.is_infinite());
    assert_eq!(rec.proximity_score, 0.0);
}

#[test]
fn batch_scoring_matches_point_scoring() {
    let dir = tempfile::tempdir().unwrap();
    let (universe, matrix) = setup(dir.path());

    let mut drug_to_genes = GeneSetMap::new();
    drug_to_genes.insert("D1".to_string(), gene_set(&["A"]));
    drug_to_genes.insert("D2".to_string(), gene_set(&["C"]));
    let mut disease_to_genes = GeneSetMap::new();
    disease_to_genes.insert("X".to_string(), gene_set(&["B"]));

    let scorer = ProximityScorer::new(&matrix, &universe, &drug_to_genes, &disease_to_genes);
    let pairs = vec![
        ("D1".to_string(), "X".to_string()),
        ("D2".to_string(), "X".to_string()),
        ("D404".to_string(), "X".to_string()),
    ];
    let records = scorer.score_pairs(&pairs, 2).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].mean_distance, 1.0);
    assert_eq!(records[1].mean_distance, 2.0);
    assert!(records[2].mean_distance.is_infinite());
}
