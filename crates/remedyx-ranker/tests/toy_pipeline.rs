//! End-to-end ranking over a small in-memory toy dataset, graph-direct
//! proximity path (no precomputed matrix).

use remedyx_common::{Disease, Drug, DrugTargetAssoc, GeneDiseaseAssoc, GeneGeneInteraction};
use remedyx_ppi::{GeneUniverse, PpiGraph};
use remedyx_ranker::{
    attach_entity_names, build_disease_gene_map, build_drug_target_map, combine,
    compute_overlap_table, network_proximity,
};

fn dt(drug: &str, gene: &str) -> DrugTargetAssoc {
    DrugTargetAssoc {
        drug_id: drug.into(),
        gene_id: gene.into(),
        source: "toy".into(),
        score: None,
    }
}

fn gd(gene: &str, disease: &str) -> GeneDiseaseAssoc {
    GeneDiseaseAssoc {
        gene_id: gene.into(),
        disease_id: disease.into(),
        source: "toy".into(),
        score: None,
    }
}

fn inter(a: &str, b: &str) -> GeneGeneInteraction {
    GeneGeneInteraction {
        gene1_id: a.into(),
        gene2_id: b.into(),
        weight: Some(0.9),
        source: "toy".into(),
    }
}

#[test]
fn toy_ranking_end_to_end() {
    // D1 targets G1,G2; D2 targets G3. DIS1 involves G1,G2; DIS2 involves G4.
    // PPI: G1-G2, G2-G3, G3-G4.
    let drug_targets = vec![dt("D1", "G1"), dt("D1", "G2"), dt("D2", "G3")];
    let gene_diseases = vec![gd("G1", "DIS1"), gd("G2", "DIS1"), gd("G4", "DIS2")];
    let interactions = vec![inter("G1", "G2"), inter("G2", "G3"), inter("G3", "G4")];

    let universe = GeneUniverse::build(
        interactions
            .iter()
            .flat_map(|i| [i.gene1_id.as_str(), i.gene2_id.as_str()])
            .chain(drug_targets.iter().map(|a| a.gene_id.as_str()))
            .chain(gene_diseases.iter().map(|a| a.gene_id.as_str())),
    )
    .unwrap();
    let graph = PpiGraph::from_interactions(&universe, &interactions);

    let drug_to_genes = build_drug_target_map(&drug_targets);
    let disease_to_genes = build_disease_gene_map(&gene_diseases);

    let overlap = compute_overlap_table(&drug_targets, &gene_diseases);
    assert_eq!(overlap.len(), 1);
    assert_eq!(overlap[0].drug_id, "D1");
    assert_eq!(overlap[0].disease_id, "DIS1");
    assert_eq!(overlap[0].n_overlap, 2);

    let proximity = network_proximity(&graph, &universe, &drug_to_genes, &disease_to_genes);
    // every drug x disease combination is scored
    assert_eq!(proximity.len(), 4);

    // D1 x DIS1: entries G1-G1=0, G1-G2=1, G2-G1=1, G2-G2=0 -> mean 0.5
    let d1_dis1 = proximity
        .iter()
        .find(|r| r.drug_id == "D1" && r.disease_id == "DIS1")
        .unwrap();
    assert!((d1_dis1.mean_distance - 0.5).abs() < 1e-12);

    // D2 x DIS2: G3-G4 = 1
    let d2_dis2 = proximity
        .iter()
        .find(|r| r.drug_id == "D2" && r.disease_id == "DIS2")
        .unwrap();
    assert!((d2_dis2.mean_distance - 1.0).abs() < 1e-12);

    let mut combined = combine(&overlap, &proximity, 1.0, 1.0);
    assert_eq!(combined.len(), 4);
    // D1 x DIS1 has both overlap and best proximity: ranked first
    assert_eq!(combined[0].drug_id, "D1");
    assert_eq!(combined[0].disease_id, "DIS1");
    assert!(combined[0].combined_score > combined[1].combined_score);

    let drugs = vec![
        Drug {
            id: "D1".into(),
            name: "Alphacillin".into(),
        },
        Drug {
            id: "D2".into(),
            name: "Betamab".into(),
        },
    ];
    let diseases = vec![Disease {
        id: "DIS1".into(),
        name: "Asthma".into(),
    }];
    attach_entity_names(&mut combined, &drugs, &diseases);
    assert_eq!(combined[0].drug_name.as_deref(), Some("Alphacillin"));
    let dis2_row = combined.iter().find(|r| r.disease_id == "DIS2").unwrap();
    assert!(dis2_row.disease_name.is_none());
}
