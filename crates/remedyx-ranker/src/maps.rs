//! Grouping of raw association records into per-entity gene sets.

use std::collections::BTreeSet;

use ahash::AHashMap;

use remedyx_common::{DrugTargetAssoc, GeneDiseaseAssoc};

/// Entity id -> set of gene ids. BTreeSet keeps iteration deterministic for
/// downstream joins and reports.
pub type GeneSetMap = AHashMap<String, BTreeSet<String>>;

/// Group drug-target associations into drug_id -> target gene set.
pub fn build_drug_target_map(drug_targets: &[DrugTargetAssoc]) -> GeneSetMap {
    let mut mapping = GeneSetMap::new();
    for assoc in drug_targets {
        mapping
            .entry(assoc.drug_id.clone())
            .or_default()
            .insert(assoc.gene_id.clone());
    }
    mapping
}

/// Group gene-disease associations into disease_id -> associated gene set.
pub fn build_disease_gene_map(gene_diseases: &[GeneDiseaseAssoc]) -> GeneSetMap {
    let mut mapping = GeneSetMap::new();
    for assoc in gene_diseases {
        mapping
            .entry(assoc.disease_id.clone())
            .or_default()
            .insert(assoc.gene_id.clone());
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drug_map_groups_and_dedups() {
        let assocs = vec![
            DrugTargetAssoc {
                drug_id: "D1".into(),
                gene_id: "G1".into(),
                source: "test".into(),
                score: None,
            },
            DrugTargetAssoc {
                drug_id: "D1".into(),
                gene_id: "G2".into(),
                source: "test".into(),
                score: None,
            },
            DrugTargetAssoc {
                drug_id: "D1".into(),
                gene_id: "G1".into(),
                source: "test".into(),
                score: Some(0.5),
            },
        ];
        let map = build_drug_target_map(&assocs);
        assert_eq!(map.len(), 1);
        let genes: Vec<&str> = map.get("D1").unwrap().iter().map(String::as_str).collect();
        assert_eq!(genes, vec!["G1", "G2"]);
    }
}
