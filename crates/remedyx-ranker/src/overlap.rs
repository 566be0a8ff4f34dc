//! Gene-overlap evidence between drug targets and disease genes.
//!
//! Implemented as a join on gene_id rather than a nested loop over every
//! drug x disease combination, so pairs with no shared gene are never
//! materialized.

use std::collections::BTreeSet;

use ahash::AHashMap;
use tracing::info;

use remedyx_common::{DrugTargetAssoc, GeneDiseaseAssoc};

/// Overlap evidence for one (drug, disease) pair with at least one shared
/// gene.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapRecord {
    pub drug_id: String,
    pub disease_id: String,
    /// Number of distinct genes shared between drug targets and disease
    /// genes.
    pub n_overlap: u32,
    /// Semicolon-joined, sorted list of the shared gene ids.
    pub overlapping_genes: String,
    /// Jaccard index |intersection| / |union| of the two gene sets.
    pub jaccard: f64,
}

/// Compute overlap evidence for all drug-disease pairs sharing a gene.
///
/// Output is sorted by (n_overlap desc, jaccard desc, drug_id, disease_id).
pub fn compute_overlap_table(
    drug_targets: &[DrugTargetAssoc],
    gene_diseases: &[GeneDiseaseAssoc],
) -> Vec<OverlapRecord> {
    if drug_targets.is_empty() || gene_diseases.is_empty() {
        return Vec::new();
    }

    // Distinct gene sets per entity (for the Jaccard denominator).
    let mut drug_genes: AHashMap<&str, BTreeSet<&str>> = AHashMap::new();
    for a in drug_targets {
        drug_genes
            .entry(a.drug_id.as_str())
            .or_default()
            .insert(a.gene_id.as_str());
    }
    let mut disease_genes: AHashMap<&str, BTreeSet<&str>> = AHashMap::new();
    for a in gene_diseases {
        disease_genes
            .entry(a.disease_id.as_str())
            .or_default()
            .insert(a.gene_id.as_str());
    }

    // Join on gene_id: gene -> diseases carrying it, then walk drug targets.
    let mut gene_to_diseases: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for a in gene_diseases {
        let diseases = gene_to_diseases.entry(a.gene_id.as_str()).or_default();
        if !diseases.contains(&a.disease_id.as_str()) {
            diseases.push(a.disease_id.as_str());
        }
    }

    let mut shared: AHashMap<(&str, &str), BTreeSet<&str>> = AHashMap::new();
    for (&drug_id, genes) in &drug_genes {
        for &gene in genes {
            if let Some(diseases) = gene_to_diseases.get(gene) {
                for &disease_id in diseases {
                    shared
                        .entry((drug_id, disease_id))
                        .or_default()
                        .insert(gene);
                }
            }
        }
    }

    let mut records: Vec<OverlapRecord> = shared
        .into_iter()
        .map(|((drug_id, disease_id), genes)| {
            let n_overlap = genes.len() as u32;
            let n_drug = drug_genes.get(drug_id).map_or(0, BTreeSet::len);
            let n_disease = disease_genes.get(disease_id).map_or(0, BTreeSet::len);
            let union = n_drug + n_disease - n_overlap as usize;
            let overlapping_genes = genes.into_iter().collect::<Vec<_>>().join(";");
            OverlapRecord {
                drug_id: drug_id.to_string(),
                disease_id: disease_id.to_string(),
                n_overlap,
                overlapping_genes,
                jaccard: n_overlap as f64 / union as f64,
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.n_overlap
            .cmp(&a.n_overlap)
            .then_with(|| b.jaccard.total_cmp(&a.jaccard))
            .then_with(|| a.drug_id.cmp(&b.drug_id))
            .then_with(|| a.disease_id.cmp(&b.disease_id))
    });

    info!("Overlap table: {} pairs with shared genes", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(drug: &str, gene: &str) -> DrugTargetAssoc {
        DrugTargetAssoc {
            drug_id: drug.into(),
            gene_id: gene.into(),
            source: "test".into(),
            score: None,
        }
    }

    fn gd(gene: &str, disease: &str) -> GeneDiseaseAssoc {
        GeneDiseaseAssoc {
            gene_id: gene.into(),
            disease_id: disease.into(),
            source: "test".into(),
            score: None,
        }
    }

    #[test]
    fn two_gene_overlap() {
        // D1 targets G1,G2; DIS1 involves G1,G2,G3
        let table = compute_overlap_table(
            &[dt("D1", "G1"), dt("D1", "G2")],
            &[gd("G1", "DIS1"), gd("G2", "DIS1"), gd("G3", "DIS1")],
        );
        assert_eq!(table.len(), 1);
        let rec = &table[0];
        assert_eq!(rec.n_overlap, 2);
        assert_eq!(rec.overlapping_genes, "G1;G2");
        assert!((rec.jaccard - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn pairs_without_shared_genes_are_omitted() {
        let table = compute_overlap_table(&[dt("D1", "G1")], &[gd("G2", "DIS1")]);
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_associations_count_once() {
        let table = compute_overlap_table(
            &[dt("D1", "G1"), dt("D1", "G1")],
            &[gd("G1", "DIS1"), gd("G1", "DIS1")],
        );
        assert_eq!(table[0].n_overlap, 1);
        assert!((table[0].jaccard - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sorted_by_overlap_then_jaccard() {
        let table = compute_overlap_table(
            &[
                dt("D1", "G1"),
                dt("D2", "G1"),
                dt("D2", "G2"),
                dt("D3", "G1"),
                dt("D3", "G9"),
            ],
            &[gd("G1", "DIS1"), gd("G2", "DIS1")],
        );
        // D2 shares 2 genes; D1 (jaccard 1/2) beats D3 (jaccard 1/3)
        let order: Vec<&str> = table.iter().map(|r| r.drug_id.as_str()).collect();
        assert_eq!(order, vec!["D2", "D1", "D3"]);
    }
}
