//! Weighted combination of overlap and proximity evidence into a single
//! ranked table.

use ahash::AHashMap;
use tracing::info;

use remedyx_common::{Disease, Drug};

use crate::overlap::OverlapRecord;
use crate::proximity::ProximityRecord;

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    pub drug_id: String,
    pub disease_id: String,
    /// 0 for pairs with proximity evidence but no shared gene.
    pub n_overlap: u32,
    pub overlapping_genes: Option<String>,
    pub jaccard: Option<f64>,
    /// +inf for pairs with overlap evidence but no proximity.
    pub mean_distance: f64,
    /// 0.0 for pairs with overlap evidence but no proximity.
    pub proximity_score: f64,
    /// n_overlap min-max normalized across the batch.
    pub norm_overlap: f64,
    /// `alpha * norm_overlap + beta * proximity_score`.
    pub combined_score: f64,
    pub drug_name: Option<String>,
    pub disease_name: Option<String>,
}

/// Full outer join of overlap and proximity evidence on
/// (drug_id, disease_id), weighted by `alpha` (overlap) and `beta`
/// (proximity).
///
/// n_overlap is min-max normalized across the batch; when every pair has
/// the same count the normalized value is 0 for all rows. Output is sorted
/// descending by (combined_score, proximity_score, n_overlap), ids
/// ascending as the final tie-break.
pub fn combine(
    overlap: &[OverlapRecord],
    proximity: &[ProximityRecord],
    alpha: f64,
    beta: f64,
) -> Vec<CombinedRecord> {
    let mut by_pair: AHashMap<(String, String), CombinedRecord> = AHashMap::new();

    for rec in proximity {
        by_pair.insert(
            (rec.drug_id.clone(), rec.disease_id.clone()),
            CombinedRecord {
                drug_id: rec.drug_id.clone(),
                disease_id: rec.disease_id.clone(),
                n_overlap: 0,
                overlapping_genes: None,
                jaccard: None,
                mean_distance: rec.mean_distance,
                proximity_score: rec.proximity_score,
                norm_overlap: 0.0,
                combined_score: 0.0,
                drug_name: None,
                disease_name: None,
            },
        );
    }

    for rec in overlap {
        let entry = by_pair
            .entry((rec.drug_id.clone(), rec.disease_id.clone()))
            .or_insert_with(|| CombinedRecord {
                drug_id: rec.drug_id.clone(),
                disease_id: rec.disease_id.clone(),
                n_overlap: 0,
                overlapping_genes: None,
                jaccard: None,
                // unmatched side of the outer join
                mean_distance: f64::INFINITY,
                proximity_score: 0.0,
                norm_overlap: 0.0,
                combined_score: 0.0,
                drug_name: None,
                disease_name: None,
            });
        entry.n_overlap = rec.n_overlap;
        entry.overlapping_genes = Some(rec.overlapping_genes.clone());
        entry.jaccard = Some(rec.jaccard);
    }

    let mut records: Vec<CombinedRecord> = by_pair.into_iter().map(|(_, rec)| rec).collect();

    let min = records.iter().map(|r| r.n_overlap).min().unwrap_or(0);
    let max = records.iter().map(|r| r.n_overlap).max().unwrap_or(0);
    let span = max.saturating_sub(min);

    for rec in &mut records {
        // degenerate batch (max == min) normalizes to 0 for every row
        rec.norm_overlap = if span == 0 {
            0.0
        } else {
            (rec.n_overlap - min) as f64 / span as f64
        };
        rec.combined_score = alpha * rec.norm_overlap + beta * rec.proximity_score;
    }

    records.sort_by(|a, b| {
        b.combined_score
            .total_cmp(&a.combined_score)
            .then_with(|| b.proximity_score.total_cmp(&a.proximity_score))
            .then_with(|| b.n_overlap.cmp(&a.n_overlap))
            .then_with(|| a.drug_id.cmp(&b.drug_id))
            .then_with(|| a.disease_id.cmp(&b.disease_id))
    });

    info!("Combined ranking: {} pairs", records.len());
    records
}

/// Attach human-readable drug and disease names to a ranked table.
pub fn attach_entity_names(records: &mut [CombinedRecord], drugs: &[Drug], diseases: &[Disease]) {
    let drug_names: AHashMap<&str, &str> = drugs
        .iter()
        .map(|d| (d.id.as_str(), d.name.as_str()))
        .collect();
    let disease_names: AHashMap<&str, &str> = diseases
        .iter()
        .map(|d| (d.id.as_str(), d.name.as_str()))
        .collect();

    for rec in records {
        rec.drug_name = drug_names.get(rec.drug_id.as_str()).map(|n| n.to_string());
        rec.disease_name = disease_names
            .get(rec.disease_id.as_str())
            .map(|n| n.to_string());
    }
}
