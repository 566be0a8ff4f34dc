//! PPI network proximity between drug targets and disease genes.
//!
//! Two backends share the same semantics: [`ProximityScorer`] reads a
//! precomputed memory-mapped distance matrix (the scalable path), while
//! [`network_proximity`] walks a small in-memory graph directly. Both
//! filter sentinel entries ("no path" is excluded from the average rather
//! than penalized with a capped finite value), return +infinity when no
//! finite distance is available, and map mean distance to a proximity
//! score with `1 / (1 + mean)`, where `1 / (1 + inf) = 0`. Zero proximity
//! is reserved exactly for "no evidence".

use std::collections::VecDeque;

use ahash::AHashMap;
use tracing::info;

use remedyx_common::Result;
use remedyx_ppi::{DistanceMatrix, GeneUniverse, PpiGraph, NO_PATH};

use crate::maps::GeneSetMap;

/// Proximity evidence for one (drug, disease) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityRecord {
    pub drug_id: String,
    pub disease_id: String,
    /// Mean shortest-path distance over reachable gene pairs, or +inf.
    pub mean_distance: f64,
    /// `1 / (1 + mean_distance)`, in (0, 1]; 0.0 means no evidence.
    pub proximity_score: f64,
}

/// Map a mean distance to a proximity score.
pub fn proximity_from_mean(mean_distance: f64) -> f64 {
    if mean_distance.is_infinite() {
        0.0
    } else {
        1.0 / (1.0 + mean_distance)
    }
}

// ---------------------------------------------------------------------------
// Matrix-backed scorer
// ---------------------------------------------------------------------------

/// Batch-friendly scorer over a precomputed distance matrix.
///
/// The gene-set maps and the universe are borrowed once and reused across
/// every scored pair, so large batches never re-derive them.
pub struct ProximityScorer<'a> {
    matrix: &'a DistanceMatrix,
    universe: &'a GeneUniverse,
    drug_to_genes: &'a GeneSetMap,
    disease_to_genes: &'a GeneSetMap,
}

impl<'a> ProximityScorer<'a> {
    pub fn new(
        matrix: &'a DistanceMatrix,
        universe: &'a GeneUniverse,
        drug_to_genes: &'a GeneSetMap,
        disease_to_genes: &'a GeneSetMap,
    ) -> Self {
        Self {
            matrix,
            universe,
            drug_to_genes,
            disease_to_genes,
        }
    }

    /// Indices of a gene set's members that exist in the universe. Genes
    /// absent from the universe are expected and dropped silently.
    fn universe_indices(&self, genes: &std::collections::BTreeSet<String>) -> Vec<usize> {
        genes
            .iter()
            .filter_map(|g| self.universe.index_of(g))
            .map(|i| i as usize)
            .collect()
    }

    /// Mean shortest-path distance for one pair, +inf when either side has
    /// no usable genes or nothing is reachable. The matrix is not touched
    /// unless both sides map to at least one universe index.
    pub fn mean_distance(&self, drug_id: &str, disease_id: &str) -> Result<f64> {
        let (Some(drug_genes), Some(disease_genes)) = (
            self.drug_to_genes.get(drug_id),
            self.disease_to_genes.get(disease_id),
        ) else {
            return Ok(f64::INFINITY);
        };

        let drug_idx = self.universe_indices(drug_genes);
        let disease_idx = self.universe_indices(disease_genes);
        if drug_idx.is_empty() || disease_idx.is_empty() {
            return Ok(f64::INFINITY);
        }

        let mut sum = 0u64;
        let mut count = 0u64;
        for &i in &drug_idx {
            let row = self.matrix.row(i)?;
            for &j in &disease_idx {
                let d = row.get(j)?;
                if d < NO_PATH {
                    sum += d as u64;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Ok(f64::INFINITY);
        }
        Ok(sum as f64 / count as f64)
    }

    /// Score one pair.
    pub fn score_pair(&self, drug_id: &str, disease_id: &str) -> Result<ProximityRecord> {
        let mean_distance = self.mean_distance(drug_id, disease_id)?;
        Ok(ProximityRecord {
            drug_id: drug_id.to_string(),
            disease_id: disease_id.to_string(),
            mean_distance,
            proximity_score: proximity_from_mean(mean_distance),
        })
    }

    /// Score a batch of pairs, logging progress every `chunk_size` rows.
    pub fn score_pairs(
        &self,
        pairs: &[(String, String)],
        chunk_size: usize,
    ) -> Result<Vec<ProximityRecord>> {
        let total = pairs.len();
        info!("Annotating {total} pairs with PPI proximity");

        let mut records = Vec::with_capacity(total);
        for (start, chunk) in pairs.chunks(chunk_size.max(1)).enumerate() {
            for (drug_id, disease_id) in chunk {
                records.push(self.score_pair(drug_id, disease_id)?);
            }
            let done = (start * chunk_size.max(1) + chunk.len()).min(total);
            info!("Processed {done}/{total} pairs");
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Graph-direct proximity (matrix-free path for small inputs)
// ---------------------------------------------------------------------------

/// Proximity for every drug x disease combination, traversing the graph
/// directly instead of a precomputed matrix.
///
/// BFS runs once per distinct drug target gene; the resulting distance
/// rows are cached and shared across all pairs. Output is sorted by
/// (proximity desc, drug_id, disease_id).
pub fn network_proximity(
    graph: &PpiGraph,
    universe: &GeneUniverse,
    drug_to_genes: &GeneSetMap,
    disease_to_genes: &GeneSetMap,
) -> Vec<ProximityRecord> {
    // Distance rows from every gene that is a target of some drug.
    let mut rows: AHashMap<u32, Vec<u16>> = AHashMap::new();
    for genes in drug_to_genes.values() {
        for gene in genes {
            if let Some(i) = universe.index_of(gene) {
                rows.entry(i)
                    .or_insert_with(|| bfs_distances(graph, universe.len(), i));
            }
        }
    }

    let mut records: Vec<ProximityRecord> = Vec::new();
    for (drug_id, drug_genes) in drug_to_genes {
        let drug_idx: Vec<u32> = drug_genes
            .iter()
            .filter_map(|g| universe.index_of(g))
            .collect();
        for (disease_id, disease_genes) in disease_to_genes {
            let disease_idx: Vec<u32> = disease_genes
                .iter()
                .filter_map(|g| universe.index_of(g))
                .collect();

            let mut sum = 0u64;
            let mut count = 0u64;
            for i in &drug_idx {
                let Some(row) = rows.get(i) else { continue };
                for &j in &disease_idx {
                    let d = row[j as usize];
                    if d < NO_PATH {
                        sum += d as u64;
                        count += 1;
                    }
                }
            }

            let mean_distance = if count == 0 {
                f64::INFINITY
            } else {
                sum as f64 / count as f64
            };
            records.push(ProximityRecord {
                drug_id: drug_id.clone(),
                disease_id: disease_id.clone(),
                mean_distance,
                proximity_score: proximity_from_mean(mean_distance),
            });
        }
    }

    records.sort_by(|a, b| {
        b.proximity_score
            .total_cmp(&a.proximity_score)
            .then_with(|| a.drug_id.cmp(&b.drug_id))
            .then_with(|| a.disease_id.cmp(&b.disease_id))
    });
    records
}

/// Single-source BFS returning a full distance row (sentinel for
/// unreachable genes, 0 on the diagonal).
fn bfs_distances(graph: &PpiGraph, n: usize, source: u32) -> Vec<u16> {
    let mut dist = vec![NO_PATH; n];
    dist[source as usize] = 0;
    if !graph.contains(source) {
        return dist;
    }
    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(u) = queue.pop_front() {
        let d = dist[u as usize];
        if d >= NO_PATH - 1 {
            continue;
        }
        for &v in graph.neighbors(u) {
            if dist[v as usize] == NO_PATH {
                dist[v as usize] = d + 1;
                queue.push_back(v);
            }
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_transform_bounds() {
        assert_eq!(proximity_from_mean(0.0), 1.0);
        assert_eq!(proximity_from_mean(f64::INFINITY), 0.0);
        // strictly decreasing
        assert!(proximity_from_mean(1.0) > proximity_from_mean(2.0));
        assert!(proximity_from_mean(2.0) > proximity_from_mean(100.0));
        assert!(proximity_from_mean(100.0) > 0.0);
    }
}
