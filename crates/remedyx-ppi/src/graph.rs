//! Undirected PPI graph over gene universe indices.
//!
//! Construction cleanup: self-loops are dropped, duplicate and reversed
//! edges collapse to a single edge per unordered pair, and when the source
//! data supplies a weight for the same pair more than once the maximum
//! value wins. Weights are informational only; traversal treats every edge
//! as cost 1.

use ahash::AHashMap;
use tracing::{debug, info};

use remedyx_common::GeneGeneInteraction;

use crate::universe::GeneUniverse;

/// In-memory adjacency-list graph, indexed by universe index.
///
/// Genes in the universe that never appear in an interaction simply have an
/// empty neighbour list and are reported as absent by [`PpiGraph::contains`].
#[derive(Debug, Clone)]
pub struct PpiGraph {
    adjacency: Vec<Vec<u32>>,
    weights: AHashMap<(u32, u32), f64>,
    in_graph: Vec<bool>,
    node_count: usize,
    edge_count: usize,
}

impl PpiGraph {
    /// Build the graph from interaction records.
    ///
    /// Interactions referring to genes outside the universe are skipped
    /// (the universe is normally built from the same edge list, so this
    /// only happens when the caller mixes inputs from different runs).
    pub fn from_interactions(
        universe: &GeneUniverse,
        interactions: &[GeneGeneInteraction],
    ) -> Self {
        let n = universe.len();
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut weights: AHashMap<(u32, u32), f64> = AHashMap::new();
        let mut in_graph = vec![false; n];
        let mut skipped = 0usize;

        for inter in interactions {
            let g1 = inter.gene1_id.trim();
            let g2 = inter.gene2_id.trim();
            if g1.is_empty() || g2.is_empty() || g1 == g2 {
                skipped += 1;
                continue;
            }
            let (Some(a), Some(b)) = (universe.index_of(g1), universe.index_of(g2)) else {
                skipped += 1;
                continue;
            };

            let key = (a.min(b), a.max(b));
            match weights.get_mut(&key) {
                Some(existing) => {
                    // duplicate pair: keep the maximum observed weight
                    if let Some(w) = inter.weight {
                        if w > *existing {
                            *existing = w;
                        }
                    }
                }
                None => {
                    weights.insert(key, inter.weight.unwrap_or(1.0));
                    adjacency[a as usize].push(b);
                    adjacency[b as usize].push(a);
                    in_graph[a as usize] = true;
                    in_graph[b as usize] = true;
                }
            }
        }

        // Deterministic neighbour order regardless of input order.
        for neighbours in &mut adjacency {
            neighbours.sort_unstable();
        }

        let node_count = in_graph.iter().filter(|&&present| present).count();
        let edge_count = weights.len();

        if skipped > 0 {
            debug!("Dropped {skipped} interactions (self-loops, blanks, or unknown genes)");
        }
        info!("PPI graph: {node_count} nodes, {edge_count} edges");

        Self {
            adjacency,
            weights,
            in_graph,
            node_count,
            edge_count,
        }
    }

    /// Neighbours of a universe index (empty slice for isolated genes).
    pub fn neighbors(&self, index: u32) -> &[u32] {
        self.adjacency
            .get(index as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the gene at this universe index participates in any edge.
    pub fn contains(&self, index: u32) -> bool {
        self.in_graph.get(index as usize).copied().unwrap_or(false)
    }

    /// Weight recorded for an unordered gene pair, if the edge exists.
    pub fn weight(&self, a: u32, b: u32) -> Option<f64> {
        self.weights.get(&(a.min(b), a.max(b))).copied()
    }

    /// Number of genes with at least one edge.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of distinct unordered edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedyx_common::GeneGeneInteraction;

    fn inter(a: &str, b: &str, w: Option<f64>) -> GeneGeneInteraction {
        GeneGeneInteraction {
            gene1_id: a.to_string(),
            gene2_id: b.to_string(),
            weight: w,
            source: "test".to_string(),
        }
    }

    #[test]
    fn reversed_duplicate_collapses_to_one_edge() {
        let u = GeneUniverse::build(["A", "B"]).unwrap();
        let g = PpiGraph::from_interactions(&u, &[inter("A", "B", None), inter("B", "A", None)]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn self_loops_are_dropped() {
        let u = GeneUniverse::build(["A", "B"]).unwrap();
        let g = PpiGraph::from_interactions(&u, &[inter("A", "A", None), inter("A", "B", None)]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(0), &[1]);
    }

    #[test]
    fn duplicate_weight_takes_maximum() {
        let u = GeneUniverse::build(["A", "B"]).unwrap();
        let g = PpiGraph::from_interactions(
            &u,
            &[inter("A", "B", Some(0.3)), inter("B", "A", Some(0.9))],
        );
        assert_eq!(g.weight(0, 1), Some(0.9));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn isolated_universe_genes_are_absent_from_graph() {
        let u = GeneUniverse::build(["A", "B", "C"]).unwrap();
        let g = PpiGraph::from_interactions(&u, &[inter("A", "B", None)]);
        let c = u.index_of("C").unwrap();
        assert!(!g.contains(c));
        assert!(g.neighbors(c).is_empty());
        assert_eq!(g.node_count(), 2);
    }
}
