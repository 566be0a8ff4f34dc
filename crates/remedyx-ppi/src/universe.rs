//! The gene universe: every gene identifier a computation run can touch,
//! deduplicated and assigned a dense matrix index.
//!
//! Ordering is lexicographic so that identical inputs always reproduce the
//! same index assignment, independent of input order or hash iteration
//! order. The persisted index CSV is the only way to interpret the binary
//! distance matrix; losing it makes the matrix meaningless.

use std::collections::BTreeSet;
use std::path::Path;

use ahash::AHashMap;
use tracing::info;

use remedyx_common::{RemedyxError, Result};

/// Ordered, deduplicated set of gene identifiers with a dense 0-based index.
///
/// Built once per distance-precomputation run and never mutated afterward;
/// a new universe requires recomputing the whole matrix.
#[derive(Debug, Clone)]
pub struct GeneUniverse {
    genes: Vec<String>,
    index: AHashMap<String, u32>,
}

impl GeneUniverse {
    /// Build a universe from any number of gene identifier sources.
    ///
    /// Identifiers are trimmed; empty strings are dropped. Returns
    /// `EmptyUniverse` if nothing remains, before any downstream file is
    /// allocated.
    pub fn build<I, S>(gene_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = gene_ids
            .into_iter()
            .filter_map(|g| {
                let g = g.as_ref().trim();
                if g.is_empty() {
                    None
                } else {
                    Some(g.to_string())
                }
            })
            .collect();

        if sorted.is_empty() {
            return Err(RemedyxError::EmptyUniverse);
        }

        let genes: Vec<String> = sorted.into_iter().collect();
        let index = genes
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i as u32))
            .collect();

        info!("Gene universe built: {} genes", genes.len());
        Ok(Self { genes, index })
    }

    /// Number of genes (the matrix dimension N).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Matrix index of a gene, if it is part of the universe.
    pub fn index_of(&self, gene_id: &str) -> Option<u32> {
        self.index.get(gene_id.trim()).copied()
    }

    /// Gene identifier at a matrix index.
    pub fn gene_at(&self, index: u32) -> Option<&str> {
        self.genes.get(index as usize).map(String::as_str)
    }

    /// All gene identifiers in index order.
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Persist the identifier -> index mapping as a two-column CSV.
    ///
    /// This companion file is mandatory for later interpretation of the
    /// distance matrix.
    pub fn write_index_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["gene_id", "index"])?;
        for (i, gene) in self.genes.iter().enumerate() {
            writer.write_record([gene.as_str(), &i.to_string()])?;
        }
        writer.flush().map_err(RemedyxError::Storage)?;
        info!("Gene index written: {} genes -> {}", self.genes.len(), path.display());
        Ok(())
    }

    /// Reload a persisted index mapping.
    ///
    /// Index values must form the contiguous range [0, N); anything else
    /// means the file does not belong to a matrix produced by this tool.
    pub fn read_index_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows: Vec<(String, u32)> = Vec::new();
        for record in reader.records() {
            let record = record?;
            let gene = record
                .get(0)
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .ok_or_else(|| {
                    RemedyxError::Config(format!("empty gene_id in index file {}", path.display()))
                })?;
            let idx: u32 = record
                .get(1)
                .and_then(|v| v.trim().parse().ok())
                .ok_or_else(|| {
                    RemedyxError::Config(format!(
                        "non-integer index for gene '{gene}' in {}",
                        path.display()
                    ))
                })?;
            rows.push((gene.to_string(), idx));
        }

        if rows.is_empty() {
            return Err(RemedyxError::EmptyUniverse);
        }

        rows.sort_by_key(|(_, idx)| *idx);
        for (position, (gene, idx)) in rows.iter().enumerate() {
            if *idx as usize != position {
                return Err(RemedyxError::Config(format!(
                    "gene index {} is not contiguous at gene '{gene}' (expected {position}, found {idx})",
                    path.display()
                )));
            }
        }

        let genes: Vec<String> = rows.into_iter().map(|(g, _)| g).collect();
        let index = genes
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i as u32))
            .collect();

        info!("Gene index loaded: {} genes from {}", genes.len(), path.display());
        Ok(Self { genes, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_sorts_and_dedups() {
        let u = GeneUniverse::build(["G2", "G1", " G2 ", "G3", "G1"]).unwrap();
        assert_eq!(u.genes(), &["G1", "G2", "G3"]);
        assert_eq!(u.index_of("G1"), Some(0));
        assert_eq!(u.index_of("G3"), Some(2));
        assert_eq!(u.index_of("G4"), None);
        assert_eq!(u.gene_at(1), Some("G2"));
    }

    #[test]
    fn build_is_order_independent() {
        let a = GeneUniverse::build(["B", "A", "C"]).unwrap();
        let b = GeneUniverse::build(["C", "B", "A"]).unwrap();
        assert_eq!(a.genes(), b.genes());
    }

    #[test]
    fn empty_universe_is_fatal() {
        let err = GeneUniverse::build(["", "  "]).unwrap_err();
        assert!(matches!(err, RemedyxError::EmptyUniverse));
    }

    #[test]
    fn index_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gene_index.csv");

        let u = GeneUniverse::build(["G3", "G1", "G2"]).unwrap();
        u.write_index_csv(&path).unwrap();

        let reloaded = GeneUniverse::read_index_csv(&path).unwrap();
        assert_eq!(reloaded.genes(), u.genes());
        assert_eq!(reloaded.index_of("G2"), Some(1));
    }

    #[test]
    fn non_contiguous_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gene_index.csv");
        std::fs::write(&path, "gene_id,index\nG1,0\nG2,2\n").unwrap();

        let err = GeneUniverse::read_index_csv(&path).unwrap_err();
        assert!(matches!(err, RemedyxError::Config(_)));
    }
}
