//! File paths and column-name configuration for CSV inputs.
//!
//! Defaults match the standard schema (`drug_id`, `gene_id`, ...); every
//! column can be overridden for upstream exports that use different
//! headers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for loading all pipeline inputs from CSV files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvFilesConfig {
    // File paths
    pub drugs_csv: PathBuf,
    pub genes_csv: PathBuf,
    pub diseases_csv: PathBuf,
    pub drug_targets_csv: PathBuf,
    pub gene_disease_csv: PathBuf,
    pub ppi_csv: Option<PathBuf>,

    // Drugs: [drug_id_col, drug_name_col]
    pub drug_id_col: String,
    pub drug_name_col: String,

    // Genes: [gene_id_col, gene_symbol_col]
    pub gene_id_col: String,
    pub gene_symbol_col: String,

    // Diseases: [disease_id_col, disease_name_col]
    pub disease_id_col: String,
    pub disease_name_col: String,

    // Drug-target associations
    pub dt_drug_id_col: String,
    pub dt_gene_id_col: String,
    pub dt_score_col: Option<String>,

    // Gene-disease associations
    pub gd_gene_id_col: String,
    pub gd_disease_id_col: String,
    pub gd_score_col: Option<String>,

    // PPI / gene-gene interactions
    pub ppi_gene1_col: String,
    pub ppi_gene2_col: String,
    pub ppi_weight_col: Option<String>,
}

impl CsvFilesConfig {
    /// Config with default column names for the given file paths.
    pub fn new(
        drugs_csv: impl Into<PathBuf>,
        genes_csv: impl Into<PathBuf>,
        diseases_csv: impl Into<PathBuf>,
        drug_targets_csv: impl Into<PathBuf>,
        gene_disease_csv: impl Into<PathBuf>,
        ppi_csv: Option<PathBuf>,
    ) -> Self {
        Self {
            drugs_csv: drugs_csv.into(),
            genes_csv: genes_csv.into(),
            diseases_csv: diseases_csv.into(),
            drug_targets_csv: drug_targets_csv.into(),
            gene_disease_csv: gene_disease_csv.into(),
            ppi_csv,
            drug_id_col: "drug_id".to_string(),
            drug_name_col: "drug_name".to_string(),
            gene_id_col: "gene_id".to_string(),
            gene_symbol_col: "symbol".to_string(),
            disease_id_col: "disease_id".to_string(),
            disease_name_col: "disease_name".to_string(),
            dt_drug_id_col: "drug_id".to_string(),
            dt_gene_id_col: "gene_id".to_string(),
            dt_score_col: Some("score".to_string()),
            gd_gene_id_col: "gene_id".to_string(),
            gd_disease_id_col: "disease_id".to_string(),
            gd_score_col: Some("score".to_string()),
            ppi_gene1_col: "gene1_id".to_string(),
            ppi_gene2_col: "gene2_id".to_string(),
            ppi_weight_col: Some("weight".to_string()),
        }
    }

    /// Copy of this config with all paths resolved against `base_dir`.
    pub fn resolve_paths(&self, base_dir: &Path) -> Self {
        let resolve = |p: &PathBuf| base_dir.join(p);
        Self {
            drugs_csv: resolve(&self.drugs_csv),
            genes_csv: resolve(&self.genes_csv),
            diseases_csv: resolve(&self.diseases_csv),
            drug_targets_csv: resolve(&self.drug_targets_csv),
            gene_disease_csv: resolve(&self.gene_disease_csv),
            ppi_csv: self.ppi_csv.as_ref().map(resolve),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_paths_joins_base_dir() {
        let cfg = CsvFilesConfig::new(
            "drugs.csv",
            "genes.csv",
            "diseases.csv",
            "dt.csv",
            "gd.csv",
            Some(PathBuf::from("ppi.csv")),
        );
        let resolved = cfg.resolve_paths(Path::new("/data/run1"));
        assert_eq!(resolved.drugs_csv, PathBuf::from("/data/run1/drugs.csv"));
        assert_eq!(
            resolved.ppi_csv.as_deref(),
            Some(Path::new("/data/run1/ppi.csv"))
        );
        assert_eq!(resolved.drug_id_col, "drug_id");
    }
}
