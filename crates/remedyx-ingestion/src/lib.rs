//! CSV loading for drugs, genes, diseases, association
//! tables, PPI edge lists, and drug-disease pair lists.
//!
//! All identifiers are trimmed on the way in; rows whose required
//! identifiers are empty after trimming are dropped silently. Column names
//! are configurable per file via [`CsvFilesConfig`].

pub mod config;
pub mod loaders;

pub use config::CsvFilesConfig;
pub use loaders::{
    load_csv_data, load_diseases, load_drug_targets, load_drugs, load_gene_disease, load_genes,
    load_pairs, load_ppi, CsvDataset, PairRow,
};
