//! Header-driven CSV loaders for every pipeline input.

use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use remedyx_common::{
    Disease, Drug, DrugTargetAssoc, Gene, GeneDiseaseAssoc, GeneGeneInteraction, RemedyxError,
    Result,
};

use crate::config::CsvFilesConfig;

/// Everything the ranking pipeline needs, loaded from one config.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    pub drugs: Vec<Drug>,
    pub genes: Vec<Gene>,
    pub diseases: Vec<Disease>,
    pub drug_targets: Vec<DrugTargetAssoc>,
    pub gene_diseases: Vec<GeneDiseaseAssoc>,
    pub interactions: Vec<GeneGeneInteraction>,
}

/// One row of a drug-disease pair list to annotate. Extra scoring columns
/// are carried through when present so `annotate` can recombine them.
#[derive(Debug, Clone)]
pub struct PairRow {
    pub drug_id: String,
    pub disease_id: String,
    pub n_overlap: Option<u32>,
    pub overlapping_genes: Option<String>,
    pub jaccard: Option<f64>,
}

// ---------------------------------------------------------------------------
// Header helpers
// ---------------------------------------------------------------------------

fn required_column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            RemedyxError::Config(format!(
                "missing required column '{name}' in {}",
                path.display()
            ))
        })
}

fn optional_column(headers: &StringRecord, name: Option<&str>) -> Option<usize> {
    let name = name?;
    headers.iter().position(|h| h.trim() == name)
}

fn trimmed(record: &StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_score(record: &StringRecord, idx: Option<usize>) -> Option<f64> {
    idx.and_then(|i| record.get(i))
        .and_then(|v| v.trim().parse().ok())
}

fn source_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string())
}

// ---------------------------------------------------------------------------
// Entity loaders
// ---------------------------------------------------------------------------

/// Load drug metadata (id + human-readable name).
pub fn load_drugs(path: &Path, id_col: &str, name_col: &str) -> Result<Vec<Drug>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let id = required_column(&headers, id_col, path)?;
    let name = required_column(&headers, name_col, path)?;

    let mut drugs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(id) = trimmed(&record, id) else { continue };
        let name = trimmed(&record, name).unwrap_or_default();
        drugs.push(Drug { id, name });
    }
    info!("Loaded {} drugs from {}", drugs.len(), path.display());
    Ok(drugs)
}

/// Load gene metadata (id + symbol).
pub fn load_genes(path: &Path, id_col: &str, symbol_col: &str) -> Result<Vec<Gene>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let id = required_column(&headers, id_col, path)?;
    let symbol = required_column(&headers, symbol_col, path)?;

    let mut genes = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(id) = trimmed(&record, id) else { continue };
        let symbol = trimmed(&record, symbol).unwrap_or_default();
        genes.push(Gene { id, symbol });
    }
    info!("Loaded {} genes from {}", genes.len(), path.display());
    Ok(genes)
}

/// Load disease metadata (id + human-readable name).
pub fn load_diseases(path: &Path, id_col: &str, name_col: &str) -> Result<Vec<Disease>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let id = required_column(&headers, id_col, path)?;
    let name = required_column(&headers, name_col, path)?;

    let mut diseases = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(id) = trimmed(&record, id) else { continue };
        let name = trimmed(&record, name).unwrap_or_default();
        diseases.push(Disease { id, name });
    }
    info!("Loaded {} diseases from {}", diseases.len(), path.display());
    Ok(diseases)
}

// ---------------------------------------------------------------------------
// Association loaders
// ---------------------------------------------------------------------------

/// Load drug-target associations. Rows with an empty drug or gene id after
/// trimming are dropped.
pub fn load_drug_targets(
    path: &Path,
    drug_col: &str,
    gene_col: &str,
    score_col: Option<&str>,
) -> Result<Vec<DrugTargetAssoc>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let drug = required_column(&headers, drug_col, path)?;
    let gene = required_column(&headers, gene_col, path)?;
    let score = optional_column(&headers, score_col);
    let source = source_label(path);

    let mut assocs = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = record?;
        let (Some(drug_id), Some(gene_id)) = (trimmed(&record, drug), trimmed(&record, gene))
        else {
            dropped += 1;
            continue;
        };
        assocs.push(DrugTargetAssoc {
            drug_id,
            gene_id,
            source: source.clone(),
            score: parse_score(&record, score),
        });
    }
    if dropped > 0 {
        debug!("Dropped {dropped} drug-target rows with empty identifiers");
    }
    info!(
        "Loaded {} drug-target associations from {}",
        assocs.len(),
        path.display()
    );
    Ok(assocs)
}

/// Load gene-disease associations. Rows with an empty gene or disease id
/// after trimming are dropped.
pub fn load_gene_disease(
    path: &Path,
    gene_col: &str,
    disease_col: &str,
    score_col: Option<&str>,
) -> Result<Vec<GeneDiseaseAssoc>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let gene = required_column(&headers, gene_col, path)?;
    let disease = required_column(&headers, disease_col, path)?;
    let score = optional_column(&headers, score_col);
    let source = source_label(path);

    let mut assocs = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = record?;
        let (Some(gene_id), Some(disease_id)) =
            (trimmed(&record, gene), trimmed(&record, disease))
        else {
            dropped += 1;
            continue;
        };
        assocs.push(GeneDiseaseAssoc {
            gene_id,
            disease_id,
            source: source.clone(),
            score: parse_score(&record, score),
        });
    }
    if dropped > 0 {
        debug!("Dropped {dropped} gene-disease rows with empty identifiers");
    }
    info!(
        "Loaded {} gene-disease associations from {}",
        assocs.len(),
        path.display()
    );
    Ok(assocs)
}

/// Load a PPI edge list (gene A, gene B, optional weight). Rows with an
/// empty gene id on either side are dropped; self-loop and duplicate
/// cleanup happens in the graph builder.
pub fn load_ppi(
    path: &Path,
    gene1_col: &str,
    gene2_col: &str,
    weight_col: Option<&str>,
) -> Result<Vec<GeneGeneInteraction>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let gene1 = required_column(&headers, gene1_col, path)?;
    let gene2 = required_column(&headers, gene2_col, path)?;
    let weight = optional_column(&headers, weight_col);
    let source = source_label(path);

    let mut interactions = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = record?;
        let (Some(gene1_id), Some(gene2_id)) = (trimmed(&record, gene1), trimmed(&record, gene2))
        else {
            dropped += 1;
            continue;
        };
        interactions.push(GeneGeneInteraction {
            gene1_id,
            gene2_id,
            weight: parse_score(&record, weight),
            source: source.clone(),
        });
    }
    if dropped > 0 {
        debug!("Dropped {dropped} PPI rows with empty identifiers");
    }
    info!(
        "Loaded {} PPI interactions from {}",
        interactions.len(),
        path.display()
    );
    Ok(interactions)
}

/// Load a drug-disease pair list for annotation. `drug_id` and
/// `disease_id` are required columns; overlap columns are carried through
/// when present.
pub fn load_pairs(path: &Path) -> Result<Vec<PairRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let drug = required_column(&headers, "drug_id", path)?;
    let disease = required_column(&headers, "disease_id", path)?;
    let n_overlap = optional_column(&headers, Some("n_overlap"));
    let overlapping = optional_column(&headers, Some("overlapping_genes"));
    let jaccard = optional_column(&headers, Some("jaccard"));

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let (Some(drug_id), Some(disease_id)) = (trimmed(&record, drug), trimmed(&record, disease))
        else {
            continue;
        };
        pairs.push(PairRow {
            drug_id,
            disease_id,
            n_overlap: n_overlap
                .and_then(|i| record.get(i))
                .and_then(|v| v.trim().parse().ok()),
            overlapping_genes: overlapping.and_then(|i| trimmed(&record, i)),
            jaccard: parse_score(&record, jaccard),
        });
    }
    info!("Loaded {} pairs from {}", pairs.len(), path.display());
    Ok(pairs)
}

/// Load the full dataset described by a [`CsvFilesConfig`].
pub fn load_csv_data(cfg: &CsvFilesConfig) -> Result<CsvDataset> {
    let drugs = load_drugs(&cfg.drugs_csv, &cfg.drug_id_col, &cfg.drug_name_col)?;
    let genes = load_genes(&cfg.genes_csv, &cfg.gene_id_col, &cfg.gene_symbol_col)?;
    let diseases = load_diseases(&cfg.diseases_csv, &cfg.disease_id_col, &cfg.disease_name_col)?;
    let drug_targets = load_drug_targets(
        &cfg.drug_targets_csv,
        &cfg.dt_drug_id_col,
        &cfg.dt_gene_id_col,
        cfg.dt_score_col.as_deref(),
    )?;
    let gene_diseases = load_gene_disease(
        &cfg.gene_disease_csv,
        &cfg.gd_gene_id_col,
        &cfg.gd_disease_id_col,
        cfg.gd_score_col.as_deref(),
    )?;
    let interactions = match &cfg.ppi_csv {
        Some(path) => load_ppi(
            path,
            &cfg.ppi_gene1_col,
            &cfg.ppi_gene2_col,
            cfg.ppi_weight_col.as_deref(),
        )?,
        None => Vec::new(),
    };

    Ok(CsvDataset {
        drugs,
        genes,
        diseases,
        drug_targets,
        gene_diseases,
        interactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn drug_targets_trim_and_drop_empty_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "dt.csv",
            "drug_id,gene_id,score\n D1 , G1 ,0.8\nD2,,\n,G3,\nD2,G2,not-a-number\n",
        );

        let assocs = load_drug_targets(&path, "drug_id", "gene_id", Some("score")).unwrap();
        assert_eq!(assocs.len(), 2);
        assert_eq!(assocs[0].drug_id, "D1");
        assert_eq!(assocs[0].gene_id, "G1");
        assert_eq!(assocs[0].score, Some(0.8));
        assert_eq!(assocs[1].drug_id, "D2");
        assert_eq!(assocs[1].score, None);
    }

    #[test]
    fn missing_required_column_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "dt.csv", "drug,gene\nD1,G1\n");

        let err = load_drug_targets(&path, "drug_id", "gene_id", None).unwrap_err();
        assert!(matches!(err, RemedyxError::Config(_)));
    }

    #[test]
    fn ppi_weight_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "ppi.csv", "gene1_id,gene2_id\nG1,G2\nG2,G3\n");

        let edges = load_ppi(&path, "gene1_id", "gene2_id", Some("weight")).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].weight, None);
    }

    #[test]
    fn pairs_carry_overlap_columns_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "pairs.csv",
            "drug_id,disease_id,n_overlap,jaccard\nD1,DIS1,2,0.5\nD2,DIS2,,\n",
        );

        let pairs = load_pairs(&path).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].n_overlap, Some(2));
        assert_eq!(pairs[0].jaccard, Some(0.5));
        assert_eq!(pairs[1].n_overlap, None);
    }

    #[test]
    fn load_csv_data_without_ppi() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "drugs.csv", "drug_id,drug_name\nD1,Aspirin\n");
        write_file(dir.path(), "genes.csv", "gene_id,symbol\nG1,TP53\n");
        write_file(
            dir.path(),
            "diseases.csv",
            "disease_id,disease_name\nDIS1,Asthma\n",
        );
        write_file(dir.path(), "dt.csv", "drug_id,gene_id,score\nD1,G1,1.0\n");
        write_file(dir.path(), "gd.csv", "gene_id,disease_id,score\nG1,DIS1,0.9\n");

        let cfg = CsvFilesConfig::new(
            "drugs.csv",
            "genes.csv",
            "diseases.csv",
            "dt.csv",
            "gd.csv",
            None,
        )
        .resolve_paths(dir.path());

        let data = load_csv_data(&cfg).unwrap();
        assert_eq!(data.drugs.len(), 1);
        assert_eq!(data.drug_targets.len(), 1);
        assert!(data.interactions.is_empty());
    }
}
