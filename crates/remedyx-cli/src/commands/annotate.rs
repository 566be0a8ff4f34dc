//! `remedyx annotate`: score an existing drug-disease pair list against a
//! precomputed distance matrix and recombine with any overlap columns the
//! pair list carries.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use remedyx_ingestion::loaders;
use remedyx_ppi::{DistanceMatrix, GeneUniverse};
use remedyx_ranker::{
    build_disease_gene_map, build_drug_target_map, combine, OverlapRecord, ProximityScorer,
};

use crate::output;

#[derive(Args)]
pub struct AnnotateArgs {
    /// Drug-disease pairs CSV (must have drug_id,disease_id; overlap
    /// columns are used when present).
    #[arg(long)]
    pub pairs_csv: PathBuf,

    /// Drug-target associations CSV (drug_id,gene_id).
    #[arg(long)]
    pub drug_targets_csv: PathBuf,

    /// Gene-disease associations CSV (gene_id,disease_id).
    #[arg(long)]
    pub gene_disease_csv: PathBuf,

    /// Gene index CSV written by `precompute`.
    #[arg(long)]
    pub gene_index: PathBuf,

    /// Binary distance matrix written by `precompute`.
    #[arg(long)]
    pub dist_matrix: PathBuf,

    /// Output CSV path.
    #[arg(long)]
    pub output: PathBuf,

    /// Only process the first N pairs.
    #[arg(long)]
    pub max_pairs: Option<usize>,

    /// Progress-reporting chunk size.
    #[arg(long, default_value_t = 10_000)]
    pub chunk_size: usize,

    /// Weight for the normalized overlap term in the combined score.
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f64,

    /// Weight for the proximity term in the combined score.
    #[arg(long, default_value_t = 1.0)]
    pub beta: f64,
}

pub fn run(args: AnnotateArgs) -> anyhow::Result<()> {
    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let mut pairs = loaders::load_pairs(&args.pairs_csv)?;
    if let Some(max) = args.max_pairs {
        if pairs.len() > max {
            pairs.truncate(max);
            info!("Restricting to first {max} pairs");
        }
    }

    let drug_targets =
        loaders::load_drug_targets(&args.drug_targets_csv, "drug_id", "gene_id", None)?;
    let gene_diseases =
        loaders::load_gene_disease(&args.gene_disease_csv, "gene_id", "disease_id", None)?;
    let drug_to_genes = build_drug_target_map(&drug_targets);
    let disease_to_genes = build_disease_gene_map(&gene_diseases);
    info!(
        "Drugs with targets: {}, diseases with genes: {}",
        drug_to_genes.len(),
        disease_to_genes.len()
    );

    let universe = GeneUniverse::read_index_csv(&args.gene_index)
        .with_context(|| format!("loading gene index {}", args.gene_index.display()))?;
    let matrix = DistanceMatrix::open(&args.dist_matrix, universe.len())
        .with_context(|| format!("opening distance matrix {}", args.dist_matrix.display()))?;

    let scorer = ProximityScorer::new(&matrix, &universe, &drug_to_genes, &disease_to_genes);
    let keys: Vec<(String, String)> = pairs
        .iter()
        .map(|p| (p.drug_id.clone(), p.disease_id.clone()))
        .collect();
    let proximity = scorer.score_pairs(&keys, args.chunk_size)?;

    // Overlap evidence travels with the pair list when present.
    let overlap: Vec<OverlapRecord> = pairs
        .iter()
        .filter_map(|p| {
            let n_overlap = p.n_overlap?;
            Some(OverlapRecord {
                drug_id: p.drug_id.clone(),
                disease_id: p.disease_id.clone(),
                n_overlap,
                overlapping_genes: p.overlapping_genes.clone().unwrap_or_default(),
                jaccard: p.jaccard.unwrap_or(0.0),
            })
        })
        .collect();

    let combined = combine(&overlap, &proximity, args.alpha, args.beta);
    output::write_combined_csv(&args.output, &combined)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!("Annotated pairs written: {}", args.output.display());
    Ok(())
}
