//! `remedyx rank`: the full hypothesis pipeline on CSV inputs: overlap
//! evidence, network proximity (graph-direct), weighted combination, and
//! name enrichment.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use remedyx_ingestion::{load_csv_data, CsvFilesConfig};
use remedyx_ppi::{GeneUniverse, PpiGraph};
use remedyx_ranker::{
    attach_entity_names, build_disease_gene_map, build_drug_target_map, combine,
    compute_overlap_table, network_proximity, proximity_from_mean, ProximityRecord,
};

use crate::output;

#[derive(Args)]
pub struct RankArgs {
    /// Drug metadata CSV (drug_id,drug_name).
    #[arg(long)]
    pub drugs_csv: PathBuf,

    /// Gene metadata CSV (gene_id,symbol).
    #[arg(long)]
    pub genes_csv: PathBuf,

    /// Disease metadata CSV (disease_id,disease_name).
    #[arg(long)]
    pub diseases_csv: PathBuf,

    /// Drug-target associations CSV (drug_id,gene_id[,score]).
    #[arg(long)]
    pub drug_targets_csv: PathBuf,

    /// Gene-disease associations CSV (gene_id,disease_id[,score]).
    #[arg(long)]
    pub gene_disease_csv: PathBuf,

    /// Optional PPI edge list CSV (gene1_id,gene2_id[,weight]).
    #[arg(long)]
    pub ppi_csv: Option<PathBuf>,

    /// Weight for the normalized overlap term.
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f64,

    /// Weight for the proximity term.
    #[arg(long, default_value_t = 1.0)]
    pub beta: f64,

    /// Number of top-ranked pairs to print.
    #[arg(long, default_value_t = 20)]
    pub top_k: usize,

    /// If provided, save the full ranking to this CSV file.
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}

pub fn run(args: RankArgs) -> anyhow::Result<()> {
    let cfg = CsvFilesConfig::new(
        args.drugs_csv.clone(),
        args.genes_csv.clone(),
        args.diseases_csv.clone(),
        args.drug_targets_csv.clone(),
        args.gene_disease_csv.clone(),
        args.ppi_csv.clone(),
    );
    let data = load_csv_data(&cfg)?;

    let drug_to_genes = build_drug_target_map(&data.drug_targets);
    let disease_to_genes = build_disease_gene_map(&data.gene_diseases);
    let overlap = compute_overlap_table(&data.drug_targets, &data.gene_diseases);

    let proximity: Vec<ProximityRecord> = if !data.interactions.is_empty() {
        let universe = GeneUniverse::build(
            data.interactions
                .iter()
                .flat_map(|i| [i.gene1_id.as_str(), i.gene2_id.as_str()])
                .chain(data.drug_targets.iter().map(|a| a.gene_id.as_str()))
                .chain(data.gene_diseases.iter().map(|a| a.gene_id.as_str())),
        )
        .context("building gene universe")?;
        let graph = PpiGraph::from_interactions(&universe, &data.interactions);
        network_proximity(&graph, &universe, &drug_to_genes, &disease_to_genes)
    } else {
        // No PPI: proximity carries no information, so only define it for
        // pairs that have overlap (avoids the full cartesian product).
        info!("No PPI provided; proximity fixed at no-evidence for overlap pairs");
        overlap
            .iter()
            .map(|rec| ProximityRecord {
                drug_id: rec.drug_id.clone(),
                disease_id: rec.disease_id.clone(),
                mean_distance: f64::INFINITY,
                proximity_score: proximity_from_mean(f64::INFINITY),
            })
            .collect()
    };

    let mut combined = combine(&overlap, &proximity, args.alpha, args.beta);
    attach_entity_names(&mut combined, &data.drugs, &data.diseases);

    output::print_top_k(&combined, args.top_k);

    if let Some(path) = &args.output_csv {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
        output::write_combined_csv(path, &combined)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Full ranking written: {}", path.display());
    }
    Ok(())
}
