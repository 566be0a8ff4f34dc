//! `remedyx precompute`: build the gene universe index and the all-pairs
//! shortest-path distance matrix from a PPI edge list plus the association
//! tables whose genes must be indexable.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use remedyx_ingestion::loaders;
use remedyx_ppi::{compute_all_pairs, GeneUniverse, MatrixWriter, PpiGraph};

#[derive(Args)]
pub struct PrecomputeArgs {
    /// PPI edge list CSV (gene1_id,gene2_id[,weight]).
    #[arg(long)]
    pub ppi_csv: PathBuf,

    /// Drug-target associations CSV (drug_id,gene_id); its genes are
    /// included in the universe.
    #[arg(long)]
    pub drug_targets_csv: PathBuf,

    /// Gene-disease associations CSV (gene_id,disease_id); its genes are
    /// included in the universe.
    #[arg(long)]
    pub gene_disease_csv: PathBuf,

    /// Output path for the gene index CSV (gene_id,index).
    #[arg(long)]
    pub out_index: PathBuf,

    /// Output path for the uint16 distance matrix binary file.
    #[arg(long)]
    pub out_matrix: PathBuf,

    /// Optional BFS cutoff (max distance). Distances beyond it keep the
    /// no-path sentinel.
    #[arg(long)]
    pub cutoff: Option<u16>,
}

pub fn run(args: PrecomputeArgs) -> anyhow::Result<()> {
    for out in [&args.out_index, &args.out_matrix] {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }

    let interactions = loaders::load_ppi(&args.ppi_csv, "gene1_id", "gene2_id", Some("weight"))?;
    let drug_targets =
        loaders::load_drug_targets(&args.drug_targets_csv, "drug_id", "gene_id", None)?;
    let gene_diseases =
        loaders::load_gene_disease(&args.gene_disease_csv, "gene_id", "disease_id", None)?;

    let universe = GeneUniverse::build(
        interactions
            .iter()
            .flat_map(|i| [i.gene1_id.as_str(), i.gene2_id.as_str()])
            .chain(drug_targets.iter().map(|a| a.gene_id.as_str()))
            .chain(gene_diseases.iter().map(|a| a.gene_id.as_str())),
    )
    .context("building gene universe")?;

    universe
        .write_index_csv(&args.out_index)
        .with_context(|| format!("writing gene index to {}", args.out_index.display()))?;

    let graph = PpiGraph::from_interactions(&universe, &interactions);

    let mut writer = MatrixWriter::allocate(&args.out_matrix, universe.len())
        .with_context(|| format!("allocating matrix at {}", args.out_matrix.display()))?;
    compute_all_pairs(&graph, &mut writer, args.cutoff);
    writer.finish().context("flushing distance matrix")?;

    info!(
        "Distance matrix written: {} ({} genes)",
        args.out_matrix.display(),
        universe.len()
    );
    Ok(())
}
