//! Core entity types shared by the ingestion, network, and ranking crates.
//! Identifiers are opaque trimmed strings; no identifier-scheme validation
//! is performed here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Drug / Gene / Disease
// ---------------------------------------------------------------------------

/// A drug or compound, e.g. `CHEMBL:CHEMBL25` or an internal `D123`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub id: String,
    pub name: String,
}

/// A gene, e.g. `ENSG00000141510` or `HGNC:TP53`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub id: String,
    pub symbol: String,
}

/// A disease or phenotype, e.g. `MONDO:0005148` or `DOID:9352`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Associations
// ---------------------------------------------------------------------------

/// Association between a drug and a target gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugTargetAssoc {
    pub drug_id: String,
    pub gene_id: String,
    /// Source database or file name (e.g. "toy", "ChEMBL").
    pub source: String,
    /// Optional confidence / binding-affinity score.
    pub score: Option<f64>,
}

/// Association between a gene and a disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDiseaseAssoc {
    pub gene_id: String,
    pub disease_id: String,
    pub source: String,
    /// Optional evidence score.
    pub score: Option<f64>,
}

/// Interaction between two genes in a network (e.g. a PPI edge).
///
/// The weight is informational only: shortest-path traversal treats every
/// edge as cost 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneGeneInteraction {
    pub gene1_id: String,
    pub gene2_id: String,
    pub weight: Option<f64>,
    pub source: String,
}
