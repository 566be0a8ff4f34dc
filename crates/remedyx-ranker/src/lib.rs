//! Drug-disease hypothesis scoring engine: gene-overlap
//! evidence, PPI network proximity, weighted combination, and the frozen
//! MoA classifier.

pub mod combine;
pub mod maps;
pub mod ml;
pub mod overlap;
pub mod proximity;

pub use combine::{attach_entity_names, combine, CombinedRecord};
pub use maps::{build_disease_gene_map, build_drug_target_map, GeneSetMap};
pub use ml::{FrozenMoaModel, MoaFeatures};
pub use overlap::{compute_overlap_table, OverlapRecord};
pub use proximity::{network_proximity, proximity_from_mean, ProximityRecord, ProximityScorer};
