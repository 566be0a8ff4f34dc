//! Shared types and errors used across all Remedyx crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{
    Disease, Drug, DrugTargetAssoc, Gene, GeneDiseaseAssoc, GeneGeneInteraction,
};
pub use error::{RemedyxError, Result};
