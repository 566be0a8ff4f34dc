//! PPI network core: gene universe indexing, graph
//! construction, all-pairs shortest-path distances, and the memory-mapped
//! uint16 distance matrix store.

pub mod distance;
pub mod graph;
pub mod matrix;
pub mod universe;

pub use distance::compute_all_pairs;
pub use graph::PpiGraph;
pub use matrix::{DistanceMatrix, MatrixWriter, NO_PATH};
pub use universe::GeneUniverse;
