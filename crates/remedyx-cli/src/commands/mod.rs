pub mod annotate;
pub mod precompute;
pub mod rank;
