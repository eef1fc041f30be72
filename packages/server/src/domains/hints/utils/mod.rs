pub mod aggregate;

pub use aggregate::{aggregate_score, mean_score, round2};
