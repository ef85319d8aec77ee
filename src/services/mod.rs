pub mod aggregation;
pub mod emotion;
