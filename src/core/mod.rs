pub mod evaluator;
pub mod ingest;
pub mod trace;
