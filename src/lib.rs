// Hirszemle: Hungarian news headline harvesting and topic analysis.
//
// This is the library root. Each module corresponds to a major subsystem
// of the ingestion-and-analysis pipeline.

pub mod config;
pub mod db;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod sources;
pub mod status;
pub mod text;
pub mod topics;
