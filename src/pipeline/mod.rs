// Pipelines — the two idempotent operations the scheduler drives:
// `ingest` (fetch + dedup-store headlines) and `analyze` (one topic/sentiment
// run over the accumulated corpus).

pub mod analyze;
pub mod ingest;
