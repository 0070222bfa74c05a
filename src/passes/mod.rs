//! Redaction passes.
//!
//! Each pass is a linear pipeline over one document graph: locate the
//! structures it targets, validate them, mutate, then request compaction
//! from the external optimizer so stale numbering never reaches the writer.
//!
//! Error policy differs by pass and is deliberate: the signature pass aborts
//! on the first error with the graph untouched up to that point, while the
//! watermark and marked-region passes log and skip per-item problems.

pub mod regions;
pub mod signatures;
pub mod watermark;
