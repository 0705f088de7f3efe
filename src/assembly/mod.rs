//! Batch passes over a group's valid frames: animation assembly and sheet export.

/// Composite -> key -> scale -> codec pipeline.
pub mod pipeline;
/// Raster sheet re-packing.
pub mod sheet;
/// Per-operation progress/state tracking.
pub mod state;
