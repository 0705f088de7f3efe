//! Grid addressing, geometry and the typed per-group grid configuration.

/// Linear index <-> (row, col) mapping.
pub mod addressing;
/// Typed grid configuration and its validated mutations.
pub mod config;
/// Fractional cell geometry shared by every consumer.
pub mod geometry;
