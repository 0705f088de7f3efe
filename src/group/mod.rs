//! Group aggregate, its persisted project form, and the library that owns groups.

/// Owned groups in creation order plus exported asset records.
pub mod library;
/// The `Group` aggregate and its validated mutations.
pub mod model;
/// JSON project file (grid + overlays).
pub mod project;
