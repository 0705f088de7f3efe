/// Per-frame offset and exclusion overlays.
pub mod store;
