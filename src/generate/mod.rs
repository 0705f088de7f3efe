/// Generative-image service seam with transient-error retry.
pub mod client;
