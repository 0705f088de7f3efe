/// Time -> active frame mapping for live preview.
pub mod clock;
