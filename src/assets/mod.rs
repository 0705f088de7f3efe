/// Source raster decoding.
pub mod decode;
/// Durable single-slot template storage.
pub mod storage;
