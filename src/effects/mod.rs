/// Background detection and key-colour substitution.
pub mod chroma_key;
