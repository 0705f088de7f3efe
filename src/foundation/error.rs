use crate::foundation::core::GroupId;

/// Convenience result type used across spriteloop.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// Required input missing or malformed (grid, fps, scale, colours).
    #[error("validation error: {0}")]
    Validation(String),

    /// Every frame is excluded (or the grid holds no frames).
    #[error("no frames to assemble: every frame is excluded")]
    NoFrames,

    /// An assembly run is already in flight for this group.
    #[error("group {0} is already being assembled")]
    Busy(GroupId),

    /// Failure reported by the generative-image service.
    #[error("generation service error: {message}")]
    Service {
        /// `true` for overload/internal errors that are worth retrying.
        transient: bool,
        /// Message reported by the service.
        message: String,
    },

    /// Raster input could not be decoded. Never retried.
    #[error("decode error: {0}")]
    Decode(String),

    /// Durable storage capacity exceeded; prior contents are unchanged.
    #[error("storage full: {needed} bytes needed, capacity is {capacity} bytes")]
    StorageFull {
        /// Bytes the write required.
        needed: usize,
        /// Total capacity of the store.
        capacity: usize,
    },

    /// Failure reported by the animation codec.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpriteError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SpriteError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a retryable [`SpriteError::Service`] value.
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Service {
            transient: true,
            message: msg.into(),
        }
    }

    /// Build a non-retryable [`SpriteError::Service`] value.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service {
            transient: false,
            message: msg.into(),
        }
    }

    /// Return `true` when the caller may retry the failed operation.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Service {
                transient: true,
                ..
            }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
