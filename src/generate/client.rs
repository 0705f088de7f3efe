//! Generative-image service seam.
//!
//! The service itself is external; this module defines the request shape, the trait a client
//! implements, and the retry discipline callers apply on transient failures.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::decode::SourceImage;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Requested output size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Roughly 1K on the long edge.
    #[default]
    Small,
    /// Roughly 2K on the long edge.
    Medium,
    /// Roughly 4K on the long edge.
    Large,
}

/// Requested aspect ratio `width:height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio {
    /// Width term.
    pub width: u32,
    /// Height term.
    pub height: u32,
}

impl AspectRatio {
    /// 1:1.
    pub const SQUARE: Self = Self {
        width: 1,
        height: 1,
    };

    /// Parse `"w:h"`.
    pub fn parse(s: &str) -> SpriteResult<Self> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| SpriteError::validation(format!("aspect ratio '{s}' must be w:h")))?;
        let term = |t: &str| {
            t.trim()
                .parse::<u32>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| SpriteError::validation(format!("invalid aspect ratio '{s}'")))
        };
        Ok(Self {
            width: term(w)?,
            height: term(h)?,
        })
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = SpriteError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AspectRatio> for String {
    fn from(a: AspectRatio) -> Self {
        format!("{}:{}", a.width, a.height)
    }
}

/// One generation request.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    /// Reference images, in the order the service should see them.
    pub references: Vec<Arc<SourceImage>>,
    /// Free-text instruction.
    pub instruction: String,
    /// Output size class.
    pub size: SizeClass,
    /// Output aspect ratio.
    pub aspect: AspectRatio,
}

impl GenerationRequest {
    /// Request with no references and default size/aspect.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            references: Vec::new(),
            instruction: instruction.into(),
            size: SizeClass::default(),
            aspect: AspectRatio::default(),
        }
    }

    /// Reject requests that cannot be sent.
    pub fn validate(&self) -> SpriteResult<()> {
        if self.instruction.trim().is_empty() {
            return Err(SpriteError::validation(
                "generation instruction must be non-empty",
            ));
        }
        Ok(())
    }
}

/// Client for the external generative-image service.
///
/// Implementations report overload/internal failures with [`SpriteError::transient`] and
/// everything else with a non-transient error.
pub trait ImageGenerator {
    /// Produce one image for `request`.
    fn generate(&self, request: &GenerationRequest) -> SpriteResult<SourceImage>;
}

/// Waits between retry attempts.
pub trait Sleeper {
    /// Block for `duration`.
    fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Exponential backoff policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles after each further failure.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

/// Call `generator`, retrying transient failures per `policy`.
///
/// Non-transient errors are returned immediately. After the last attempt the final transient
/// error is returned.
#[tracing::instrument(skip_all, fields(references = request.references.len()))]
pub fn generate_with_retry(
    generator: &dyn ImageGenerator,
    request: &GenerationRequest,
    policy: RetryPolicy,
    sleeper: &dyn Sleeper,
) -> SpriteResult<SourceImage> {
    request.validate()?;

    let attempts = policy.max_attempts.max(1);
    let mut backoff = policy.initial_backoff;
    let mut attempt = 1;
    loop {
        match generator.generate(request) {
            Ok(img) => return Ok(img),
            Err(e) if e.is_transient() && attempt < attempts => {
                tracing::warn!(attempt, ?backoff, error = %e, "transient generation failure, retrying");
                sleeper.sleep(backoff);
                backoff = backoff.saturating_mul(2);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/client.rs"]
mod tests;
