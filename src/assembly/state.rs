use crate::foundation::error::SpriteResult;

/// Phase of a user-visible operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing running.
    #[default]
    Idle,
    /// Inspecting inputs.
    Analyzing,
    /// Compositing/encoding frames.
    Rendering,
    /// Waiting on the generative-image service.
    Generating,
    /// Last operation succeeded.
    Completed,
}

/// Phase, progress (0..=100) and last error of one operation.
///
/// Failures always land back in [`Phase::Idle`] with the message attached; nothing stays in a
/// working phase after [`ProcessingState::run`] returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessingState {
    phase: Phase,
    progress: u8,
    error: Option<String>,
}

impl ProcessingState {
    /// Idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Progress in percent.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Message of the last failure, if the last operation failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Return `true` while an operation is in a working phase.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::Analyzing | Phase::Rendering | Phase::Generating
        )
    }

    /// Return to idle, clearing progress and error.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Run `op` in `phase`, forwarding its progress reports.
    ///
    /// Ends in [`Phase::Completed`] at 100% on success, or [`Phase::Idle`] with the error
    /// message on failure. The operation's result is returned unchanged.
    pub fn run<T>(
        &mut self,
        phase: Phase,
        op: impl FnOnce(&mut dyn FnMut(u8)) -> SpriteResult<T>,
    ) -> SpriteResult<T> {
        self.phase = phase;
        self.progress = 0;
        self.error = None;

        let result = {
            let progress = &mut self.progress;
            op(&mut |p| *progress = p.min(100))
        };

        match &result {
            Ok(_) => {
                self.phase = Phase::Completed;
                self.progress = 100;
            }
            Err(e) => {
                tracing::warn!(?phase, error = %e, "operation failed");
                self.phase = Phase::Idle;
                self.progress = 0;
                self.error = Some(e.to_string());
            }
        }
        result
    }
}
