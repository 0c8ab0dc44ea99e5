//! Error types for the story engine.

use strand_core::CoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while driving a story.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An error from the core story model.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An operation that needs a current situation ran before `begin`.
    #[error("the story has not begun")]
    NotStarted,

    /// `begin` was called twice.
    #[error("the story has already begun")]
    AlreadyStarted,

    /// A link was not of the form `id`, `id/action`, or `./action`.
    #[error("malformed link: \"{0}\"")]
    MalformedLink(String),

    /// Situations kept redirecting to each other without settling.
    #[error("transition loop detected starting at \"{0}\"")]
    TransitionLoop(String),

    /// The save file was written by an incompatible version.
    #[error("unsupported save version {found} (expected {expected})")]
    SaveVersion {
        /// Version found in the save data.
        found: u32,
        /// Version this engine writes.
        expected: u32,
    },

    /// A saved link no longer replays cleanly against the story.
    #[error("save replay diverged at link \"{link}\": {source}")]
    ReplayDiverged {
        /// The link that failed to replay.
        link: String,
        /// The underlying failure.
        source: Box<EngineError>,
    },

    /// The save data could not be parsed.
    #[error("invalid save data: {0}")]
    SaveData(#[from] serde_json::Error),
}
