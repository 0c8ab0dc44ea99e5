//! Story engine for Strand.
//!
//! Drives a `strand_core` story: entering and exiting situations,
//! performing actions, recording everything to a transcript, and
//! capturing replay-based saves. Frontends feed it links and render the
//! transcript; the engine itself does no I/O.

/// Engine configuration.
pub mod config;
/// The engine state machine.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// The transcript of emitted output events.
pub mod output;
/// Replay-based save states.
pub mod save;
/// The engine-side `System` implementation.
mod system;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use output::{ChoiceLine, OutputEvent, Transcript};
pub use save::{SAVE_VERSION, SaveState};
