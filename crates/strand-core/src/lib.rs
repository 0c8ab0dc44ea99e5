//! Core types for Strand, an engine for choice-based interactive fiction.
//!
//! Authors declare situations (narrative nodes with enter/act/exit
//! behavior) and qualities (numeric character stats with display rules).
//! The one non-trivial piece is choice selection: compiling an ordered
//! list of next-situation candidates from ids and tags using
//! priority/frequency/display-order rules.

/// Character state: quality values and the author sandbox.
pub mod character;
/// Priority/frequency choice selection.
pub mod choices;
/// Error types for story building and querying.
pub mod error;
/// Quality formats, definitions, and groups.
pub mod quality;
/// The situation trait and the stock data-driven situation.
pub mod situation;
/// The story registry and validation.
pub mod story;
/// The interface situations use to talk back to the engine.
pub mod system;

pub use character::Character;
pub use choices::choose_situation_ids;
pub use error::{CoreError, CoreResult};
pub use quality::{QualityDefinition, QualityFormat, QualityGroup};
pub use situation::{ActionResponse, SimpleSituation, Situation, SituationMeta};
pub use story::Story;
pub use system::System;
