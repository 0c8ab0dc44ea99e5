//! The interface situations use to talk back to their host engine.

use rand::rngs::StdRng;

use crate::character::Character;
use crate::error::CoreResult;

/// Services the host engine provides to situation hooks.
///
/// Situations never touch the transcript or the story registry directly;
/// everything goes through this trait so that hooks stay testable and the
/// engine keeps control of ordering and bookkeeping.
pub trait System {
    /// Append a paragraph of narrative text to the transcript.
    fn write(&mut self, text: &str);

    /// Append a heading to the transcript.
    fn write_heading(&mut self, text: &str);

    /// Set a quality on the character, recording the change to the
    /// transcript.
    fn set_quality(&mut self, character: &mut Character, name: &str, value: f64);

    /// Add `delta` to a quality (unset counts as 0), recording the change.
    fn adjust_quality(&mut self, character: &mut Character, name: &str, delta: f64) {
        let value = character.quality_or_zero(name) + delta;
        self.set_quality(character, name, value);
    }

    /// Compile an ordered choice list from situation ids and `#tag`
    /// references, applying the priority/frequency/order selection rules.
    fn choose(
        &mut self,
        character: &Character,
        ids_or_tags: &[String],
        min: Option<usize>,
        max: Option<usize>,
    ) -> CoreResult<Vec<String>>;

    /// Append a choice list for the given situation ids to the transcript.
    ///
    /// Entries whose situation refuses `can_choose` are shown but marked
    /// unselectable.
    fn write_choices(&mut self, character: &Character, ids: &[String]) -> CoreResult<()>;

    /// Request a transition to another situation once the current hook
    /// returns. The last request wins.
    fn transition_to(&mut self, id: &str);

    /// The engine's seeded random number generator.
    fn rng(&mut self) -> &mut StdRng;
}
