//! The engine-side implementation of the core `System` trait.

use rand::rngs::StdRng;

use strand_core::{Character, CoreError, CoreResult, Story, System, choose_situation_ids};

use crate::output::{ChoiceLine, OutputEvent, Transcript};

/// The `System` handle passed to situation hooks.
///
/// Borrows the engine's parts for the duration of one hook call and
/// collects any transition request, which the engine processes after the
/// hook returns.
pub(crate) struct EngineSystem<'a> {
    pub story: &'a Story,
    pub current: Option<&'a str>,
    pub transcript: &'a mut Transcript,
    pub rng: &'a mut StdRng,
    pub pending: Option<String>,
}

impl System for EngineSystem<'_> {
    fn write(&mut self, text: &str) {
        self.transcript.push(OutputEvent::Paragraph(text.to_string()));
    }

    fn write_heading(&mut self, text: &str) {
        self.transcript.push(OutputEvent::Heading(text.to_string()));
    }

    fn set_quality(&mut self, character: &mut Character, name: &str, value: f64) {
        let old = character.set_quality(name, value);
        self.transcript.push(OutputEvent::QualityChanged {
            name: name.to_string(),
            old,
            new: value,
        });
    }

    fn choose(
        &mut self,
        character: &Character,
        ids_or_tags: &[String],
        min: Option<usize>,
        max: Option<usize>,
    ) -> CoreResult<Vec<String>> {
        choose_situation_ids(
            self.story,
            character,
            self.current,
            ids_or_tags,
            min,
            max,
            self.rng,
        )
    }

    fn write_choices(&mut self, character: &Character, ids: &[String]) -> CoreResult<()> {
        let mut lines = Vec::with_capacity(ids.len());
        for id in ids {
            let situation = self
                .story
                .get(id)
                .ok_or_else(|| CoreError::SituationNotFound(id.clone()))?;
            let label = situation
                .meta()
                .choice_label
                .unwrap_or_else(|| id.clone());
            lines.push(ChoiceLine {
                id: id.clone(),
                label,
                choosable: situation.can_choose(character, self.current),
            });
        }
        self.transcript.push(OutputEvent::Choices(lines));
        Ok(())
    }

    fn transition_to(&mut self, id: &str) {
        self.pending = Some(id.to_string());
    }

    fn rng(&mut self) -> &mut StdRng {
        self.rng
    }
}
