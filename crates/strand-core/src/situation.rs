//! Situations: narrative nodes with enter/act/exit behavior.

use std::collections::HashMap;

use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::system::System;

/// Choice-selection metadata for a situation.
#[derive(Debug, Clone, PartialEq)]
pub struct SituationMeta {
    /// Selection priority. Higher-priority situations are considered first
    /// when compiling a choice list.
    pub priority: i32,
    /// Relative weight when a priority tier must be sampled down to fit a
    /// maximum. Must be positive.
    pub frequency: f64,
    /// Sort key for the final presentation order of a choice list.
    pub display_order: i32,
    /// Tags this situation carries, matched by `#tag` references.
    pub tags: Vec<String>,
    /// Text shown when this situation is listed as a choice. Falls back to
    /// the situation id.
    pub choice_label: Option<String>,
}

impl Default for SituationMeta {
    fn default() -> Self {
        Self {
            priority: 1,
            frequency: 1.0,
            display_order: 1,
            tags: Vec::new(),
            choice_label: None,
        }
    }
}

impl SituationMeta {
    /// Create metadata with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the sampling frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the display order.
    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the choice label.
    pub fn with_choice_label(mut self, label: impl Into<String>) -> Self {
        self.choice_label = Some(label.into());
        self
    }
}

/// A narrative node.
///
/// All hooks have do-nothing defaults, so implementations only override
/// what they need. `host` in the visibility hooks is the situation whose
/// choice list is being compiled, when there is one.
pub trait Situation: Send + Sync {
    /// Selection metadata. The default has priority 1, frequency 1 and
    /// display order 1, with no tags.
    fn meta(&self) -> SituationMeta {
        SituationMeta::default()
    }

    /// Called when the player enters this situation. `from` is the id of
    /// the situation being left, absent for the story's opening entry.
    fn enter(
        &self,
        character: &mut Character,
        system: &mut dyn System,
        from: Option<&str>,
    ) -> CoreResult<()> {
        let _ = (character, system, from);
        Ok(())
    }

    /// Called when the player performs a named action while here.
    fn act(
        &self,
        character: &mut Character,
        system: &mut dyn System,
        action: &str,
    ) -> CoreResult<()> {
        let _ = (character, system, action);
        Ok(())
    }

    /// Called when the player leaves this situation for `to`.
    fn exit(&self, character: &mut Character, system: &mut dyn System, to: &str) -> CoreResult<()> {
        let _ = (character, system, to);
        Ok(())
    }

    /// Whether this situation may appear in a compiled choice list.
    fn can_view(&self, character: &Character, host: Option<&str>) -> bool {
        let _ = (character, host);
        true
    }

    /// Whether this situation, once listed, is actually selectable.
    fn can_choose(&self, character: &Character, host: Option<&str>) -> bool {
        let _ = (character, host);
        true
    }

    /// Choice targets known statically, used for story validation.
    /// Situations that compile their lists at runtime return nothing.
    fn choice_targets(&self) -> &[String] {
        &[]
    }
}

/// What a [`SimpleSituation`] action does when triggered.
#[derive(Debug, Clone)]
pub enum ActionResponse {
    /// Write a paragraph of text.
    Text(String),
    /// Add a delta to a quality, optionally writing text first.
    AdjustQuality {
        /// Quality name.
        name: String,
        /// Amount added to the current value.
        delta: f64,
        /// Text written before the change, if any.
        text: Option<String>,
    },
    /// Transition to another situation.
    Goto(String),
}

/// The stock data-driven situation: text on entry, a table of named
/// actions, and an optional list of choice targets compiled on entry.
#[derive(Debug, Clone, Default)]
pub struct SimpleSituation {
    meta: SituationMeta,
    heading: Option<String>,
    content: String,
    choices: Vec<String>,
    min_choices: Option<usize>,
    max_choices: Option<usize>,
    actions: HashMap<String, ActionResponse>,
    id_hint: String,
}

impl SimpleSituation {
    /// Create a situation that writes `content` on entry.
    ///
    /// `id` is the id it will be registered under; it is kept so that
    /// action errors can name the situation.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id_hint: id.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the heading written before the content.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Add a choice target: a situation id or a `#tag` reference.
    pub fn with_choice(mut self, id_or_tag: impl Into<String>) -> Self {
        self.choices.push(id_or_tag.into());
        self
    }

    /// Bound the compiled choice list.
    pub fn with_choice_bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_choices = min;
        self.max_choices = max;
        self
    }

    /// Add a named action.
    pub fn with_action(mut self, name: impl Into<String>, response: ActionResponse) -> Self {
        self.actions.insert(name.into(), response);
        self
    }

    /// Replace the selection metadata.
    pub fn with_meta(mut self, meta: SituationMeta) -> Self {
        self.meta = meta;
        self
    }
}

impl Situation for SimpleSituation {
    fn meta(&self) -> SituationMeta {
        self.meta.clone()
    }

    fn choice_targets(&self) -> &[String] {
        &self.choices
    }

    fn enter(
        &self,
        character: &mut Character,
        system: &mut dyn System,
        _from: Option<&str>,
    ) -> CoreResult<()> {
        if let Some(heading) = &self.heading {
            system.write_heading(heading);
        }
        if !self.content.is_empty() {
            system.write(&self.content);
        }
        if !self.choices.is_empty() {
            let ids = system.choose(character, &self.choices, self.min_choices, self.max_choices)?;
            system.write_choices(character, &ids)?;
        }
        Ok(())
    }

    fn act(
        &self,
        character: &mut Character,
        system: &mut dyn System,
        action: &str,
    ) -> CoreResult<()> {
        let response = self
            .actions
            .get(action)
            .ok_or_else(|| CoreError::UnknownAction {
                id: self.id_hint.clone(),
                action: action.to_string(),
            })?;

        match response {
            ActionResponse::Text(text) => system.write(text),
            ActionResponse::AdjustQuality { name, delta, text } => {
                if let Some(text) = text {
                    system.write(text);
                }
                system.adjust_quality(character, name, *delta);
            }
            ActionResponse::Goto(id) => system.transition_to(id),
        }
        Ok(())
    }
}
