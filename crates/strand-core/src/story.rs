//! The story registry: situations, tag index, and quality definitions.

use std::collections::HashMap;

use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::quality::{QualityDefinition, QualityGroup};
use crate::situation::Situation;
use crate::system::System;

/// Hook run when a fresh character starts the story.
pub type InitHook = Box<dyn Fn(&mut Character, &mut dyn System) -> CoreResult<()> + Send + Sync>;

/// A complete story: situation registry, start id, and quality metadata.
pub struct Story {
    situations: HashMap<String, Box<dyn Situation>>,
    by_tag: HashMap<String, Vec<String>>,
    start: String,
    qualities: HashMap<String, QualityDefinition>,
    groups: HashMap<String, QualityGroup>,
    init: Option<InitHook>,
}

impl Story {
    /// Create an empty story that begins at `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            situations: HashMap::new(),
            by_tag: HashMap::new(),
            start: start.into(),
            qualities: HashMap::new(),
            groups: HashMap::new(),
            init: None,
        }
    }

    /// The id of the opening situation.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Register a situation under `id`.
    ///
    /// Rejects duplicate ids and non-positive frequencies. The tag index
    /// is updated from the situation's metadata.
    pub fn add_situation(
        &mut self,
        id: impl Into<String>,
        situation: impl Situation + 'static,
    ) -> CoreResult<()> {
        let id = id.into();
        if self.situations.contains_key(&id) {
            return Err(CoreError::DuplicateSituation(id));
        }

        let meta = situation.meta();
        if meta.frequency <= 0.0 || meta.frequency.is_nan() {
            return Err(CoreError::InvalidFrequency {
                id,
                frequency: meta.frequency,
            });
        }

        for tag in &meta.tags {
            self.by_tag.entry(tag.clone()).or_default().push(id.clone());
        }
        self.situations.insert(id, Box::new(situation));
        Ok(())
    }

    /// Look up a situation by id.
    pub fn get(&self, id: &str) -> Option<&dyn Situation> {
        self.situations.get(id).map(|s| s.as_ref())
    }

    /// Whether a situation id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.situations.contains_key(id)
    }

    /// Ids of all situations carrying `tag` (without the `#` prefix).
    pub fn ids_with_tag(&self, tag: &str) -> &[String] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All registered situations, unordered.
    pub fn situations(&self) -> impl Iterator<Item = (&str, &dyn Situation)> {
        self.situations.iter().map(|(id, s)| (id.as_str(), s.as_ref()))
    }

    /// Number of registered situations.
    pub fn len(&self) -> usize {
        self.situations.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.situations.is_empty()
    }

    /// Define a quality's display metadata.
    pub fn define_quality(&mut self, name: impl Into<String>, def: QualityDefinition) {
        self.qualities.insert(name.into(), def);
    }

    /// Look up a quality definition.
    pub fn quality_definition(&self, name: &str) -> Option<&QualityDefinition> {
        self.qualities.get(name)
    }

    /// All quality definitions, unordered.
    pub fn quality_definitions(&self) -> impl Iterator<Item = (&str, &QualityDefinition)> {
        self.qualities.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Define a quality group.
    pub fn define_group(&mut self, id: impl Into<String>, group: QualityGroup) {
        self.groups.insert(id.into(), group);
    }

    /// Look up a quality group.
    pub fn group(&self, id: &str) -> Option<&QualityGroup> {
        self.groups.get(id)
    }

    /// Set the hook run when a fresh character starts the story.
    pub fn set_init<F>(&mut self, hook: F)
    where
        F: Fn(&mut Character, &mut dyn System) -> CoreResult<()> + Send + Sync + 'static,
    {
        self.init = Some(Box::new(hook));
    }

    /// The init hook, if set.
    pub fn init_hook(&self) -> Option<&InitHook> {
        self.init.as_ref()
    }

    /// Check the story for dangling references.
    ///
    /// The start id must be registered, and every static choice target a
    /// situation reports must name a registered situation or a tag carried
    /// by at least one situation.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.contains(&self.start) {
            return Err(CoreError::Validation(format!(
                "start situation \"{}\" is not registered",
                self.start
            )));
        }

        // Custom situations that compile their lists at runtime report no
        // static targets and are skipped here.
        for (id, situation) in &self.situations {
            for target in situation.choice_targets() {
                if let Some(tag) = target.strip_prefix('#') {
                    if self.ids_with_tag(tag).is_empty() {
                        return Err(CoreError::Validation(format!(
                            "situation \"{id}\" references tag \"#{tag}\" carried by no situation"
                        )));
                    }
                } else if !self.contains(target) {
                    return Err(CoreError::Validation(format!(
                        "situation \"{id}\" references unknown situation \"{target}\""
                    )));
                }
            }
        }

        Ok(())
    }
}
