//! The story engine: transitions, actions, and the progress log.

use rand::SeedableRng;
use rand::rngs::StdRng;

use strand_core::{Character, CoreError, Story};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::output::Transcript;
use crate::save::{SAVE_VERSION, SaveState};
use crate::system::EngineSystem;

/// Redirect chains longer than this are treated as loops.
const MAX_REDIRECTS: usize = 64;

/// Drives a story: owns the character, the current situation, the seeded
/// RNG, the transcript, and the replayable progress log.
pub struct Engine {
    story: Story,
    character: Character,
    current: Option<String>,
    rng: StdRng,
    seed: u64,
    transcript: Transcript,
    progress: Vec<String>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("character", &self.character)
            .field("current", &self.current)
            .field("seed", &self.seed)
            .field("transcript", &self.transcript)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

/// How a link addresses a situation and/or an action.
#[derive(Debug, PartialEq, Eq)]
enum Link {
    /// `id`: transition to a situation.
    Situation(String),
    /// `id/action`: transition, then act.
    SituationAction(String, String),
    /// `./action`: act on the current situation.
    CurrentAction(String),
}

impl Link {
    /// Parse a link reference.
    fn parse(link: &str) -> EngineResult<Self> {
        let malformed = || EngineError::MalformedLink(link.to_string());

        let mut parts = link.split('/');
        let situation = parts.next().ok_or_else(malformed)?;
        let action = parts.next();
        if parts.next().is_some() || situation.is_empty() {
            return Err(malformed());
        }

        match (situation, action) {
            (".", Some(action)) if !action.is_empty() => Ok(Self::CurrentAction(action.into())),
            (".", _) => Err(malformed()),
            (id, None) => Ok(Self::Situation(id.into())),
            (id, Some(action)) if !action.is_empty() => {
                Ok(Self::SituationAction(id.into(), action.into()))
            }
            _ => Err(malformed()),
        }
    }
}

impl Engine {
    /// Create an engine for a validated story.
    pub fn new(story: Story, config: EngineConfig) -> EngineResult<Self> {
        story.validate()?;
        Ok(Self {
            story,
            character: Character::new(),
            current: None,
            rng: StdRng::seed_from_u64(config.seed),
            seed: config.seed,
            transcript: Transcript::new(),
            progress: Vec::new(),
        })
    }

    /// Start the story: run the init hook, then enter the start situation.
    pub fn begin(&mut self) -> EngineResult<()> {
        if self.current.is_some() {
            return Err(EngineError::AlreadyStarted);
        }

        if let Some(hook) = self.story.init_hook() {
            let mut system = EngineSystem {
                story: &self.story,
                current: None,
                transcript: &mut self.transcript,
                rng: &mut self.rng,
                pending: None,
            };
            hook(&mut self.character, &mut system)?;
        }

        let start = self.story.start().to_string();
        self.goto(&start)
    }

    /// Follow a link: `id`, `id/action`, or `./action`.
    ///
    /// A bare id equal to the current situation does not re-enter it.
    /// Successful links are appended to the progress log; an `id/action`
    /// link is logged as two legs, so a save taken after the transition
    /// succeeded but the action failed still replays to the live state.
    pub fn process_link(&mut self, link: &str) -> EngineResult<()> {
        let link = link.trim();
        if self.current.is_none() {
            return Err(EngineError::NotStarted);
        }

        match Link::parse(link)? {
            Link::Situation(id) => {
                if self.current.as_deref() != Some(id.as_str()) {
                    self.goto(&id)?;
                }
                self.progress.push(link.to_string());
            }
            Link::SituationAction(id, action) => {
                if self.current.as_deref() != Some(id.as_str()) {
                    self.goto(&id)?;
                    self.progress.push(id);
                }
                self.act(&action)?;
                self.progress.push(format!("./{action}"));
            }
            Link::CurrentAction(action) => {
                self.act(&action)?;
                self.progress.push(link.to_string());
            }
        }
        Ok(())
    }

    /// Perform a named action on the current situation.
    fn act(&mut self, action: &str) -> EngineResult<()> {
        let current = self.current.clone().ok_or(EngineError::NotStarted)?;
        let pending = self.run_act(&current, action)?;
        if let Some(next) = pending {
            self.goto(&next)?;
        }
        Ok(())
    }

    /// Exit the current situation (if any) and enter `id`, following any
    /// redirects requested by the hooks.
    ///
    /// `current` only advances once an entry succeeds, so a failed enter
    /// leaves the engine at the last situation it actually entered (and a
    /// failed opening entry leaves the story unstarted).
    fn goto(&mut self, id: &str) -> EngineResult<()> {
        let mut next = id.to_string();
        for _ in 0..MAX_REDIRECTS {
            if !self.story.contains(&next) {
                return Err(CoreError::SituationNotFound(next).into());
            }

            let from = self.current.clone();
            if let Some(current) = &from {
                // An exit hook may redirect the transition itself.
                if let Some(redirect) = self.run_exit(current, &next)? {
                    next = redirect;
                    if !self.story.contains(&next) {
                        return Err(CoreError::SituationNotFound(next).into());
                    }
                }
            }

            let pending = self.run_enter(&next, from.as_deref())?;
            self.current = Some(next);
            match pending {
                None => return Ok(()),
                Some(redirect) => next = redirect,
            }
        }
        Err(EngineError::TransitionLoop(id.to_string()))
    }

    fn run_enter(&mut self, id: &str, from: Option<&str>) -> EngineResult<Option<String>> {
        let situation = self
            .story
            .get(id)
            .ok_or_else(|| CoreError::SituationNotFound(id.to_string()))?;
        let mut system = EngineSystem {
            story: &self.story,
            current: Some(id),
            transcript: &mut self.transcript,
            rng: &mut self.rng,
            pending: None,
        };
        situation.enter(&mut self.character, &mut system, from)?;
        Ok(system.pending)
    }

    fn run_exit(&mut self, id: &str, to: &str) -> EngineResult<Option<String>> {
        let situation = self
            .story
            .get(id)
            .ok_or_else(|| CoreError::SituationNotFound(id.to_string()))?;
        let mut system = EngineSystem {
            story: &self.story,
            current: Some(id),
            transcript: &mut self.transcript,
            rng: &mut self.rng,
            pending: None,
        };
        situation.exit(&mut self.character, &mut system, to)?;
        Ok(system.pending)
    }

    fn run_act(&mut self, id: &str, action: &str) -> EngineResult<Option<String>> {
        let situation = self
            .story
            .get(id)
            .ok_or_else(|| CoreError::SituationNotFound(id.to_string()))?;
        let mut system = EngineSystem {
            story: &self.story,
            current: Some(id),
            transcript: &mut self.transcript,
            rng: &mut self.rng,
            pending: None,
        };
        situation.act(&mut self.character, &mut system, action)?;
        Ok(system.pending)
    }

    /// Capture the replayable save state: seed plus progress log.
    pub fn save_state(&self) -> SaveState {
        SaveState::new(self.seed, self.progress.clone())
    }

    /// Rebuild an engine from a save by replaying its progress log
    /// against `story` with the saved seed.
    pub fn restore(story: Story, save: &SaveState) -> EngineResult<Self> {
        if save.version != SAVE_VERSION {
            return Err(EngineError::SaveVersion {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }

        let mut engine = Self::new(story, EngineConfig::default().with_seed(save.seed))?;
        engine.begin()?;
        for link in &save.progress {
            engine.process_link(link).map_err(|e| EngineError::ReplayDiverged {
                link: link.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(engine)
    }

    /// The story being played.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The player character.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// The current situation id, once the story has begun.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Everything emitted so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Links followed so far, in order.
    pub fn progress(&self) -> &[String] {
        &self.progress
    }

    /// The RNG seed this engine was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
