//! The transcript: an append-only log of everything the story emitted.
//!
//! Frontends render `OutputEvent` values however they like; the engine
//! never formats text beyond what the author wrote.

use serde::{Deserialize, Serialize};

/// One entry in a compiled choice list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceLine {
    /// Target situation id.
    pub id: String,
    /// Text shown to the player.
    pub label: String,
    /// Whether the entry is actually selectable right now.
    pub choosable: bool,
}

/// Something the story emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputEvent {
    /// A section heading.
    Heading(String),
    /// A paragraph of narrative text.
    Paragraph(String),
    /// A quality changed value.
    QualityChanged {
        /// Quality name.
        name: String,
        /// Previous value, absent if the quality was unset.
        old: Option<f64>,
        /// New value.
        new: f64,
    },
    /// A compiled choice list was presented.
    Choices(Vec<ChoiceLine>),
}

/// A chronological log of output events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    events: Vec<OutputEvent>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: OutputEvent) {
        self.events.push(event);
    }

    /// All events in order.
    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The most recently presented choice list, if any.
    pub fn last_choices(&self) -> Option<&[ChoiceLine]> {
        self.events.iter().rev().find_map(|e| match e {
            OutputEvent::Choices(lines) => Some(lines.as_slice()),
            _ => None,
        })
    }

    /// Render the transcript as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            match event {
                OutputEvent::Heading(text) => {
                    out.push_str(&format!("{text}\n{}\n\n", "-".repeat(text.len())));
                }
                OutputEvent::Paragraph(text) => {
                    out.push_str(&format!("{text}\n\n"));
                }
                OutputEvent::QualityChanged { name, new, .. } => {
                    out.push_str(&format!("  * {name} is now {new}\n\n"));
                }
                OutputEvent::Choices(lines) => {
                    for (i, line) in lines.iter().enumerate() {
                        if line.choosable {
                            out.push_str(&format!("  {}. {}\n", i + 1, line.label));
                        } else {
                            out.push_str(&format!("  {}. {} (unavailable)\n", i + 1, line.label));
                        }
                    }
                    out.push('\n');
                }
            }
        }
        out
    }
}
