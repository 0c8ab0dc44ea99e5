//! Qualities: numeric character attributes with display-formatting rules.
//!
//! Characters store raw `f64` values; how a value is shown to the player
//! is decided by the `QualityFormat` attached to its definition. A format
//! may also hide a value entirely (e.g. a zero `OnOff` quality).

use serde::{Deserialize, Serialize};

/// Adjective scale used by [`QualityFormat::fudge_adjectives`].
pub const FUDGE_ADJECTIVES: &[&str] = &[
    "terrible", "poor", "mediocre", "fair", "good", "great", "superb",
];

/// How a raw quality value is rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QualityFormat {
    /// Truncated toward zero and shown as an integer.
    Integer,
    /// Like `Integer`, but a value of zero is hidden.
    NonZeroInteger,
    /// Shown as-is, keeping any fractional part.
    Numeric,
    /// Nonzero values render the quality as present with no value text;
    /// zero hides it.
    OnOff,
    /// Nonzero renders "yes", zero renders "no".
    YesNo,
    /// The rounded value (plus `offset`) indexes into a word list.
    /// Out-of-range values clamp to the ends with a "+" or "-" marker.
    WordScale {
        /// Words from lowest to highest.
        words: Vec<String>,
        /// Added to the rounded value before indexing.
        offset: i32,
    },
}

impl QualityFormat {
    /// A word scale over the classic fudge adjectives, centred so that a
    /// value of 0 reads "fair" (offset 3 maps values -3..=3 onto the list).
    pub fn fudge_adjectives() -> Self {
        Self::word_scale(FUDGE_ADJECTIVES, 3)
    }

    /// Build a word scale from a slice of words.
    pub fn word_scale(words: &[&str], offset: i32) -> Self {
        Self::WordScale {
            words: words.iter().map(|w| (*w).to_string()).collect(),
            offset,
        }
    }

    /// Format a raw value. `None` means the quality should not be shown.
    pub fn format(&self, value: f64) -> Option<String> {
        match self {
            Self::Integer => Some(format!("{}", value.trunc() as i64)),
            Self::NonZeroInteger => {
                let n = value.trunc() as i64;
                if n == 0 { None } else { Some(n.to_string()) }
            }
            Self::Numeric => Some(format!("{value}")),
            Self::OnOff => {
                if value != 0.0 {
                    Some(String::new())
                } else {
                    None
                }
            }
            Self::YesNo => Some(if value != 0.0 { "yes" } else { "no" }.to_string()),
            Self::WordScale { words, offset } => {
                if words.is_empty() {
                    return None;
                }
                let idx = value.round() as i64 + i64::from(*offset);
                if idx < 0 {
                    Some(format!("{}-", words[0]))
                } else if idx as usize >= words.len() {
                    Some(format!("{}+", words[words.len() - 1]))
                } else {
                    Some(words[idx as usize].clone())
                }
            }
        }
    }
}

/// Display metadata for one quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityDefinition {
    /// Human-readable title (e.g. "Courage").
    pub title: String,
    /// Formatting rule for raw values.
    pub format: QualityFormat,
    /// Optional quality-group id for frontends that bucket stats.
    pub group: Option<String>,
}

impl QualityDefinition {
    /// Create a definition with the given title and format.
    pub fn new(title: impl Into<String>, format: QualityFormat) -> Self {
        Self {
            title: title.into(),
            format,
            group: None,
        }
    }

    /// Assign this quality to a group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// A named bucket of qualities, ordered by priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityGroup {
    /// Title shown above the group, if any.
    pub title: Option<String>,
    /// Lower priorities sort first.
    pub priority: i32,
}

impl QualityGroup {
    /// Create a group with a visible title.
    pub fn new(title: impl Into<String>, priority: i32) -> Self {
        Self {
            title: Some(title.into()),
            priority,
        }
    }
}
