//! Character state: quality values plus a free-form sandbox.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The player character.
///
/// Holds raw quality values and a sandbox of arbitrary JSON values that
/// authors can use for bookkeeping. The sandbox persists with the
/// character but has no meaning to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    qualities: BTreeMap<String, f64>,
    sandbox: BTreeMap<String, serde_json::Value>,
}

impl Character {
    /// Create an empty character.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a quality value, if set.
    pub fn quality(&self, name: &str) -> Option<f64> {
        self.qualities.get(name).copied()
    }

    /// Get a quality value, treating unset as 0.
    pub fn quality_or_zero(&self, name: &str) -> f64 {
        self.quality(name).unwrap_or(0.0)
    }

    /// Set a quality value. Returns the previous value, if any.
    pub fn set_quality(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.qualities.insert(name.into(), value)
    }

    /// Add `delta` to a quality (unset counts as 0). Returns the new value.
    pub fn adjust_quality(&mut self, name: impl Into<String>, delta: f64) -> f64 {
        let name = name.into();
        let value = self.quality_or_zero(&name) + delta;
        self.qualities.insert(name, value);
        value
    }

    /// Remove a quality entirely. Returns the removed value, if any.
    pub fn clear_quality(&mut self, name: &str) -> Option<f64> {
        self.qualities.remove(name)
    }

    /// All set qualities in name order.
    pub fn qualities(&self) -> impl Iterator<Item = (&str, f64)> {
        self.qualities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Read a sandbox entry.
    pub fn sandbox(&self, key: &str) -> Option<&serde_json::Value> {
        self.sandbox.get(key)
    }

    /// Write a sandbox entry.
    pub fn set_sandbox(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.sandbox.insert(key.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn qualities_default_unset() {
        let c = Character::new();
        assert_eq!(c.quality("health"), None);
        assert_eq!(c.quality_or_zero("health"), 0.0);
    }

    #[test]
    fn set_and_adjust() {
        let mut c = Character::new();
        assert_eq!(c.set_quality("health", 10.0), None);
        assert_eq!(c.set_quality("health", 8.0), Some(10.0));
        assert_eq!(c.adjust_quality("health", -3.0), 5.0);
        assert_eq!(c.adjust_quality("courage", 1.0), 1.0);
    }

    #[test]
    fn clear_quality() {
        let mut c = Character::new();
        c.set_quality("luck", 2.0);
        assert_eq!(c.clear_quality("luck"), Some(2.0));
        assert_eq!(c.quality("luck"), None);
    }

    #[test]
    fn sandbox_roundtrip() {
        let mut c = Character::new();
        c.set_sandbox("visited", json!(["start", "cave"]));
        assert_eq!(c.sandbox("visited"), Some(&json!(["start", "cave"])));

        let json = serde_json::to_string(&c).unwrap();
        let c2: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(c2.sandbox("visited"), Some(&json!(["start", "cave"])));
    }

    #[test]
    fn qualities_iterate_in_name_order() {
        let mut c = Character::new();
        c.set_quality("zeal", 1.0);
        c.set_quality("agility", 2.0);
        let names: Vec<&str> = c.qualities().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["agility", "zeal"]);
    }
}
