//! Sampled keyboard state
//!
//! Written by the host's key listeners between ticks, read by the simulation
//! during a tick. The only write the simulation performs is `consume`.

use std::collections::{HashMap, HashSet};

/// Pressed/released state per key, plus the label of the last key pressed
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashMap<String, bool>,
    /// Upper-cased label of the most recent key down, empty after key up
    label: String,
    /// Keys currently held by `set_held` rather than by the player
    synthetic: HashSet<String>,
}

/// Normalized key identifier (lower-case, as bindings are stored)
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host key-down event
    pub fn key_down(&mut self, key: &str) {
        let key_id = normalize_key(key);
        self.synthetic.remove(&key_id);
        self.pressed.insert(key_id, true);
        self.label = key.to_uppercase();
    }

    /// Host key-up event
    pub fn key_up(&mut self, key: &str) {
        let key_id = normalize_key(key);
        self.synthetic.remove(&key_id);
        self.pressed.insert(key_id, false);
        self.label.clear();
    }

    /// Whether `key` is currently held
    pub fn is_held(&self, key: &str) -> bool {
        self.pressed.get(key).copied().unwrap_or(false)
    }

    /// Force `key` to not-held so one press triggers one transition
    pub fn consume(&mut self, key: &str) {
        if let Some(state) = self.pressed.get_mut(key) {
            *state = false;
        }
    }

    /// Set a key's state without touching the display label
    ///
    /// Used for synthesized input (demo mode) so the HUD keeps showing
    /// what the player actually pressed.
    pub fn set_held(&mut self, key: &str, held: bool) {
        let key_id = normalize_key(key);
        if held {
            self.synthetic.insert(key_id.clone());
        } else {
            self.synthetic.remove(&key_id);
        }
        self.pressed.insert(key_id, held);
    }

    /// Release the keys `set_held` is holding; player-held keys stay down
    pub fn release_synthetic(&mut self) {
        for key in self.synthetic.drain() {
            self.pressed.insert(key, false);
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Release everything (e.g. on window blur, where key-ups get lost)
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.synthetic.clear();
        self.label.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_up() {
        let mut input = InputState::new();
        input.key_down("A");
        assert!(input.is_held("a"));
        assert_eq!(input.label(), "A");

        input.key_up("a");
        assert!(!input.is_held("a"));
        assert_eq!(input.label(), "");
    }

    #[test]
    fn test_consume_keeps_label() {
        let mut input = InputState::new();
        input.key_down("h");
        input.consume("h");
        assert!(!input.is_held("h"));
        assert_eq!(input.label(), "H");
    }

    #[test]
    fn test_consume_unknown_key_is_noop() {
        let mut input = InputState::new();
        input.consume("z");
        assert!(!input.is_held("z"));
    }

    #[test]
    fn test_set_held_does_not_touch_label() {
        let mut input = InputState::new();
        input.set_held("d", true);
        assert!(input.is_held("d"));
        assert_eq!(input.label(), "");
    }

    #[test]
    fn test_release_synthetic_keeps_player_keys() {
        let mut input = InputState::new();
        input.key_down("a");
        input.set_held("d", true);
        input.set_held("r", true);
        // Player presses a key the autopilot was holding and takes it over
        input.key_down("r");

        input.release_synthetic();
        assert!(input.is_held("a"));
        assert!(input.is_held("r"));
        assert!(!input.is_held("d"));
    }
}
