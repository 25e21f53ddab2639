//! Game settings: key bindings and timer tuning
//!
//! Persisted in LocalStorage as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::input::normalize_key;

/// Control scheme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// One ball, one shared start/drop key, the same catch key on both branches
    Classic,
    /// Separate catch keys per branch and a timed add-ball window
    #[default]
    Split,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Classic => "Classic",
            ControlScheme::Split => "Split",
        }
    }

    /// The scheme after this one when cycling
    pub fn next(&self) -> Self {
        match self {
            ControlScheme::Classic => ControlScheme::Split,
            ControlScheme::Split => ControlScheme::Classic,
        }
    }

    pub fn bindings(&self) -> KeyBindings {
        match self {
            ControlScheme::Classic => KeyBindings::classic(),
            ControlScheme::Split => KeyBindings::split(),
        }
    }

    /// Whether the add-ball window runs under this scheme
    pub fn spawn_enabled(&self) -> bool {
        match self {
            ControlScheme::Classic => false,
            ControlScheme::Split => true,
        }
    }
}

/// Lower-case key identifiers for every game action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub start: String,
    /// Must be held when a ball finishes branch A
    pub catch_a: String,
    /// Must be held when a ball finishes branch B
    pub catch_b: String,
    /// Sends caught balls back to the entry lane
    pub drop: String,
    pub add_ball: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::split()
    }
}

impl KeyBindings {
    pub fn classic() -> Self {
        Self {
            start: "h".into(),
            catch_a: "a".into(),
            catch_b: "a".into(),
            drop: "h".into(),
            add_ball: "r".into(),
        }
    }

    pub fn split() -> Self {
        Self {
            start: "w".into(),
            catch_a: "a".into(),
            catch_b: "d".into(),
            drop: "w".into(),
            add_ball: "r".into(),
        }
    }

    /// Lower-case every binding so it matches recorded key presses
    pub fn normalize(&mut self) {
        for key in [
            &mut self.start,
            &mut self.catch_a,
            &mut self.catch_b,
            &mut self.drop,
            &mut self.add_ball,
        ] {
            *key = normalize_key(key);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, key) in [
            ("start", &self.start),
            ("catch_a", &self.catch_a),
            ("catch_b", &self.catch_b),
            ("drop", &self.drop),
            ("add_ball", &self.add_ball),
        ] {
            if key.trim().is_empty() {
                return Err(ConfigError::EmptyBinding(name));
            }
        }
        Ok(())
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub scheme: ControlScheme,
    pub bindings: KeyBindings,

    // === Add-ball window ===
    /// Run the recurring add-ball window
    pub spawn_enabled: bool,
    /// Interval between add-ball windows (ms)
    pub spawn_interval_ms: f32,
    /// Time allowed to add a ball once a window opens (ms)
    pub countdown_ms: f32,

    // === Ball appearance ===
    pub ball_radius: f32,
    /// CSS color string
    pub ball_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_scheme(ControlScheme::default())
    }
}

impl Settings {
    /// Settings with a scheme's bindings and spawn behaviour
    pub fn from_scheme(scheme: ControlScheme) -> Self {
        Self {
            scheme,
            bindings: scheme.bindings(),
            spawn_enabled: scheme.spawn_enabled(),
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            countdown_ms: SPAWN_COUNTDOWN_MS,
            ball_radius: BALL_RADIUS,
            ball_color: BALL_COLOR.to_string(),
        }
    }

    /// Switch scheme (resets bindings and spawn toggle to the scheme's)
    pub fn apply_scheme(&mut self, scheme: ControlScheme) {
        self.scheme = scheme;
        self.bindings = scheme.bindings();
        self.spawn_enabled = scheme.spawn_enabled();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bindings.validate()?;
        for (name, value) in [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("countdown_ms", self.countdown_ms),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositiveTimer { name, value });
            }
        }
        if self.ball_radius <= 0.0 || !self.ball_radius.is_finite() {
            return Err(ConfigError::NonPositiveRadius(self.ball_radius));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_catch_settings";

    /// Parse persisted JSON, rejecting settings that fail validation
    pub fn from_json(json: &str) -> Option<Self> {
        let mut settings: Settings = match serde_json::from_str(json) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                return None;
            }
        };
        settings.bindings.normalize();
        match settings.validate() {
            Ok(()) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved ({} scheme)", self.scheme.as_str());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
        assert_eq!(
            Settings::from_scheme(ControlScheme::Classic).validate(),
            Ok(())
        );
    }

    #[test]
    fn test_classic_shares_keys() {
        let settings = Settings::from_scheme(ControlScheme::Classic);
        assert_eq!(settings.bindings.start, settings.bindings.drop);
        assert_eq!(settings.bindings.catch_a, settings.bindings.catch_b);
        assert!(!settings.spawn_enabled);
    }

    #[test]
    fn test_apply_scheme() {
        let mut settings = Settings::from_scheme(ControlScheme::Classic);
        settings.apply_scheme(ControlScheme::Split);
        assert_eq!(settings.bindings, KeyBindings::split());
        assert!(settings.spawn_enabled);
    }

    #[test]
    fn test_scheme_cycle() {
        assert_eq!(ControlScheme::Split.next(), ControlScheme::Classic);
        assert_eq!(ControlScheme::Classic.next(), ControlScheme::Split);
    }

    #[test]
    fn test_loaded_bindings_are_lower_cased() {
        let mut stored = Settings::default();
        stored.bindings.start = "W".into();
        stored.bindings.catch_b = "D".into();
        let json = serde_json::to_string(&stored).unwrap();

        let loaded = Settings::from_json(&json).unwrap();
        assert_eq!(loaded.bindings, KeyBindings::split());
    }

    #[test]
    fn test_empty_binding_rejected() {
        let mut settings = Settings::default();
        settings.bindings.catch_b = " ".into();
        assert_eq!(
            settings.validate(),
            Err(ConfigError::EmptyBinding("catch_b"))
        );
    }

    #[test]
    fn test_non_positive_countdown_rejected() {
        let mut settings = Settings::default();
        settings.countdown_ms = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NonPositiveTimer {
                name: "countdown_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_json_roundtrip_and_rejection() {
        let settings = Settings::from_scheme(ControlScheme::Classic);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), Some(settings));

        let mut bad = Settings::default();
        bad.ball_radius = -1.0;
        let json = serde_json::to_string(&bad).unwrap();
        assert_eq!(Settings::from_json(&json), None);
        assert_eq!(Settings::from_json("{not json"), None);
    }
}
