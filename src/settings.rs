//! Game settings: gameplay tuning and key bindings
//!
//! Stored as a JSON file next to the binary (or wherever the driver points).
//! Every field has a default, so a partial file only overrides what it names.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::{Action, KeyCode};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Data-driven game balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport_width: f32,
    pub viewport_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the side edge to the paddle's hitting face
    pub paddle_inset: f32,
    pub base_paddle_speed: i32,

    pub ball_radius: f32,
    /// Serve velocity in pixels per tick; the x sign is chosen per serve
    pub serve_velocity: Vec2,
    pub max_hits_for_speed_increase: u32,
    pub deflection_gain: f32,

    /// Seconds between choosing Resume and play continuing
    pub resume_countdown: f32,
    /// Tick duration the driver passes to `Game::advance`
    pub tick_dt: f32,

    /// Ball speed factor per difficulty (Easy, Medium, Hard)
    pub speed_factors: [f32; 3],
    /// Paddle speed bonus per difficulty on top of `base_paddle_speed`
    pub paddle_speed_bonus: [i32; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            base_paddle_speed: BASE_PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            serve_velocity: Vec2::new(SERVE_VELOCITY_X, SERVE_VELOCITY_Y),
            max_hits_for_speed_increase: MAX_HITS_FOR_SPEED_INCREASE,
            deflection_gain: DEFLECTION_GAIN,

            resume_countdown: RESUME_COUNTDOWN,
            tick_dt: TICK_DT,

            speed_factors: SPEED_FACTORS,
            paddle_speed_bonus: PADDLE_SPEED_BONUS,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("tick_dt", self.tick_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.paddle_inset.is_finite() && self.paddle_inset >= 0.0) {
            return Err(invalid(format!(
                "paddle_inset must be non-negative, got {}",
                self.paddle_inset
            )));
        }
        if !(self.resume_countdown.is_finite() && self.resume_countdown >= 0.0) {
            return Err(invalid(format!(
                "resume_countdown must be non-negative, got {}",
                self.resume_countdown
            )));
        }
        if !self.serve_velocity.is_finite() || self.serve_velocity.x == 0.0 {
            return Err(invalid(
                "serve_velocity needs a finite, non-zero x component".to_string(),
            ));
        }
        if !self.deflection_gain.is_finite() {
            return Err(invalid("deflection_gain must be finite".to_string()));
        }

        if self.speed_factors.iter().any(|f| !(f.is_finite() && *f > 1.0)) {
            return Err(invalid(format!(
                "speed factors must all exceed 1.0, got {:?}",
                self.speed_factors
            )));
        }
        if !self.speed_factors.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid(format!(
                "speed factors must increase with difficulty, got {:?}",
                self.speed_factors
            )));
        }
        if !self.paddle_speed_bonus.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid(format!(
                "paddle speed bonuses must increase with difficulty, got {:?}",
                self.paddle_speed_bonus
            )));
        }
        if self.base_paddle_speed + self.paddle_speed_bonus[0] <= 0 {
            return Err(invalid(format!(
                "paddle speed on Easy must be positive, got {}",
                self.base_paddle_speed + self.paddle_speed_bonus[0]
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> SettingsError {
    SettingsError::Invalid(message)
}

/// Key bindings, one or more keys per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    keys: BTreeMap<Action, Vec<KeyCode>>,
}

impl Default for Bindings {
    fn default() -> Self {
        let keys = [
            (Action::LeftPaddleUp, KeyCode::KeyW),
            (Action::LeftPaddleDown, KeyCode::KeyS),
            (Action::RightPaddleUp, KeyCode::ArrowUp),
            (Action::RightPaddleDown, KeyCode::ArrowDown),
            (Action::NavLeft, KeyCode::ArrowLeft),
            (Action::NavRight, KeyCode::ArrowRight),
            (Action::Confirm, KeyCode::Enter),
            (Action::PauseToggle, KeyCode::KeyP),
            (Action::Quit, KeyCode::Escape),
        ]
        .into_iter()
        .map(|(action, key)| (action, vec![key]))
        .collect();
        Self { keys }
    }
}

impl Bindings {
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        self.keys
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map(|(action, _)| *action)
    }

    /// First key bound to `action`
    pub fn key_for(&self, action: Action) -> Option<KeyCode> {
        self.keys.get(&action).and_then(|codes| codes.first()).copied()
    }

    pub fn bind(&mut self, action: Action, code: KeyCode) {
        for codes in self.keys.values_mut() {
            codes.retain(|c| *c != code);
        }
        self.keys.entry(action).or_default().push(code);
    }

    /// A key may only drive one action
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut seen: HashMap<KeyCode, Action> = HashMap::new();
        for (action, codes) in &self.keys {
            for code in codes {
                if let Some(other) = seen.insert(*code, *action) {
                    return Err(invalid(format!(
                        "{code:?} is bound to both {other:?} and {action:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Everything loaded from the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    pub bindings: Bindings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.tuning.validate()?;
        self.bindings.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "tuning": { "paddle_height": 80.0 } }"#).unwrap();
        assert_eq!(settings.tuning.paddle_height, 80.0);
        assert_eq!(settings.tuning.ball_radius, BALL_RADIUS);
        assert_eq!(settings.bindings, Bindings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.tuning.deflection_gain = 4.0;
        settings.bindings.bind(Action::PauseToggle, KeyCode::Space);
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_rejects_non_increasing_speed_factors() {
        let err = Settings::from_json(r#"{ "tuning": { "speed_factors": [1.5, 1.5, 2.0] } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_factor_not_above_one() {
        let mut tuning = Tuning::default();
        tuning.speed_factors = [1.0, 1.5, 2.0];
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_key_bound_twice() {
        let json = r#"{ "bindings": { "NavLeft": ["KeyW"], "LeftPaddleUp": ["KeyW"] } }"#;
        assert!(matches!(
            Settings::from_json(json).unwrap_err(),
            SettingsError::Invalid(_)
        ));
    }

    #[test]
    fn test_rebinding_moves_key() {
        let mut bindings = Bindings::default();
        bindings.bind(Action::Confirm, KeyCode::Space);
        bindings.bind(Action::PauseToggle, KeyCode::Space);
        assert_eq!(bindings.action_for(KeyCode::Space), Some(Action::PauseToggle));
        assert_eq!(bindings.key_for(Action::Confirm), Some(KeyCode::Enter));
        bindings.validate().unwrap();
    }

    #[test]
    fn test_load_and_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.tuning.base_paddle_speed = 10;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(
            Settings::load(&path).unwrap_err(),
            SettingsError::Io { .. }
        ));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
